//! Entity contract - identity shared by every persisted document

use serde::{Serialize, de::DeserializeOwned};

/// A record that can be stored through the generic repository.
///
/// The identifier doubles as the partition key of the document, so every
/// entity must have a non-empty `id` before its first write. The repository
/// assigns one on create when the caller did not.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Logical container (collection) holding every document of this type
    const CONTAINER: &'static str;

    /// Current identifier, `None` until assigned
    fn id(&self) -> Option<&str>;

    /// Overwrites the identifier
    fn set_id(&mut self, id: String);

    /// Partition key used to route the document, equal to the id
    fn partition_key(&self) -> Option<&str> {
        self.id()
    }
}
