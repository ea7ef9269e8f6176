//! Validation engine
//!
//! Entities declare their constraints as a static [`RuleSet`]; evaluation
//! produces a [`ValidationOutcome`] listing every violated rule without
//! touching the entity.

pub mod rules;

pub use rules::{FieldValue, Rule, RuleSet};

use std::fmt;
use validator::ValidationError;

/// A rule violation on a named field
#[derive(Debug, Clone)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldViolation {
    /// Human readable message of the violation
    pub fn message(&self) -> String {
        match &self.error.message {
            Some(message) => message.to_string(),
            None => format!("{} is invalid.", self.field),
        }
    }
}

/// Result of running a rule set: `is_valid` plus the ordered errors
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    errors: Vec<FieldViolation>,
}

impl ValidationOutcome {
    pub fn new(errors: Vec<FieldViolation>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldViolation] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldViolation::message).collect()
    }

    /// `Ok(())` when valid, otherwise the failure carrying every message
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailure {
                messages: self.messages(),
            })
        }
    }
}

/// Entity rejected by validation; never reaches the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub messages: Vec<String>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.messages.join(", "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Types with a declarative rule table
pub trait Validatable: Sized + 'static {
    /// Rule table, built once
    fn rules() -> &'static RuleSet<Self>;

    fn validate(&self) -> ValidationOutcome {
        Self::rules().validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display_joins_every_message() {
        let failure = ValidationFailure {
            messages: vec!["Name is required.".into(), "Address is required.".into()],
        };
        assert_eq!(
            failure.to_string(),
            "Validation failed: Name is required., Address is required."
        );
    }

    #[test]
    fn test_empty_outcome_is_ok() {
        assert!(ValidationOutcome::default().into_result().is_ok());
    }
}
