//! Rule table - declarative per-field constraints
//!
//! A [`RuleSet`] is built once per entity type: an ordered list of fields,
//! each with an accessor and the rules that apply to it. Evaluation walks the
//! fields in declaration order and the rules of each field in declaration
//! order, collecting every violation instead of stopping at the first one.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidateLength, ValidationError};

use super::{FieldViolation, ValidationOutcome};

/// View of a field value as seen by the rules
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// Optional string field
    Text(Option<&'a str>),
    /// Numeric field, always present
    Number(Decimal),
    /// Embedded object, only its presence is checked
    Object(bool),
}

/// A single constraint attached to a field
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present; strings must also contain a non-blank character
    Required,
    /// Present strings may not exceed the given number of characters
    MaxLength(usize),
    /// Numbers must lie in `[min, max]`
    Range {
        min: Decimal,
        max: Decimal,
        message: Option<&'static str>,
    },
}

impl Rule {
    /// Range rule with a custom message
    pub fn range_with_message(min: Decimal, max: Decimal, message: &'static str) -> Self {
        Rule::Range {
            min,
            max,
            message: Some(message),
        }
    }

    /// Evaluates the rule, returning the violation if the value breaks it.
    /// Rules that do not apply to the kind of value pass.
    fn check(&self, field: &'static str, value: FieldValue<'_>) -> Option<ValidationError> {
        match (self, value) {
            (Rule::Required, FieldValue::Text(text)) => {
                let present = text.is_some_and(|s| !s.trim().is_empty());
                (!present).then(|| required(field))
            }
            (Rule::Required, FieldValue::Object(present)) => (!present).then(|| required(field)),
            (Rule::MaxLength(max), FieldValue::Text(Some(s))) => {
                (!s.validate_length(None, Some(*max as u64), None)).then(|| {
                    let mut error = violation(
                        "length",
                        format!("{field} length can't be more than {max} characters."),
                    );
                    error.add_param(Cow::from("max"), max);
                    error
                })
            }
            (Rule::Range { min, max, message }, FieldValue::Number(n)) => {
                (n < *min || n > *max).then(|| {
                    let text = match message {
                        Some(message) => (*message).to_string(),
                        None => format!("{field} must be between {min} and {max}."),
                    };
                    let mut error = violation("range", text);
                    error.add_param(Cow::from("min"), &min.to_string());
                    error.add_param(Cow::from("max"), &max.to_string());
                    error.add_param(Cow::from("value"), &n.to_string());
                    error
                })
            }
            _ => None,
        }
    }
}

fn required(field: &'static str) -> ValidationError {
    violation("required", format!("{field} is required."))
}

fn violation(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

struct FieldRules<T> {
    field: &'static str,
    accessor: fn(&T) -> FieldValue<'_>,
    rules: Vec<Rule>,
}

/// Ordered rule table for entities of type `T`
pub struct RuleSet<T> {
    fields: Vec<FieldRules<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field with its rules. `field` is the display name used in
    /// messages, e.g. `"Name"`.
    pub fn field(
        mut self,
        field: &'static str,
        accessor: fn(&T) -> FieldValue<'_>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.fields.push(FieldRules {
            field,
            accessor,
            rules: rules.into_iter().collect(),
        });
        self
    }

    /// Runs every rule against `entity`
    pub fn validate(&self, entity: &T) -> ValidationOutcome {
        let errors = self
            .fields
            .iter()
            .flat_map(|field_rules| {
                let value = (field_rules.accessor)(entity);
                field_rules.rules.iter().filter_map(move |rule| {
                    rule.check(field_rules.field, value)
                        .map(|error| FieldViolation {
                            field: field_rules.field,
                            error,
                        })
                })
            })
            .collect();

        ValidationOutcome::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        label: Option<String>,
        amount: Decimal,
        nested: Option<()>,
    }

    fn rules() -> RuleSet<Sample> {
        RuleSet::<Sample>::new()
            .field(
                "Label",
                |s| FieldValue::Text(s.label.as_deref()),
                [Rule::Required, Rule::MaxLength(5)],
            )
            .field(
                "Amount",
                |s| FieldValue::Number(s.amount),
                [Rule::Range {
                    min: Decimal::ZERO,
                    max: Decimal::from(10),
                    message: None,
                }],
            )
            .field("Nested", |s| FieldValue::Object(s.nested.is_some()), [Rule::Required])
    }

    #[test]
    fn test_valid_sample_has_no_errors() {
        let sample = Sample {
            label: Some("ok".into()),
            amount: Decimal::from(3),
            nested: Some(()),
        };
        let outcome = rules().validate(&sample);
        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_collects_all_violations_in_declaration_order() {
        let sample = Sample {
            label: None,
            amount: Decimal::from(11),
            nested: None,
        };
        let outcome = rules().validate(&sample);
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.messages(),
            vec![
                "Label is required.",
                "Amount must be between 0 and 10.",
                "Nested is required.",
            ]
        );
    }

    #[test]
    fn test_blank_string_is_missing_but_length_is_not_checked_for_absent() {
        let sample = Sample {
            label: Some("   ".into()),
            amount: Decimal::ZERO,
            nested: Some(()),
        };
        let outcome = rules().validate(&sample);
        assert_eq!(outcome.messages(), vec!["Label is required."]);
    }

    #[test]
    fn test_max_length_counts_characters_not_bytes() {
        let sample = Sample {
            label: Some("ééééé".into()),
            amount: Decimal::ZERO,
            nested: Some(()),
        };
        assert!(rules().validate(&sample).is_valid());

        let sample = Sample {
            label: Some("éééééé".into()),
            ..sample
        };
        let outcome = rules().validate(&sample);
        assert_eq!(
            outcome.messages(),
            vec!["Label length can't be more than 5 characters."]
        );
        assert_eq!(outcome.errors()[0].field, "Label");
        assert_eq!(outcome.errors()[0].error.code, "length");
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut sample = Sample {
            label: Some("x".into()),
            amount: Decimal::ZERO,
            nested: Some(()),
        };
        assert!(rules().validate(&sample).is_valid());
        sample.amount = Decimal::from(10);
        assert!(rules().validate(&sample).is_valid());
    }
}
