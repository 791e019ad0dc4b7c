use thiserror::Error;

use crate::api::{ParseResult, Registry};

/// An error in a complete parse result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Mandatory options (by name) which were not matched.
    #[error("Not all of the mandatory options were provided: {}.", .0.join(", "))]
    MissingMandatoryOptions(Vec<String>),
}

/// Check that every mandatory option of the registry was matched in the result.
///
/// Uniqueness is enforced while parsing, not here.
pub fn validate(result: &ParseResult<'_>, registry: &Registry) -> Result<(), ValidationError> {
    let absent: Vec<String> = registry
        .options()
        .iter()
        .filter(|option| option.is_mandatory() && !result.contains(option.name()))
        .map(|option| option.name().to_string())
        .collect();

    if absent.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingMandatoryOptions(absent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OptionDefinition;
    use crate::model::{DeclaredType, Value};

    fn registry() -> Registry {
        let mut registry = Registry::new();

        for (name, mandatory) in [("a", true), ("b", false), ("c", true)] {
            registry
                .register(
                    OptionDefinition::builder(name, DeclaredType::integer())
                        .alias(format!("-{name}"))
                        .mandatory(mandatory)
                        .build(),
                )
                .unwrap();
        }

        registry
    }

    #[test]
    fn validate_complete() {
        let registry = registry();
        let mut result = ParseResult::default();
        result.push(registry.option_by_name("c").unwrap(), Value::Integer(1));
        result.push(registry.option_by_name("a").unwrap(), Value::Integer(2));

        validate(&result, &registry).unwrap();
    }

    #[test]
    fn validate_missing() {
        let registry = registry();
        let mut result = ParseResult::default();
        result.push(registry.option_by_name("b").unwrap(), Value::Integer(1));

        let error = validate(&result, &registry).unwrap_err();

        assert_eq!(
            error,
            ValidationError::MissingMandatoryOptions(vec!["a".to_string(), "c".to_string()])
        );
        assert_eq!(
            error.to_string(),
            "Not all of the mandatory options were provided: a, c."
        );
    }

    #[test]
    fn validate_missing_one() {
        let registry = registry();
        let mut result = ParseResult::default();
        result.push(registry.option_by_name("a").unwrap(), Value::Integer(1));

        assert_eq!(
            validate(&result, &registry).unwrap_err(),
            ValidationError::MissingMandatoryOptions(vec!["c".to_string()])
        );
    }
}
