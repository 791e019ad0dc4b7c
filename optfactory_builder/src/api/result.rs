use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::OptionDefinition;
use crate::model::Value;
use crate::prelude::OptionEnum;

/// An error reading a value out of a [`ParseResult`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The option was not matched in the parse.
    #[error("Option '{0}' was not matched.")]
    Absent(String),

    /// The value cannot be read as the requested type.
    #[error("Option '{name}' ({declared_type}) cannot be read as {requested}: {message}.")]
    Mismatch {
        /// The option name.
        name: String,
        /// The option's declared type.
        declared_type: String,
        /// The requested Rust type.
        requested: &'static str,
        /// Why the value does not fit.
        message: String,
    },
}

/// The options matched by one parse, with their values, in the order they were matched.
///
/// Options marked unique appear at most once; others appear once per match.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseResult<'r> {
    entries: Vec<(&'r OptionDefinition, Value)>,
}

impl<'r> ParseResult<'r> {
    pub(crate) fn push(&mut self, option: &'r OptionDefinition, value: Value) {
        self.entries.push((option, value));
    }

    /// The number of matches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The matches, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'r OptionDefinition, &Value)> + '_ {
        self.entries.iter().map(|(option, value)| (*option, value))
    }

    /// The matched options, in the order they were first matched.
    pub fn options(&self) -> Vec<&'r OptionDefinition> {
        let mut options: Vec<&'r OptionDefinition> = Vec::default();

        for (option, _) in &self.entries {
            if !options.iter().any(|o| o.name() == option.name()) {
                options.push(*option);
            }
        }

        options
    }

    /// Whether the option (by name) was matched.
    pub fn contains(&self, name: &str) -> bool {
        self.option_by_name(name).is_some()
    }

    /// The matched option with the given name.
    pub fn option_by_name(&self, name: &str) -> Option<&'r OptionDefinition> {
        self.entries
            .iter()
            .map(|(option, _)| *option)
            .find(|option| option.name() == name)
    }

    /// The value of the option (by name).
    /// For a repeated option, this is the value of the final match.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(option, _)| option.name() == name)
            .map(|(_, value)| value)
    }

    /// Every value of the option (by name), in the order matched.
    pub fn get_all(&self, name: &str) -> Vec<&Value> {
        self.entries
            .iter()
            .filter(|(option, _)| option.name() == name)
            .map(|(_, value)| value)
            .collect()
    }

    /// Read the value of the option (by name) as the type `T`.
    ///
    /// ### Example
    /// ```
    /// # use optfactory_builder as optfactory;
    /// use optfactory::{parse, DeclaredType, OptionDefinition, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry
    ///     .register(OptionDefinition::builder("a", DeclaredType::integer()).alias("-a").build())
    ///     .unwrap();
    /// let result = parse("-a 123", &registry).unwrap();
    ///
    /// assert_eq!(result.value::<i32>("a").unwrap(), 123);
    /// assert!(result.value::<String>("a").is_err());
    /// ```
    pub fn value<T: DeserializeOwned>(&self, name: &str) -> Result<T, LookupError> {
        let (option, value) = self.entry(name)?;

        serde_json::from_value(value.to_json()).map_err(|error| LookupError::Mismatch {
            name: name.to_string(),
            declared_type: option.declared_type().to_string(),
            requested: std::any::type_name::<T>(),
            message: error.to_string(),
        })
    }

    /// Read the value of the enumeration option (by name) as the variant of `E`.
    pub fn variant<E: OptionEnum>(&self, name: &str) -> Result<E, LookupError> {
        let (option, value) = self.entry(name)?;
        let variant = match value {
            Value::Variant(text) | Value::String(text) => E::from_variant(text),
            _ => None,
        };

        variant.ok_or_else(|| LookupError::Mismatch {
            name: name.to_string(),
            declared_type: option.declared_type().to_string(),
            requested: std::any::type_name::<E>(),
            message: format!("'{value}' is not one of {}", E::VARIANTS.join(", ")),
        })
    }

    fn entry(&self, name: &str) -> Result<(&'r OptionDefinition, &Value), LookupError> {
        self.entries
            .iter()
            .rev()
            .find(|(option, _)| option.name() == name)
            .map(|(option, value)| (*option, value))
            .ok_or_else(|| LookupError::Absent(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeclaredType;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    #[allow(clippy::upper_case_acronyms)]
    enum Operation {
        PLUS,
        MINUS,
    }

    impl OptionEnum for Operation {
        const NAME: &'static str = "Operation";
        const VARIANTS: &'static [&'static str] = &["PLUS", "MINUS"];

        fn from_variant(variant: &str) -> Option<Self> {
            match variant {
                "PLUS" => Some(Operation::PLUS),
                "MINUS" => Some(Operation::MINUS),
                _ => None,
            }
        }

        fn variant(&self) -> &'static str {
            match self {
                Operation::PLUS => "PLUS",
                Operation::MINUS => "MINUS",
            }
        }
    }

    fn option(name: &str, declared_type: DeclaredType) -> OptionDefinition {
        OptionDefinition::builder(name, declared_type)
            .alias(format!("-{name}"))
            .unique(false)
            .build()
    }

    #[test]
    fn empty() {
        let result = ParseResult::default();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.get("a"), None);
        assert_eq!(result.value::<u32>("a"), Err(LookupError::Absent("a".to_string())));
    }

    #[test]
    fn accessors() {
        let a = option("a", DeclaredType::integer());
        let b = option("b", DeclaredType::string());
        let mut result = ParseResult::default();
        result.push(&b, Value::String("x".to_string()));
        result.push(&a, Value::Integer(1));
        result.push(&b, Value::String("y".to_string()));

        assert_eq!(result.len(), 3);
        assert_eq!(
            result.options().iter().map(|o| o.name()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert_eq!(
            result.iter().map(|(o, _)| o.name()).collect::<Vec<_>>(),
            vec!["b", "a", "b"]
        );
        assert!(result.contains("a"));
        assert!(!result.contains("c"));
        assert_eq!(result.option_by_name("a"), Some(&a));
        assert_eq!(result.get("b"), Some(&Value::String("y".to_string())));
        assert_eq!(
            result.get_all("b"),
            vec![&Value::String("x".to_string()), &Value::String("y".to_string())]
        );
    }

    #[test]
    fn value() {
        let a = option("a", DeclaredType::integer());
        let l = option("l", DeclaredType::composite::<Vec<String>>());
        let op = option("op", DeclaredType::enumeration::<Operation>());
        let mut result = ParseResult::default();
        result.push(&a, Value::Integer(50));
        result.push(&l, Value::Composite(serde_json::json!(["a", "b"])));
        result.push(&op, Value::Variant("MINUS".to_string()));

        assert_eq!(result.value::<i64>("a").unwrap(), 50);
        assert_eq!(result.value::<u8>("a").unwrap(), 50);
        assert_eq!(result.value::<f64>("a").unwrap(), 50.0);
        assert_eq!(
            result.value::<Vec<String>>("l").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(result.value::<Operation>("op").unwrap(), Operation::MINUS);
        assert_eq!(result.variant::<Operation>("op").unwrap(), Operation::MINUS);
    }

    #[test]
    fn value_mismatch() {
        let a = option("a", DeclaredType::integer());
        let mut result = ParseResult::default();
        result.push(&a, Value::Integer(-1));

        assert_matches!(
            result.value::<String>("a"),
            Err(LookupError::Mismatch { name, declared_type, .. }) if name == "a" && declared_type == "integer"
        );
        assert_matches!(result.value::<u32>("a"), Err(LookupError::Mismatch { .. }));
        assert_matches!(
            result.variant::<Operation>("a"),
            Err(LookupError::Mismatch { message, .. }) if message == "'-1' is not one of PLUS, MINUS"
        );
    }
}
