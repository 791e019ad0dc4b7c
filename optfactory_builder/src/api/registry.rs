use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::api::OptionDefinition;
use crate::constant::*;
use crate::model::{DeclaredType, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A caller supplied conversion from raw value text, overriding the built-in coercion for a declared type.
pub type Coercer = Box<dyn Fn(&str) -> Result<Value, String>>;

/// An error in the option configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The name or an alias is already registered.
    #[error("Cannot duplicate the option name or alias '{0}'.")]
    DuplicateIdentity(String),

    /// An alias does not start with a registered prefix.
    #[error("Alias '{alias}' must start with a registered prefix (found '{prefix}').")]
    InvalidPrefix {
        /// The offending alias.
        alias: String,
        /// The non-alphanumeric leading run of the alias.
        prefix: String,
    },

    /// The prefix is longer than 2 characters.
    #[error("Prefix '{0}' must not be longer than 2 characters.")]
    PrefixTooLong(String),

    /// The prefix contains a letter or digit.
    #[error("Prefix '{0}' must consist of non-alphanumeric symbols.")]
    PrefixNotSymbolic(String),

    /// The prefix contains a bracket, quote, or whitespace character.
    #[error("Prefix '{prefix}' must not contain the symbol '{symbol}'.")]
    PrefixForbiddenChar {
        /// The offending prefix.
        prefix: String,
        /// The forbidden character.
        symbol: char,
    },

    /// The alias is empty or contains whitespace, so could never match a token.
    #[error("Alias '{0}' must be non-empty and must not contain whitespace.")]
    InvalidAlias(String),

    /// The option has no aliases, so could never be matched.
    #[error("Option '{0}' must have at least one alias.")]
    MissingAlias(String),
}

/// The set of registered options, alias prefixes, and custom coercers.
///
/// The registry is an explicit configuration object: build it, then hand it to [`parse`](crate::parse).
///
/// ### Example
/// ```
/// # use optfactory_builder as optfactory;
/// use optfactory::{DeclaredType, OptionDefinition, Registry};
///
/// let mut registry = Registry::new();
/// registry
///     .register(OptionDefinition::builder("a", DeclaredType::integer()).alias("-a").build())
///     .unwrap();
///
/// assert!(registry.exists("-a"));
/// assert_eq!(registry.lookup_by_alias("-a").unwrap().name(), "a");
/// ```
pub struct Registry {
    options: Vec<OptionDefinition>,
    aliases: HashMap<String, usize>,
    prefixes: BTreeSet<String>,
    coercers: HashMap<DeclaredType, Coercer>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("options", &self.options)
            .field("prefixes", &self.prefixes)
            .field("coercers", &self.coercers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry, allowing the prefixes `""`, `"-"`, and `"--"`.
    pub fn new() -> Self {
        Self {
            options: Vec::default(),
            aliases: HashMap::default(),
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            coercers: HashMap::default(),
        }
    }

    /// Register an option.
    ///
    /// Fails, leaving the registry unchanged, if an alias has an unregistered prefix,
    /// or if the name or an alias collides with an already registered option.
    pub fn register(&mut self, option: OptionDefinition) -> Result<(), ConfigError> {
        if option.aliases().is_empty() {
            return Err(ConfigError::MissingAlias(option.name().to_string()));
        }

        for alias in option.aliases() {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidAlias(alias.clone()));
            }

            let prefix = prefix_of(alias);

            if !self.prefixes.contains(prefix) {
                return Err(ConfigError::InvalidPrefix {
                    alias: alias.clone(),
                    prefix: prefix.to_string(),
                });
            }
        }

        if self.option_by_name(option.name()).is_some() {
            return Err(ConfigError::DuplicateIdentity(option.name().to_string()));
        }

        if let Some(alias) = option.aliases().iter().find(|a| self.exists(a)) {
            return Err(ConfigError::DuplicateIdentity(alias.clone()));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registering option '{}' with aliases {:?}.",
                option.name(),
                option.aliases()
            );
        }

        let index = self.options.len();

        for alias in option.aliases() {
            self.aliases.insert(alias.clone(), index);
        }

        self.options.push(option);
        Ok(())
    }

    /// Allow aliases to start with `prefix`.
    ///
    /// A prefix is at most 2 characters, none of which may be a letter, digit, bracket, quote, or whitespace.
    pub fn add_prefix(&mut self, prefix: impl Into<String>) -> Result<(), ConfigError> {
        let prefix = prefix.into();

        if prefix.chars().count() > MAX_PREFIX_LENGTH {
            return Err(ConfigError::PrefixTooLong(prefix));
        }

        if prefix.chars().any(char::is_alphanumeric) {
            return Err(ConfigError::PrefixNotSymbolic(prefix));
        }

        if let Some(symbol) = prefix
            .chars()
            .find(|c| FORBIDDEN_PREFIX_CHARS.contains(c) || c.is_whitespace())
        {
            return Err(ConfigError::PrefixForbiddenChar { prefix, symbol });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Adding prefix '{prefix}'.");
        }

        self.prefixes.insert(prefix);
        Ok(())
    }

    /// Use `coercer` (exclusively) to convert the value text of any option declared with `declared_type`.
    /// If repeated for the same type, only the final coercer will apply.
    pub fn add_coercer(
        &mut self,
        declared_type: DeclaredType,
        coercer: impl Fn(&str) -> Result<Value, String> + 'static,
    ) {
        self.coercers.insert(declared_type, Box::new(coercer));
    }

    pub(crate) fn coercer(&self, declared_type: &DeclaredType) -> Option<&Coercer> {
        self.coercers.get(declared_type)
    }

    /// Find the option which has `token` as an alias (exact match).
    pub fn lookup_by_alias(&self, token: &str) -> Option<&OptionDefinition> {
        if token.trim().is_empty() {
            return None;
        }

        self.aliases.get(token).map(|index| &self.options[*index])
    }

    /// Whether any registered option has `alias` as an alias.
    pub fn exists(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Find the option with the given name.
    pub fn option_by_name(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.name() == name)
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    /// The allowed alias prefixes.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Remove every option.
    /// Prefixes and coercers are kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Clearing {} options.", self.options.len());
        }

        self.options.clear();
        self.aliases.clear();
    }
}

/// The longest non-alphanumeric leading run of the alias.
fn prefix_of(alias: &str) -> &str {
    match alias.find(char::is_alphanumeric) {
        Some(index) => &alias[..index],
        None => alias,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn integer(name: &str, aliases: &[&str]) -> OptionDefinition {
        OptionDefinition::builder(name, DeclaredType::integer())
            .aliases(aliases.iter().copied())
            .build()
    }

    #[test]
    fn new_prefixes() {
        let registry = Registry::new();
        assert_eq!(registry.prefixes().collect::<Vec<_>>(), vec!["", "-", "--"]);
        assert!(registry.options().is_empty());
    }

    #[rstest]
    #[case("-a", "-")]
    #[case("--abc", "--")]
    #[case("abc", "")]
    #[case("+a", "+")]
    #[case("-+9", "-+")]
    #[case("--", "--")]
    fn prefix(#[case] alias: &str, #[case] expected: &str) {
        assert_eq!(prefix_of(alias), expected);
    }

    #[test]
    fn register() {
        let mut registry = Registry::new();
        registry.register(integer("a", &["-a"])).unwrap();
        registry.register(integer("b", &["-b", "--b"])).unwrap();
        registry.register(integer("c", &["PLUS"])).unwrap();

        assert_eq!(registry.options().len(), 3);
        assert_eq!(registry.lookup_by_alias("--b").unwrap().name(), "b");
        assert_eq!(registry.lookup_by_alias("PLUS").unwrap().name(), "c");
        assert_eq!(registry.option_by_name("a").unwrap().aliases(), &["-a"]);
        assert!(registry.exists("-b"));
        assert!(!registry.exists("b"));
    }

    #[rstest]
    #[case(integer("a", &["-x"]), "a")]
    #[case(integer("x", &["-a"]), "-a")]
    #[case(integer("x", &["-y", "--b"]), "--b")]
    fn register_duplicate(#[case] option: OptionDefinition, #[case] identity: &str) {
        let mut registry = Registry::new();
        registry.register(integer("a", &["-a"])).unwrap();
        registry.register(integer("b", &["-b", "--b"])).unwrap();

        let error = registry.register(option).unwrap_err();

        assert_eq!(error, ConfigError::DuplicateIdentity(identity.to_string()));
        assert_eq!(registry.options().len(), 2);
        assert!(!registry.exists("-x"));
        assert!(!registry.exists("-y"));
    }

    #[rstest]
    #[case("+a", "+")]
    #[case("/a", "/")]
    #[case("---a", "---")]
    fn register_invalid_prefix(#[case] alias: &str, #[case] prefix: &str) {
        let mut registry = Registry::new();

        let error = registry.register(integer("a", &["-a", alias])).unwrap_err();

        assert_eq!(
            error,
            ConfigError::InvalidPrefix {
                alias: alias.to_string(),
                prefix: prefix.to_string(),
            }
        );
        assert!(registry.options().is_empty());
        assert!(!registry.exists("-a"));
    }

    #[test]
    fn register_added_prefix() {
        let mut registry = Registry::new();
        registry.add_prefix("+").unwrap();
        registry.add_prefix("/").unwrap();

        registry.register(integer("a", &["+a", "/a"])).unwrap();

        assert_eq!(registry.lookup_by_alias("/a").unwrap().name(), "a");
    }

    #[rstest]
    #[case("")]
    #[case("-a b")]
    fn register_invalid_alias(#[case] alias: &str) {
        let mut registry = Registry::new();

        let error = registry.register(integer("a", &[alias])).unwrap_err();

        assert_eq!(error, ConfigError::InvalidAlias(alias.to_string()));
    }

    #[test]
    fn register_missing_alias() {
        let mut registry = Registry::new();

        let error = registry.register(integer("check", &[])).unwrap_err();

        assert_eq!(error, ConfigError::MissingAlias("check".to_string()));
    }

    #[rstest]
    #[case("+")]
    #[case("++")]
    #[case("-/")]
    #[case("")]
    fn add_prefix(#[case] prefix: &str) {
        let mut registry = Registry::new();
        registry.add_prefix(prefix).unwrap();
        assert!(registry.prefixes().any(|p| p == prefix));
    }

    #[rstest]
    #[case("+++", ConfigError::PrefixTooLong("+++".to_string()))]
    #[case("a", ConfigError::PrefixNotSymbolic("a".to_string()))]
    #[case("-1", ConfigError::PrefixNotSymbolic("-1".to_string()))]
    #[case("[", ConfigError::PrefixForbiddenChar { prefix: "[".to_string(), symbol: '[' })]
    #[case("-}", ConfigError::PrefixForbiddenChar { prefix: "-}".to_string(), symbol: '}' })]
    #[case("\"", ConfigError::PrefixForbiddenChar { prefix: "\"".to_string(), symbol: '"' })]
    #[case("'", ConfigError::PrefixForbiddenChar { prefix: "'".to_string(), symbol: '\'' })]
    #[case("(", ConfigError::PrefixForbiddenChar { prefix: "(".to_string(), symbol: '(' })]
    #[case("- ", ConfigError::PrefixForbiddenChar { prefix: "- ".to_string(), symbol: ' ' })]
    fn add_prefix_invalid(#[case] prefix: &str, #[case] expected: ConfigError) {
        let mut registry = Registry::new();

        let error = registry.add_prefix(prefix).unwrap_err();

        assert_eq!(error, expected);
        assert_eq!(registry.prefixes().count(), 3);
    }

    #[test]
    fn add_prefix_too_long() {
        let symbols = ['-', '+', '/', '~', '!', '@', '#', '[', 'a', '1'];

        for _ in 0..100 {
            let length = thread_rng().gen_range(3..10);
            let prefix: String = (0..length)
                .map(|_| symbols[thread_rng().gen_range(0..symbols.len())])
                .collect();

            assert_matches!(
                Registry::new().add_prefix(prefix),
                Err(ConfigError::PrefixTooLong(_))
            );
        }
    }

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("-z")]
    fn lookup_by_alias_absent(#[case] token: &str) {
        let mut registry = Registry::new();
        registry.register(integer("a", &["-a"])).unwrap();

        assert_eq!(registry.lookup_by_alias(token), None);
    }

    #[test]
    fn clear() {
        let mut registry = Registry::new();
        registry.add_prefix("+").unwrap();
        registry.add_coercer(DeclaredType::integer(), |_| Ok(Value::Integer(1)));
        registry.register(integer("a", &["+a"])).unwrap();

        registry.clear();

        assert!(registry.options().is_empty());
        assert!(!registry.exists("+a"));
        assert!(registry.prefixes().any(|p| p == "+"));
        assert!(registry.coercer(&DeclaredType::integer()).is_some());
        registry.register(integer("a", &["+a"])).unwrap();
    }
}
