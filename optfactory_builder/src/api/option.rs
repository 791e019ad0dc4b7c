use crate::model::{DeclaredType, Value};

/// The immutable description of one option.
///
/// Built via [`OptionDefinition::builder`], and registered into a [`Registry`](crate::Registry).
/// The values matched during parsing never live here; see [`ParseResult`](crate::ParseResult).
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    name: String,
    aliases: Vec<String>,
    declared_type: DeclaredType,
    default_value: Option<Value>,
    mandatory: bool,
    unique: bool,
    bounds: Option<(f64, f64)>,
    description: Option<String>,
    help_text: String,
}

impl OptionDefinition {
    /// Start building an option with the given name and declared type.
    ///
    /// ### Example
    /// ```
    /// # use optfactory_builder as optfactory;
    /// use optfactory::{DeclaredType, OptionDefinition};
    ///
    /// let option = OptionDefinition::builder("b", DeclaredType::integer())
    ///     .aliases(["-b", "--b"])
    ///     .help("integer value")
    ///     .build();
    ///
    /// assert_eq!(option.help_text(), "-b, --b: integer value");
    /// assert!(option.is_unique());
    /// assert!(!option.is_mandatory());
    /// ```
    pub fn builder(name: impl Into<String>, declared_type: DeclaredType) -> OptionBuilder {
        OptionBuilder {
            name: name.into(),
            aliases: Vec::default(),
            declared_type,
            default_value: None,
            mandatory: false,
            unique: true,
            bounds: None,
            description: None,
        }
    }

    /// The unique name of the option.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The aliases which select this option, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The declared value type.
    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    /// The value recorded when the option is given without a value.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Whether the option must appear in every successful parse.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Whether the option may be matched at most once per parse.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// The inclusive `(min, max)` range for numeric values, if any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.bounds
    }

    /// The description, as given to the builder.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The display help: the joined aliases, followed by the description.
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// Whether `alias` is one of this option's aliases.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }
}

/// Builder for an [`OptionDefinition`].
#[derive(Debug)]
pub struct OptionBuilder {
    name: String,
    aliases: Vec<String>,
    declared_type: DeclaredType,
    default_value: Option<Value>,
    mandatory: bool,
    unique: bool,
    bounds: Option<(f64, f64)>,
    description: Option<String>,
}

impl OptionBuilder {
    /// Add an alias.
    /// Repeated aliases are ignored.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();

        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }

        self
    }

    /// Add several aliases.
    pub fn aliases(self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        aliases.into_iter().fold(self, |builder, alias| builder.alias(alias))
    }

    /// Document the value to record when the option appears without a value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value.replace(value);
        self
    }

    /// Require (or not) the option in every parse.
    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Allow (or not) the option to be matched more than once.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Restrict integer/float values to the inclusive range `[min, max]`.
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds.replace((min, max));
        self
    }

    /// Document the help message for this option.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Finalize the option.
    pub fn build(self) -> OptionDefinition {
        let OptionBuilder {
            name,
            aliases,
            declared_type,
            default_value,
            mandatory,
            unique,
            bounds,
            description,
        } = self;
        let joined = aliases.join(", ");
        let help_text = match &description {
            Some(description) => format!("{joined}: {description}"),
            None => joined,
        };

        OptionDefinition {
            name,
            aliases,
            declared_type,
            default_value,
            mandatory,
            unique,
            bounds,
            description,
            help_text,
        }
    }
}
