use std::collections::VecDeque;
use thiserror::Error;

use crate::api::{OptionDefinition, ParseResult, Registry};
use crate::constant::MARKERS;
use crate::matcher::tokens::{tokenize, Token};
use crate::model::{DeclaredType, ScalarKind, Value};
use crate::parser::{coerce, validate, CoercionError, ValidationError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error parsing the input against the registry.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The input is empty, or its first token is not an option alias.
    #[error("The input must start with an option alias, but found '{token}'.")]
    MustStartWithOption {
        /// The first token (empty for an empty input).
        token: String,
    },

    /// A token in option position is not an alias.
    #[error("Not an option: '{token}'.")]
    UnknownToken {
        /// The token.
        token: String,
        /// The byte offset of the token.
        offset: usize,
    },

    /// The option was given without a value, and has no default.
    #[error("Value is not provided for the option '{alias}'.")]
    MissingValue {
        /// The alias used.
        alias: String,
        /// The byte offset of the alias.
        offset: usize,
    },

    /// A composite value does not start with an opening marker.
    #[error("A value for option '{name}' must start with one of [, {{, \", ( (found '{token}').")]
    ExpectedBracketedValue {
        /// The option name.
        name: String,
        /// The first value token.
        token: String,
        /// The byte offset of the value token.
        offset: usize,
    },

    /// A unique option was matched a second time.
    #[error("Option '{name}' must be unique.")]
    DuplicateUniqueOption {
        /// The option name.
        name: String,
        /// The byte offset of the second alias.
        offset: usize,
    },

    /// Mandatory options (by name) which were not matched.
    #[error("Not all of the mandatory options were provided: {}.", .0.join(", "))]
    MissingMandatoryOptions(Vec<String>),

    /// The value text does not convert into the option's declared type.
    #[error("Invalid value for option '{name}': {source}")]
    Coercion {
        /// The option name.
        name: String,
        /// The byte offset of the value.
        offset: usize,
        /// The conversion failure.
        source: CoercionError,
    },
}

impl ParseError {
    /// The byte offset into the input where the error was found, if it relates to a position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::MustStartWithOption { .. } => Some(0),
            ParseError::UnknownToken { offset, .. }
            | ParseError::MissingValue { offset, .. }
            | ParseError::ExpectedBracketedValue { offset, .. }
            | ParseError::DuplicateUniqueOption { offset, .. }
            | ParseError::Coercion { offset, .. } => Some(*offset),
            ParseError::MissingMandatoryOptions(_) => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::MissingMandatoryOptions(names) => {
                ParseError::MissingMandatoryOptions(names)
            }
        }
    }
}

/// Parse the input into the options (and values) of the registry.
///
/// The input is split on whitespace, and must start with an option alias.
/// Each alias is followed by its value, unless it is an enumeration alias (the alias is the value),
/// or unless the option has a default.
/// The whole input is consumed; the first error stops the parse.
///
/// ### Example
/// ```
/// # use optfactory_builder as optfactory;
/// use optfactory::{parse, DeclaredType, OptionDefinition, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry
///     .register(OptionDefinition::builder("a", DeclaredType::integer()).alias("-a").build())
///     .unwrap();
/// registry
///     .register(
///         OptionDefinition::builder("verbose", DeclaredType::bool())
///             .alias("-v")
///             .default_value(Value::Bool(true))
///             .build(),
///     )
///     .unwrap();
///
/// let result = parse("-a 50 -v", &registry).unwrap();
///
/// assert_eq!(result.get("a"), Some(&Value::Integer(50)));
/// assert_eq!(result.get("verbose"), Some(&Value::Bool(true)));
/// ```
pub fn parse<'r>(input: &str, registry: &'r Registry) -> Result<ParseResult<'r>, ParseError> {
    let result = TokenMatcher::new(input, registry)?.run()?;
    validate(&result, registry)?;
    Ok(result)
}

/// How many tokens make up the value of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// No tokens; the alias is the value.
    Selector,
    /// Precisely one token.
    Single,
    /// Tokens up to the next alias.
    Words,
    /// Tokens from an opening marker up to its closing marker.
    Bracketed,
}

impl From<&DeclaredType> for Grouping {
    fn from(value: &DeclaredType) -> Self {
        match value {
            DeclaredType::Enumeration(_) => Grouping::Selector,
            DeclaredType::Scalar(ScalarKind::String) => Grouping::Words,
            DeclaredType::Scalar(_) => Grouping::Single,
            DeclaredType::Composite(_) => Grouping::Bracketed,
        }
    }
}

#[derive(Debug)]
enum State<'r, 'i> {
    ExpectOption,
    ConsumeValue {
        option: &'r OptionDefinition,
        // The alias token, or for a selector alias, the variant token.
        token: Token<'i>,
    },
}

struct TokenMatcher<'r, 'i> {
    registry: &'r Registry,
    tokens: VecDeque<Token<'i>>,
    result: ParseResult<'r>,
}

impl<'r, 'i> TokenMatcher<'r, 'i> {
    fn new(input: &'i str, registry: &'r Registry) -> Result<Self, ParseError> {
        let tokens = tokenize(input);

        match tokens.front() {
            Some(token) if registry.exists(token.text) => Ok(Self {
                registry,
                tokens,
                result: ParseResult::default(),
            }),
            Some(token) => Err(ParseError::MustStartWithOption {
                token: token.text.to_string(),
            }),
            None => Err(ParseError::MustStartWithOption {
                token: String::default(),
            }),
        }
    }

    fn run(mut self) -> Result<ParseResult<'r>, ParseError> {
        let mut state = State::ExpectOption;

        loop {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("State {state:?}, {} tokens remaining.", self.tokens.len());
            }

            state = match state {
                State::ExpectOption => match self.tokens.pop_front() {
                    Some(token) => self.expect_option(token)?,
                    None => break,
                },
                State::ConsumeValue { option, token } => self.consume_value(option, token)?,
            };
        }

        Ok(self.result)
    }

    fn expect_option(&mut self, token: Token<'i>) -> Result<State<'r, 'i>, ParseError> {
        let option =
            self.registry
                .lookup_by_alias(token.text)
                .ok_or_else(|| ParseError::UnknownToken {
                    token: token.text.to_string(),
                    offset: token.offset,
                })?;

        match option.declared_type() {
            DeclaredType::Enumeration(kind) if kind.contains(token.text) => {
                Ok(State::ConsumeValue { option, token })
            }
            DeclaredType::Enumeration(_) => self.expect_variant(option, token),
            _ => {
                if self.next_is_option_or_end() {
                    self.record_default(option, token)?;
                    Ok(State::ExpectOption)
                } else {
                    Ok(State::ConsumeValue { option, token })
                }
            }
        }
    }

    /// The enumeration option was selected by an alias which is not a variant (ex: `-op`).
    fn expect_variant(
        &mut self,
        option: &'r OptionDefinition,
        token: Token<'i>,
    ) -> Result<State<'r, 'i>, ParseError> {
        let next_option = self
            .tokens
            .front()
            .map(|next| self.registry.lookup_by_alias(next.text));

        match next_option {
            // The next alias carries the variant (ex: `-op PLUS`).
            Some(Some(next)) if next.name() == option.name() => Ok(State::ExpectOption),
            Some(None) => {
                let variant = self.next_value(token)?;
                Ok(State::ConsumeValue {
                    option,
                    token: variant,
                })
            }
            _ => {
                self.record_default(option, token)?;
                Ok(State::ExpectOption)
            }
        }
    }

    fn consume_value(
        &mut self,
        option: &'r OptionDefinition,
        token: Token<'i>,
    ) -> Result<State<'r, 'i>, ParseError> {
        let (offset, raw) = match Grouping::from(option.declared_type()) {
            Grouping::Selector => (token.offset, token.text.to_string()),
            Grouping::Single => {
                let value = self.next_value(token)?;
                (value.offset, value.text.to_string())
            }
            Grouping::Words => {
                let first = self.next_value(token)?;
                let mut raw = first.text.to_string();

                while !self.next_is_option_or_end() {
                    if let Some(next) = self.tokens.pop_front() {
                        raw.push_str(next.text);
                    }
                }

                (first.offset, raw)
            }
            Grouping::Bracketed => self.group_bracketed(option, token)?,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Grouped '{raw}' for option '{}'.", option.name());
        }

        let value = coerce(&raw, option, self.registry).map_err(|source| ParseError::Coercion {
            name: option.name().to_string(),
            offset,
            source,
        })?;
        self.insert(option, value, token.offset)?;
        Ok(State::ExpectOption)
    }

    fn group_bracketed(
        &mut self,
        option: &OptionDefinition,
        token: Token<'i>,
    ) -> Result<(usize, String), ParseError> {
        let first = self.next_value(token)?;
        let (open, close) = MARKERS
            .iter()
            .copied()
            .find(|(open, _)| first.text.starts_with(*open))
            .ok_or_else(|| ParseError::ExpectedBracketedValue {
                name: option.name().to_string(),
                token: first.text.to_string(),
                offset: first.offset,
            })?;
        let mut raw = first.text.to_string();

        while !is_closed(&raw, open, close) {
            match self.tokens.pop_front() {
                Some(next) => raw.push_str(next.text),
                // Left to the coercion to reject.
                None => break,
            }
        }

        Ok((first.offset, raw))
    }

    fn next_value(&mut self, token: Token<'i>) -> Result<Token<'i>, ParseError> {
        self.tokens
            .pop_front()
            .ok_or_else(|| ParseError::MissingValue {
                alias: token.text.to_string(),
                offset: token.offset,
            })
    }

    fn next_is_option_or_end(&self) -> bool {
        match self.tokens.front() {
            Some(next) => self.registry.exists(next.text),
            None => true,
        }
    }

    fn record_default(
        &mut self,
        option: &'r OptionDefinition,
        token: Token<'i>,
    ) -> Result<(), ParseError> {
        match option.default_value() {
            Some(value) => self.insert(option, value.clone(), token.offset),
            None => Err(ParseError::MissingValue {
                alias: token.text.to_string(),
                offset: token.offset,
            }),
        }
    }

    fn insert(
        &mut self,
        option: &'r OptionDefinition,
        value: Value,
        offset: usize,
    ) -> Result<(), ParseError> {
        if option.is_unique() && self.result.contains(option.name()) {
            return Err(ParseError::DuplicateUniqueOption {
                name: option.name().to_string(),
                offset,
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched option '{}' with value '{value}'.", option.name());
        }

        self.result.push(option, value);
        Ok(())
    }
}

/// Whether the grouped text ends with the closing marker, with every opening marker closed.
/// Markers inside a quoted string (honouring `\` escapes) are not counted.
fn is_closed(raw: &str, open: char, close: char) -> bool {
    if raw.chars().count() < 2 || !raw.ends_with(close) {
        return false;
    }

    let mut depth: i64 = 0;
    let mut quoted = false;
    let mut escaped = false;

    for c in raw.chars() {
        if quoted {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                quoted = false;
            }
        } else if c == '"' {
            quoted = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
        }
    }

    !quoted && depth <= 0
}
