use thiserror::Error;

use crate::api::{OptionDefinition, Registry};
use crate::model::{CompositeKind, DeclaredType, EnumKind, ScalarKind, Value};

/// An error converting value text into the declared type of an option.
#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    /// The text does not parse as the scalar type.
    #[error("'{token}' cannot convert to {type_name}.")]
    MalformedScalar {
        /// The value text.
        token: String,
        /// The scalar type.
        type_name: String,
    },

    /// The text is not one of the enumeration's variants.
    #[error("'{token}' is not a variant of {enumeration} (expected one of {}).", .variants.join(", "))]
    UnknownEnumVariant {
        /// The value text.
        token: String,
        /// The enumeration name.
        enumeration: String,
        /// The declared variants.
        variants: Vec<String>,
    },

    /// The text does not decode as the composite type.
    #[error("'{token}' cannot decode as {type_name}: {message}.")]
    MalformedComposite {
        /// The value text.
        token: String,
        /// The composite type.
        type_name: String,
        /// The decoding failure.
        message: String,
    },

    /// The numeric value lies outside the option's bounds.
    #[error("'{token}' is out of bounds [{min}, {max}].")]
    OutOfBounds {
        /// The value text.
        token: String,
        /// The inclusive lower bound.
        min: f64,
        /// The inclusive upper bound.
        max: f64,
    },

    /// A custom coercer refused the text.
    #[error("'{token}' was rejected: {message}.")]
    Rejected {
        /// The value text.
        token: String,
        /// The coercer's message.
        message: String,
    },
}

/// Convert the raw value text into a value of the option's declared type.
///
/// A custom coercer registered for the declared type is used exclusively.
pub(crate) fn coerce(
    token: &str,
    option: &OptionDefinition,
    registry: &Registry,
) -> Result<Value, CoercionError> {
    if let Some(coercer) = registry.coercer(option.declared_type()) {
        return coercer(token).map_err(|message| CoercionError::Rejected {
            token: token.to_string(),
            message,
        });
    }

    match option.declared_type() {
        DeclaredType::Scalar(kind) => {
            let value = coerce_scalar(token, *kind)?;
            check_bounds(token, &value, option.bounds())?;
            Ok(value)
        }
        DeclaredType::Enumeration(kind) => coerce_variant(token, kind),
        DeclaredType::Composite(kind) => coerce_composite(token, kind),
    }
}

fn coerce_scalar(token: &str, kind: ScalarKind) -> Result<Value, CoercionError> {
    let malformed = || CoercionError::MalformedScalar {
        token: token.to_string(),
        type_name: DeclaredType::Scalar(kind).to_string(),
    };

    match kind {
        ScalarKind::Bool => token.parse().map(Value::Bool).map_err(|_| malformed()),
        ScalarKind::Integer => token.parse().map(Value::Integer).map_err(|_| malformed()),
        ScalarKind::Float => token.parse().map(Value::Float).map_err(|_| malformed()),
        ScalarKind::Char => {
            let mut chars = token.chars();

            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(malformed()),
            }
        }
        ScalarKind::String => Ok(Value::String(token.to_string())),
    }
}

fn check_bounds(
    token: &str,
    value: &Value,
    bounds: Option<(f64, f64)>,
) -> Result<(), CoercionError> {
    let number = match value {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        _ => return Ok(()),
    };

    match bounds {
        Some((min, max)) if !(min..=max).contains(&number) => Err(CoercionError::OutOfBounds {
            token: token.to_string(),
            min,
            max,
        }),
        _ => Ok(()),
    }
}

fn coerce_variant(token: &str, kind: &EnumKind) -> Result<Value, CoercionError> {
    if kind.contains(token) {
        Ok(Value::Variant(token.to_string()))
    } else {
        Err(CoercionError::UnknownEnumVariant {
            token: token.to_string(),
            enumeration: kind.name().to_string(),
            variants: kind.variants().to_vec(),
        })
    }
}

fn coerce_composite(token: &str, kind: &CompositeKind) -> Result<Value, CoercionError> {
    let malformed = |error: serde_json::Error| CoercionError::MalformedComposite {
        token: token.to_string(),
        type_name: kind.type_name().to_string(),
        message: error.to_string(),
    };
    // A parenthesized literal is a tuple; json spells those as arrays.
    let value: serde_json::Value = match token
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => serde_json::from_str(&format!("[{inner}]")),
        None => serde_json::from_str(token),
    }
    .map_err(malformed)?;
    kind.check(&value).map_err(malformed)?;
    Ok(Value::Composite(value))
}
