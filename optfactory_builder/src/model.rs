use std::any::TypeId;

use serde::de::DeserializeOwned;

use crate::prelude::OptionEnum;

/// The primitive kinds an option value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `true` or `false`.
    Bool,
    /// A signed 64 bit integer.
    Integer,
    /// A 64 bit floating point number.
    Float,
    /// Precisely one character.
    Char,
    /// Free text; may span multiple tokens.
    String,
}

impl ScalarKind {
    fn label(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
        }
    }
}

/// An enumeration: a closed set of variant texts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumKind {
    name: String,
    variants: Vec<String>,
}

impl EnumKind {
    /// Create an enumeration from its name and variant texts.
    pub fn new(name: impl Into<String>, variants: Vec<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Create the enumeration described by an [`OptionEnum`].
    pub fn of<E: OptionEnum>() -> Self {
        Self::new(E::NAME, E::VARIANTS.to_vec())
    }

    /// The name of the enumeration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant texts, in declaration order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub(crate) fn contains(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}

/// A structured type decoded from a bracketed/quoted literal, such as `Vec<String>`.
///
/// Identity (equality & hashing) is the Rust type; the type name is only for display.
#[derive(Clone, Copy)]
pub struct CompositeKind {
    type_id: TypeId,
    type_name: &'static str,
    check: fn(&serde_json::Value) -> Result<(), serde_json::Error>,
}

impl CompositeKind {
    /// Create the composite kind for the type `T`.
    pub fn of<T: DeserializeOwned + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            check: check_as::<T>,
        }
    }

    /// The Rust type name of the composite.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn check(&self, value: &serde_json::Value) -> Result<(), serde_json::Error> {
        (self.check)(value)
    }
}

fn check_as<T: DeserializeOwned>(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    T::deserialize(value).map(|_| ())
}

impl std::fmt::Debug for CompositeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeKind")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl PartialEq for CompositeKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CompositeKind {}

impl std::hash::Hash for CompositeKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

/// The declared value type of an option.
///
/// Each kind has its own grouping rule (how many tokens form the value) and coercion rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// A primitive value.
    Scalar(ScalarKind),
    /// An enumeration, where the alias token itself is the value.
    Enumeration(EnumKind),
    /// A structured value, written as a bracketed or quoted literal.
    Composite(CompositeKind),
}

impl DeclaredType {
    /// A `bool` scalar.
    pub fn bool() -> Self {
        DeclaredType::Scalar(ScalarKind::Bool)
    }

    /// An `i64` scalar.
    pub fn integer() -> Self {
        DeclaredType::Scalar(ScalarKind::Integer)
    }

    /// An `f64` scalar.
    pub fn float() -> Self {
        DeclaredType::Scalar(ScalarKind::Float)
    }

    /// A `char` scalar.
    pub fn char() -> Self {
        DeclaredType::Scalar(ScalarKind::Char)
    }

    /// A `String` scalar.
    pub fn string() -> Self {
        DeclaredType::Scalar(ScalarKind::String)
    }

    /// The enumeration described by `E`.
    pub fn enumeration<E: OptionEnum>() -> Self {
        DeclaredType::Enumeration(EnumKind::of::<E>())
    }

    /// The composite decoding into `T`.
    pub fn composite<T: DeserializeOwned + 'static>() -> Self {
        DeclaredType::Composite(CompositeKind::of::<T>())
    }

    pub(crate) fn is_enumeration(&self) -> bool {
        matches!(self, DeclaredType::Enumeration(_))
    }

    /// The placeholder shown for this type's value in help messages (ex: `INTEGER`).
    pub(crate) fn grammar(&self) -> String {
        match self {
            DeclaredType::Scalar(kind) => kind.label().to_ascii_uppercase(),
            DeclaredType::Enumeration(_) => String::default(),
            DeclaredType::Composite(_) => "[..]".to_string(),
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Scalar(kind) => write!(f, "{}", kind.label()),
            DeclaredType::Enumeration(kind) => write!(f, "{}", kind.name()),
            DeclaredType::Composite(kind) => write!(f, "{}", kind.type_name()),
        }
    }
}

/// A coerced option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A `bool` value.
    Bool(bool),
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A single character.
    Char(char),
    /// Text.
    String(String),
    /// The text of an enumeration variant.
    Variant(String),
    /// A decoded structured value.
    Composite(serde_json::Value),
}

impl Value {
    /// Project this value into json, so that it may be deserialized into any compatible Rust type.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::String(s) | Value::Variant(s) => serde_json::Value::String(s.clone()),
            Value::Composite(value) => value.clone(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) | Value::Variant(s) => write!(f, "{s}"),
            Value::Composite(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn composite_identity() {
        let a = CompositeKind::of::<Vec<String>>();
        let b = CompositeKind::of::<Vec<String>>();
        let c = CompositeKind::of::<Vec<u32>>();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set = HashSet::from([
            DeclaredType::Composite(a),
            DeclaredType::Composite(b),
            DeclaredType::Composite(c),
        ]);
        assert_eq!(set.len(), 2);
    }

    mod left {
        #[derive(serde::Deserialize)]
        pub struct Pair(pub i32, pub i32);
    }

    mod right {
        #[derive(serde::Deserialize)]
        pub struct Pair(pub i32, pub i32);
    }

    #[test]
    fn composite_identity_by_type() {
        let left = CompositeKind::of::<left::Pair>();
        let right = CompositeKind::of::<right::Pair>();

        assert_ne!(left, right);
        assert_eq!(left, CompositeKind::of::<left::Pair>());
        assert!(left.type_name().ends_with("Pair"));
        assert!(right.type_name().ends_with("Pair"));

        let set = HashSet::from([DeclaredType::Composite(left), DeclaredType::Composite(right)]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn composite_check() {
        let kind = CompositeKind::of::<Vec<String>>();
        kind.check(&serde_json::json!(["a", "b"])).unwrap();
        kind.check(&serde_json::json!([1, 2])).unwrap_err();
        kind.check(&serde_json::json!({"a": 1})).unwrap_err();
    }

    #[test]
    fn enum_kind() {
        let kind = EnumKind::new("operation", vec!["PLUS", "MINUS"]);
        assert_eq!(kind.name(), "operation");
        assert_eq!(kind.variants(), &["PLUS".to_string(), "MINUS".to_string()]);
        assert!(kind.contains("PLUS"));
        assert!(!kind.contains("plus"));
    }

    #[rstest]
    #[case(DeclaredType::bool(), "BOOL")]
    #[case(DeclaredType::integer(), "INTEGER")]
    #[case(DeclaredType::string(), "STRING")]
    #[case(DeclaredType::Enumeration(EnumKind::new("e", vec!["A"])), "")]
    #[case(DeclaredType::composite::<Vec<u32>>(), "[..]")]
    fn declared_type_grammar(#[case] declared_type: DeclaredType, #[case] expected: &str) {
        assert_eq!(declared_type.grammar(), expected);
    }

    #[rstest]
    #[case(Value::Bool(true), serde_json::json!(true), "true")]
    #[case(Value::Integer(-3), serde_json::json!(-3), "-3")]
    #[case(Value::Float(1.5), serde_json::json!(1.5), "1.5")]
    #[case(Value::Char('x'), serde_json::json!("x"), "x")]
    #[case(Value::String("abc".to_string()), serde_json::json!("abc"), "abc")]
    #[case(Value::Variant("PLUS".to_string()), serde_json::json!("PLUS"), "PLUS")]
    #[case(Value::Composite(serde_json::json!(["a"])), serde_json::json!(["a"]), "[\"a\"]")]
    fn value_projection(
        #[case] value: Value,
        #[case] json: serde_json::Value,
        #[case] display: &str,
    ) {
        assert_eq!(value.to_json(), json);
        assert_eq!(value.to_string(), display);
    }
}
