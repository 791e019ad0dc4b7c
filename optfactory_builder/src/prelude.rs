//! Traits which, typically, may be imported without concern: `use optfactory::prelude::*`.

/// Behaviour for an `enum` whose unit variants make up an enumeration declared type.
///
/// Usually implemented via `#[derive(OptionEnum)]`.
/// The variant text doubles as the alias which selects it on the Cli.
pub trait OptionEnum: Sized {
    /// The name of the enumeration, used in messages.
    const NAME: &'static str;

    /// The variant texts, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Find the variant for the text, matched case-sensitively.
    fn from_variant(variant: &str) -> Option<Self>;

    /// The text of this variant.
    fn variant(&self) -> &'static str;
}
