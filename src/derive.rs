//! Derive Api for `optfactory` enumerations.
//!
//! ### Getting Started
//! Instrument an `enum` of unit variants with `#[derive(OptionEnum)]`.
//! This implements [`OptionEnum`](crate::prelude::OptionEnum), which describes the enumeration to `optfactory`:
//! * `NAME`: the name of the `enum`.
//! * `VARIANTS`: the text of each variant, in declaration order.
//! By default, the text is the variant name; override it with `#[optfactory(rename = "..")]`.
//!
//! Declare an enumeration option with [`DeclaredType::enumeration`](crate::DeclaredType::enumeration), and read it back with [`ParseResult::variant`](crate::ParseResult::variant).
//! Since the variant texts select the option on the Cli, they are also used as its aliases.
//!
//! ```
//! use optfactory::derive::OptionEnum;
//! use optfactory::prelude::*;
//! use optfactory::{parse, DeclaredType, OptionDefinition, Registry};
//!
//! #[derive(Debug, PartialEq, OptionEnum)]
//! enum Operation {
//!     #[optfactory(rename = "PLUS")]
//!     Plus,
//!     #[optfactory(rename = "MINUS")]
//!     Minus,
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         OptionDefinition::builder("operation", DeclaredType::enumeration::<Operation>())
//!             .aliases(Operation::VARIANTS.iter().copied())
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let result = parse("MINUS", &registry).unwrap();
//! assert_eq!(result.variant::<Operation>("operation").unwrap(), Operation::Minus);
//! ```
//!
//! The derive only applies to `enum`s whose variants are all unit variants; anything else is a compile error.
pub use optfactory_derive::OptionEnum;
