//! `optfactory` is a registry driven, type coercing command line option parser for Rust.
//!
//! An `optfactory` Cli is a flat set of *options*.
//! Each option has a unique name, one or more *aliases* by which it is written on the Cli, and a declared value type.
//! The parser splits the input line on whitespace, matches each alias to its option, groups the value tokens which follow it, and coerces them into the declared type.
//! Specifically, `optfactory` concerns itself with the following:
//! * *Aliases, not positions*:
//! Every value on the Cli is introduced by an alias (ex: `-a 50`).
//! There are no positional arguments.
//! * *Declared types*:
//! Values are converted by the declared type of the option (`bool`, integer, float, `char`, string, an enumeration, or a composite such as a list).
//! The user should not call any `&str -> T` conversion functions directly.
//! * *Enumerations as aliases*:
//! The variants of an enumeration option double as its aliases, so `PLUS` selects the `PLUS` variant on its own.
//! * *Detailed yet basic UX*:
//! The help and error output points at the offending token.
//!
//! # Usage
//! This page includes a few demos on using `optfactory`.
//!
//! via the [`ConsoleFactory`]:
//! ```no_run
#![doc = include_str!("../demos/demo_calculator.rs")]
//! ```
//!
//! ```console
//! $ calculator -h
//! usage: calculator [-h] -a INTEGER -b INTEGER [PLUS|MINUS|-op] [-v [BOOL]]
//!
//! options:
//!  -h, --h            Show this help message and exit.
//!  -a INTEGER         The left operand. (required)
//!  -b, --b INTEGER    The right operand. (required)
//!  PLUS, MINUS, -op   {PLUS, MINUS} The operation to apply. [default: PLUS]
//!  -v [BOOL]          Show the operands. [default: true]
//!
//! $ calculator -a 50 --b 100 MINUS -v
//! 50 MINUS 100 = -50
//!
//! $ calculator -a 50 -b x
//! Parse error: Invalid value for option 'b': 'x' cannot convert to integer.
//! -a 50 -b x
//!          ^
//! ```
//!
//! or directly via [`parse`] over a [`Registry`]:
//! ```no_run
#![doc = include_str!("../demos/demo_parse.rs")]
//! ```
//!
//! # Options
//! Configure an option via [`OptionDefinition::builder`]:
//! * `alias`/`aliases`: the Cli spellings of the option.
//! Each alias must start with a registered prefix (by default `""`, `"-"`, or `"--"`; see [`Registry::add_prefix`]).
//! * `default_value`: the value used when the alias is given without a value (ex: a trailing `-v`).
//! * `mandatory`: the option must appear in every parse.
//! * `unique`: the option may appear at most once (the default); otherwise each appearance is recorded.
//! * `bounds`: the inclusive numeric range for integer & float options.
//! * `help`: the description shown in the help message.
//!
//! ### Value grouping
//! ```console
//! Declared type              | Value tokens                                 | Example
//! ------------------------------------------------------------------------------------------------
//! bool, integer, float, char | precisely 1                                  | -a 50
//! string                     | up to the next alias, joined without spaces  | -s hello world
//! enumeration                | none; the alias is the variant               | PLUS
//! composite                  | from an opening [ { " ( to its closing mark  | -l ["a", "b"]
//! ```
//!
//! Composite values decode as json via `serde`; a parenthesized value (ex: `(1, 2)`) decodes as a tuple.
//! Read values back out with [`ParseResult::value`], which deserializes into any compatible type.
//!
//! # Derive Api
//! Use [`derive::OptionEnum`] to describe an enumeration option from a Rust `enum`.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events from the registry and parser.
pub mod derive;
pub use optfactory_builder::*;
