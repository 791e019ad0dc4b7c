mod core;
mod tokens;

pub use self::core::{parse, ParseError};
