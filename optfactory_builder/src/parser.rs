mod coerce;
mod interface;
mod printer;
mod validate;

pub(crate) use coerce::coerce;
pub use coerce::CoercionError;
pub(crate) use interface::{ConsoleInterface, UserInterface};
pub(crate) use printer::{ErrorContext, Printer};
pub use validate::{validate, ValidationError};

#[cfg(test)]
pub(crate) use interface::util;
