mod factory;
mod option;
mod registry;
mod result;

pub use factory::ConsoleFactory;
pub use option::{OptionBuilder, OptionDefinition};
pub use registry::{Coercer, ConfigError, Registry};
pub use result::{LookupError, ParseResult};
