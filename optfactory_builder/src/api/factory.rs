use std::env;

use crate::api::{ConfigError, OptionDefinition, ParseResult, Registry};
use crate::constant::*;
use crate::matcher::parse;
use crate::model::{DeclaredType, Value};
use crate::parser::{ConsoleInterface, ErrorContext, Printer, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Consumer<'c> = Box<dyn FnMut(&ParseResult<'_>) + 'c>;

/// The console front end: a registry (with a built-in help option), a help printer, and a consumer for successful parses.
///
/// ### Example
/// ```
/// # use optfactory_builder as optfactory;
/// use optfactory::{ConsoleFactory, DeclaredType, OptionDefinition};
///
/// let mut sum: i64 = 0;
/// let mut factory = ConsoleFactory::new("program")
///     .option(OptionDefinition::builder("a", DeclaredType::integer()).alias("-a").build())
///     .option(OptionDefinition::builder("b", DeclaredType::integer()).aliases(["-b", "--b"]).build())
///     .consumer(|result| {
///         sum = result.value::<i64>("a").unwrap() + result.value::<i64>("b").unwrap();
///     });
///
/// factory.run("-a 50 --b 100").unwrap();
/// drop(factory);
///
/// assert_eq!(sum, 150);
/// ```
pub struct ConsoleFactory<'c> {
    program: String,
    registry: Registry,
    consumer: Option<Consumer<'c>>,
    deferred_error: Option<ConfigError>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'c> ConsoleFactory<'c> {
    /// Create a console factory, with the help option (`-h`, `--h`) registered.
    pub fn new(program: impl Into<String>) -> Self {
        let mut registry = Registry::new();
        let help = OptionDefinition::builder(HELP_NAME, DeclaredType::bool())
            .aliases(HELP_ALIASES)
            .default_value(Value::Bool(true))
            .help(HELP_MESSAGE)
            .build();

        if let Err(error) = registry.register(help) {
            unreachable!("internal error - the help option must register on an empty registry: {error}");
        }

        Self {
            program: program.into(),
            registry,
            consumer: None,
            deferred_error: None,
            printer: Printer::terminal(),
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// Add an option.
    ///
    /// A configuration error is reported when the factory is run.
    /// Use [`ConsoleFactory::add_option`] to observe the error immediately.
    pub fn option(mut self, option: OptionDefinition) -> Self {
        if let Err(error) = self.registry.register(option) {
            self.defer(error);
        }

        self
    }

    /// Allow aliases to start with `prefix`.
    ///
    /// A configuration error is reported when the factory is run.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        if let Err(error) = self.registry.add_prefix(prefix) {
            self.defer(error);
        }

        self
    }

    /// Use `coercer` (exclusively) for options declared with `declared_type`.
    pub fn coercer(
        mut self,
        declared_type: DeclaredType,
        coercer: impl Fn(&str) -> Result<Value, String> + 'static,
    ) -> Self {
        self.registry.add_coercer(declared_type, coercer);
        self
    }

    /// Invoke `consumer` with the result of each successful run.
    /// If repeated, only the final consumer will apply.
    pub fn consumer(mut self, consumer: impl FnMut(&ParseResult<'_>) + 'c) -> Self {
        self.consumer.replace(Box::new(consumer));
        self
    }

    /// Add an option.
    pub fn add_option(&mut self, option: OptionDefinition) -> Result<(), ConfigError> {
        self.registry.register(option)
    }

    /// Allow aliases to start with `prefix`.
    pub fn add_prefix(&mut self, prefix: impl Into<String>) -> Result<(), ConfigError> {
        self.registry.add_prefix(prefix)
    }

    /// Use `coercer` (exclusively) for options declared with `declared_type`.
    pub fn add_coercer(
        &mut self,
        declared_type: DeclaredType,
        coercer: impl Fn(&str) -> Result<Value, String> + 'static,
    ) {
        self.registry.add_coercer(declared_type, coercer);
    }

    /// The registry behind this factory.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn defer(&mut self, error: ConfigError) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Deferring configuration error: {error}.");
        }

        if self.deferred_error.is_none() {
            self.deferred_error.replace(error);
        }
    }

    /// Run the factory against the input line.
    ///
    /// * If any token is a help alias, prints the help message and returns `Err(0)`.
    /// * If the configuration or the parse fails, prints the error and returns `Err(1)`.
    /// * Otherwise, invokes the consumer with the parse result and returns `Ok(())`.
    pub fn run(&mut self, input: &str) -> Result<(), i32> {
        if let Some(error) = &self.deferred_error {
            self.user_interface
                .print_error(format!("Config error: {error}"));
            return Err(1);
        }

        if self.requests_help(input) {
            self.printer
                .print_help(&self.program, self.registry.options(), &*self.user_interface);
            return Err(0);
        }

        match parse(input, &self.registry) {
            Ok(result) => {
                if let Some(consumer) = self.consumer.as_mut() {
                    consumer(&result);
                }

                Ok(())
            }
            Err(error) => {
                let offset = error.offset();
                self.user_interface
                    .print_error(format!("Parse error: {error}"));

                if let Some(offset) = offset {
                    self.user_interface
                        .print_error_context(ErrorContext::new(offset, input));
                }

                Err(1)
            }
        }
    }

    /// Run the factory against the input line.
    /// Exits with the code (via [`std::process::exit`]) when the run does not succeed.
    pub fn run_or_exit(&mut self, input: &str) {
        if let Err(exit_code) = self.run(input) {
            std::process::exit(exit_code);
        }
    }

    /// Run the factory against the Cli [`env::args`], joined by spaces.
    /// Exits with the code (via [`std::process::exit`]) when the run does not succeed.
    pub fn run_env(&mut self) {
        let input = env::args().skip(1).collect::<Vec<String>>().join(" ");
        self.run_or_exit(&input);
    }

    fn requests_help(&self, input: &str) -> bool {
        match self.registry.option_by_name(HELP_NAME) {
            Some(help) => input.split_whitespace().any(|token| help.has_alias(token)),
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_interface(
        mut self,
        user_interface: impl UserInterface + 'static,
        terminal_width: Option<usize>,
    ) -> Self {
        self.user_interface = Box::new(user_interface);
        self.printer = Printer::new(terminal_width);
        self
    }
}
