use terminal_size::{terminal_size, Width};

use crate::api::OptionDefinition;
use crate::constant::*;
use crate::model::DeclaredType;
use crate::parser::interface::{ColumnRenderer, UserInterface};

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const DEFAULT_MIDDLE_WIDTH: usize = 17;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

/// Prints the help message for a set of options.
pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        options: &[OptionDefinition],
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let mut summary = Vec::default();
        let mut rows: Vec<(String, String)> = Vec::default();
        let mut left_column_width = 0;
        let mut middle_column_width = 0;

        for option in options {
            let flags = flags(option);
            let description = describe(option);
            summary.push(usage(option));

            if left_column_width < flags.chars().count() {
                left_column_width = flags.chars().count();
            }

            if middle_column_width < description.chars().count() + MAIN_INDENT {
                middle_column_width = description.chars().count() + MAIN_INDENT;
            }

            rows.push((flags, description));
        }

        let column_renderer = match self.terminal_width {
            Some(total_width) => ColumnRenderer::guided(
                PADDING_WIDTH,
                left_column_width,
                middle_column_width,
                total_width,
            ),
            None => ColumnRenderer::new(
                PADDING_WIDTH,
                left_column_width,
                std::cmp::min(middle_column_width, DEFAULT_MIDDLE_WIDTH),
            ),
        };

        if summary.is_empty() {
            user_interface.print(format!("usage: {program}"));
        } else {
            user_interface.print(format!("usage: {program} {}", summary.join(" ")));
        }

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for (flags, description) in rows {
            for line in column_renderer.render(MAIN_INDENT, &flags, &description) {
                user_interface.print(line);
            }
        }
    }
}

fn is_help(option: &OptionDefinition) -> bool {
    option.name() == HELP_NAME
}

/// The value placeholder, in brackets when the value may be left out.
fn grammar(option: &OptionDefinition) -> Option<String> {
    if is_help(option) || option.declared_type().is_enumeration() {
        return None;
    }

    let grammar = option.declared_type().grammar();

    if option.default_value().is_some() {
        Some(format!("[{grammar}]"))
    } else {
        Some(grammar)
    }
}

fn usage(option: &OptionDefinition) -> String {
    let body = match option.declared_type() {
        DeclaredType::Enumeration(_) => option.aliases().join("|"),
        _ => {
            let alias = option.aliases().first().map(String::as_str).unwrap_or_default();

            match grammar(option) {
                Some(grammar) => format!("{alias} {grammar}"),
                None => alias.to_string(),
            }
        }
    };

    if option.is_mandatory() {
        body
    } else {
        format!("[{body}]")
    }
}

fn flags(option: &OptionDefinition) -> String {
    let aliases = option.aliases().join(", ");

    match grammar(option) {
        Some(grammar) => format!("{aliases} {grammar}"),
        None => aliases,
    }
}

fn describe(option: &OptionDefinition) -> String {
    let mut parts = Vec::default();

    if let DeclaredType::Enumeration(kind) = option.declared_type() {
        parts.push(format!("{{{}}}", kind.variants().join(", ")));
    }

    if let Some(description) = option.description() {
        parts.push(description.to_string());
    }

    if option.is_mandatory() {
        parts.push("(required)".to_string());
    }

    match option.default_value() {
        Some(value) if !is_help(option) => parts.push(format!("[default: {value}]")),
        _ => {}
    }

    parts.join(" ")
}

/// The input with a caret under the position of an error.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    input: String,
}

impl ErrorContext {
    /// The `offset` is a byte offset into `input`.
    pub(crate) fn new(offset: usize, input: &str) -> Self {
        Self {
            offset,
            input: input.to_string(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tabs & newlines would misalign the caret.
        let projection: String = self
            .input
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        let width = projection
            .char_indices()
            .take_while(|(i, _)| *i < self.offset)
            .count();

        write!(f, "{projection}\n{:width$}^", "")
    }
}
