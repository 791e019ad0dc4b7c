pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_ALIASES: [&str; 2] = ["-h", "--h"];
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

pub(crate) const DEFAULT_PREFIXES: [&str; 3] = ["", "-", "--"];
pub(crate) const MAX_PREFIX_LENGTH: usize = 2;
pub(crate) const FORBIDDEN_PREFIX_CHARS: [char; 8] = ['"', '\'', '[', ']', '{', '}', '(', ')'];

/// Opening/closing marker pairs which delimit a composite value.
pub(crate) const MARKERS: [(char, char); 4] = [('[', ']'), ('{', '}'), ('"', '"'), ('(', ')')];
