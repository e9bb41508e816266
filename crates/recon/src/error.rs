use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (breakpoints out of order, empty label list, etc.).
    ConfigValidation(String),
    /// A required column could not be located by any of its labels.
    MissingColumn { source: String, column: String },
    /// Positional table is narrower than the fixed layout requires.
    Layout { found: usize, required: usize },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source} report: no column found for '{column}'")
            }
            Self::Layout { found, required } => write!(
                f,
                "inventory layout mismatch: expected at least {required} columns, found {found}"
            ),
        }
    }
}

impl std::error::Error for ReconError {}
