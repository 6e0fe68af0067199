//! Error handling for the padaln CLI

use padaln_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for padaln CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid sequence: {message}")]
    InvalidSequence { message: String },

    #[error("Alignment error: {message}")]
    Alignment { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_sequence<S: Into<String>>(message: S) -> Self {
        Self::InvalidSequence { message: message.into() }
    }

    pub fn alignment<S: Into<String>>(message: S) -> Self {
        Self::Alignment { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<AlignError> for CliError {
    fn from(err: AlignError) -> Self {
        match err {
            AlignError::InvalidSymbol { .. } => Self::invalid_sequence(err.to_string()),
            AlignError::InvalidParams(message) => Self::config(message),
            AlignError::PathOverflow { .. } => Self::alignment(err.to_string()),
            AlignError::Io(io_err) => io_err.into(),
        }
    }
}

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the configuration path is correct: {}\n\
                 • Omit --config to use padaln.toml or the built-in defaults",
                path.display()
            ));
        }

        CliError::InvalidSequence { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Sequences may only contain A, C, G, T and N (either case)\n\
                 • Remove gap characters and whitespace from the input",
            );
        }

        CliError::Alignment { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • The target is much longer than the query allows; pass the longer sequence as --query\n\
                 • Raise --match or lower --gap-extend to widen the path estimate",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your padaln.toml configuration file\n\
                 • Use 'padaln config --example' to generate a sample configuration\n\
                 • gap_extend must be at least 1 and no value may be negative",
            );
        }

        CliError::Io { .. } => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
