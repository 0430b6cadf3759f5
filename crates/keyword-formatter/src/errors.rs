//! Error types and error reporting

use colored::*;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Both `keywords` and `keywords-path` inputs are provided. Only one is allowed.")]
    ConflictingSources,

    #[error("Neither `keywords` nor `keywords-path` inputs are provided. One is required.")]
    MissingSource,

    #[error("No keywords found in `keywords`")]
    NoKeywords,

    #[error("The file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("The directory is empty: {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Invalid keywords path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Input `{name}` must be one of true, True, TRUE, false, False, FALSE. Received: {value:?}")]
    InvalidBoolean { name: String, value: String },

    #[error(
        "Only `issues`, `pull_request`, and `pull_request_target` events are supported. Received: {0}"
    )]
    UnsupportedEvent(String),

    #[error("Only types `opened` and `edited` events are supported. Received: {event}.{action}")]
    UnsupportedAction { event: String, action: String },

    #[error("Invalid repository {0:?}, expected owner/repo")]
    InvalidRepository(String),

    #[error("Invalid record {0:?}, expected owner/repo#number")]
    InvalidRecord(String),

    #[error("Event payload has neither an issue nor a pull request number")]
    MissingNumber,

    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// A keyword expression the regex engine rejected, reported verbatim
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("Failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Whether this error comes from contradictory, missing or unusable configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ConflictingSources
                | Error::MissingSource
                | Error::NoKeywords
                | Error::EmptyFile(_)
                | Error::EmptyDirectory(_)
                | Error::InvalidPath(_)
                | Error::InvalidBoolean { .. }
                | Error::UnsupportedEvent(_)
                | Error::UnsupportedAction { .. }
                | Error::InvalidRepository(_)
                | Error::InvalidRecord(_)
                | Error::MissingNumber
                | Error::MissingEnv(_)
        )
    }

    /// A hint for the user, when there is an obvious fix
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConflictingSources | Error::MissingSource => {
                Some("Pass exactly one of --keywords or --keywords-path, or set one in .kwfmt.toml")
            }
            Error::UnsupportedEvent(_) | Error::UnsupportedAction { .. } | Error::MissingEnv(_) => {
                Some("Pass --record owner/repo#number when running outside an event context")
            }
            _ => None,
        }
    }
}

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    let mut current = error.source();
    while let Some(cause) = current {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
        current = std::error::Error::source(cause);
    }
}

/// Print an error with a suggestion
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
