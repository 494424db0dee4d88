//! Error types for the style engine.
//!
//! Evaluation never fails. Errors only come from loading configuration and
//! from building malformed expression terms.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside of evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be parsed.
    #[error("Invalid evaluation config: {message}")]
    Config { message: String },

    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A function was given the wrong number of arguments.
    #[error("Wrong number of arguments for '{function}()': {actual}")]
    ArgumentCount { function: &'static str, actual: usize },
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an argument count error.
    pub fn argument_count(function: &'static str, actual: usize) -> Self {
        Self::ArgumentCount { function, actual }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
