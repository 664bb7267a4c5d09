//! Error types for deedboard-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for deedboard-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling configuration
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// File could not be read or written
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`DeedboardConfig`](crate::config::DeedboardConfig)
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Any other configuration problem
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// I/O failure on a specific file.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
