//! Error types for deedboard-store

use thiserror::Error;

/// Result type alias for deedboard-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to a key-value store
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Redis connection or command failure
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Malformed key pattern
    #[error("Invalid key pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Store is misconfigured
    #[error("Store configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The store refused an operation
    #[error("Store unavailable during {operation} of '{key}'")]
    Unavailable {
        /// Operation that failed (`get`, `keys`, ...)
        operation: &'static str,
        /// Key or pattern involved
        key: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new unavailable error.
    pub fn unavailable(operation: &'static str, key: impl Into<String>) -> Self {
        Error::Unavailable {
            operation,
            key: key.into(),
        }
    }
}
