//! Error types for deedboard-core.

/// Errors raised while validating, encoding, or decoding deed records.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or missing input field.
    #[error("Validation error: {message}")]
    Validation {
        /// Dotted path of the offending field, when one applies
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value could not be turned back into a record
    #[error("Decode error: {message}")]
    Decode {
        /// Why decoding failed
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for deedboard-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was caused by the caller's input (maps to a 400).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field path.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Field path of a validation error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
