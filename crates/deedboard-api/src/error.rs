//! Error types for deedboard-api and their HTTP mapping.
//!
//! Client mistakes become a 400 with a specific message (and the field
//! path, when there is one). Everything else becomes a 500 with a generic
//! message; the underlying error is only logged.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for deedboard-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a request
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from deedboard-core (validation, codec)
    #[error("Core error: {0}")]
    Core(#[from] deedboard_core::Error),

    /// Error from deedboard-store
    #[error("Store error: {0}")]
    Store(#[from] deedboard_store::Error),

    /// Request body was not usable JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Query string could not be parsed
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    /// Request body exceeded the configured limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Route exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Socket-level failure while serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::MalformedBody(_) | Error::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Missing `date` query parameter or body field.
    pub fn date_required() -> Self {
        Error::Core(deedboard_core::Error::validation_field(
            "date",
            "Date is required",
        ))
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Error::PayloadTooLarge;
        }
        Error::MalformedBody(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::MalformedQuery(rejection.body_text())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// What went wrong
    pub message: String,
    /// Offending field path, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Error::Core(deedboard_core::Error::Validation { field, message }) => {
                ErrorBody { message, field }
            }
            Error::MalformedBody(message) | Error::MalformedQuery(message) => ErrorBody {
                message,
                field: None,
            },
            Error::MethodNotAllowed => ErrorBody {
                message: "Method not allowed".to_string(),
                field: None,
            },
            Error::PayloadTooLarge => ErrorBody {
                message: "Request body too large".to_string(),
                field: None,
            },
            other => {
                tracing::error!(error = %other, "request failed");
                ErrorBody {
                    message: "Internal Server Error".to_string(),
                    field: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
