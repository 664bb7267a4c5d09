//! HTTP handlers.
//!
//! Handlers only translate between HTTP and [`DeedService`](crate::DeedService);
//! the behavior lives in the service.

mod clear;
mod export;
mod fetch;
mod health;
mod upload;

pub use clear::clear;
pub use export::export;
pub use fetch::fetch;
pub use health::{HealthResponse, health};
pub use upload::{UploadResponse, upload};

use deedboard_core::DeedDate;
use serde::Deserialize;

use crate::{Error, Result};

/// `?date=YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    /// Requested date, if given
    pub date: Option<String>,
}

impl DateQuery {
    /// The validated date; absent or empty is a 400.
    pub fn required_date(&self) -> Result<DeedDate> {
        match self.date.as_deref() {
            None | Some("") => Err(Error::date_required()),
            Some(raw) => Ok(DeedDate::parse(raw)?),
        }
    }
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
