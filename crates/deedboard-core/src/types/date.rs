//! Calendar date that partitions uploads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A `YYYY-MM-DD` date naming one day's bucket of uploads.
///
/// The raw string is kept as given, since it becomes part of every
/// storage key and glob pattern for that day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeedDate(String);

impl DeedDate {
    /// Parses and validates a date string.
    ///
    /// # Examples
    ///
    /// ```
    /// use deedboard_core::DeedDate;
    ///
    /// let date = DeedDate::parse("2024-01-01").unwrap();
    /// assert_eq!(date.as_str(), "2024-01-01");
    /// assert!(DeedDate::parse("2024-1-1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let well_formed = s.len() == 10
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(Error::validation_field(
                "date",
                format!("Expected date in YYYY-MM-DD format, received '{s}'"),
            ));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            Error::validation_field("date", format!("'{s}' is not a valid calendar date"))
        })?;
        Ok(Self(s.to_string()))
    }

    /// Returns the date as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DeedDate {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DeedDate> for String {
    fn from(date: DeedDate) -> Self {
        date.0
    }
}

impl std::str::FromStr for DeedDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for DeedDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
