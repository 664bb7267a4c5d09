//! Storage key layout.
//!
//! Records live under `<namespace>:<date>:<machine_id>`, so one day's
//! uploads can be listed with the prefix glob `<namespace>:<date>:*`.

use crate::error::{Error, Result};
use crate::types::DeedDate;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "deeds";

const GLOB_CHARS: &[char] = &['*', '?', '[', ']', '\\'];

/// Builds record keys and per-date listing patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    namespace: String,
}

impl KeyScheme {
    /// Creates a key scheme rooted at `namespace`.
    ///
    /// The namespace ends up in listing globs, so it must be non-empty
    /// and free of glob metacharacters (`*?[]\`).
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(Error::config("Key namespace is empty"));
        }
        if let Some(c) = namespace.chars().find(|c| GLOB_CHARS.contains(c)) {
            return Err(Error::config(format!(
                "Key namespace '{namespace}' contains glob character '{c}'"
            )));
        }
        Ok(Self { namespace })
    }

    /// The namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of the record for one machine on one date.
    pub fn record_key(&self, date: &DeedDate, machine_id: &str) -> String {
        format!("{}:{date}:{machine_id}", self.namespace)
    }

    /// Glob matching every record for a date.
    pub fn date_pattern(&self, date: &DeedDate) -> String {
        format!("{}:{date}:*", self.namespace)
    }

    /// Recovers the machine id from a key listed for `date`.
    pub fn machine_id_from_key<'k>(&self, date: &DeedDate, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.namespace.as_str())?
            .strip_prefix(':')?
            .strip_prefix(date.as_str())?
            .strip_prefix(':')
    }
}

impl Default for KeyScheme {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
