//! Record encoding for the key-value store.
//!
//! Records are written as compact JSON text. On read the store may hand
//! back either that text or an already-parsed structure; [`decode_record`]
//! accepts both.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{StoredRecord, kind_of};

/// Serializes a record for storage.
pub fn encode_record(record: &StoredRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Normalizes a stored value to parsed JSON.
///
/// Text is parsed; anything else is already structured and passes
/// through unchanged. Fields are not checked.
pub fn normalize_stored(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => Ok(serde_json::from_str(&text)?),
        structured => {
            log::trace!("stored value is already structured");
            Ok(structured)
        }
    }
}

/// Normalizes a stored value into a record.
pub fn decode_record(value: Value) -> Result<StoredRecord> {
    match normalize_stored(value)? {
        record @ Value::Object(_) => Ok(serde_json::from_value(record)?),
        other => Err(Error::decode(format!(
            "Expected record text or object, found {}",
            kind_of(&other)
        ))),
    }
}
