//! Inbound upload payload and its validation.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::DeedDate;

/// Opaque deed payloads keyed by deed id.
pub type Deeds = Map<String, Value>;

/// A machine's full deed set for one day, as submitted by the machine.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    /// Submitting machine
    pub machine_id: String,
    /// Operator running the machine
    pub operator: String,
    /// Day the deeds belong to
    pub date: DeedDate,
    /// Deed id to opaque deed value
    pub deeds: Deeds,
}

impl UploadPayload {
    /// Validates an untrusted JSON body.
    ///
    /// Fields are checked in order (`machine_id`, `operator`, `date`,
    /// `deeds`) and the first problem is returned with its field path.
    /// Unknown fields are ignored.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut body = expect_object(value)?;

        let machine_id = take_string(&mut body, "machine_id")?;
        let operator = take_string(&mut body, "operator")?;
        let date = DeedDate::parse(&take_string(&mut body, "date")?)?;
        let deeds = match body.remove("deeds") {
            Some(Value::Object(deeds)) => deeds,
            Some(other) => {
                return Err(Error::validation_field(
                    "deeds",
                    format!("Expected object, received {}", kind_of(&other)),
                ));
            }
            None => return Err(Error::validation_field("deeds", "Required")),
        };

        Ok(Self {
            machine_id,
            operator,
            date,
            deeds,
        })
    }
}

/// Body of a clear request: `{"date": "YYYY-MM-DD"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearRequest {
    /// Day whose uploads are removed
    pub date: DeedDate,
}

impl ClearRequest {
    /// Validates an untrusted JSON body.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut body = expect_object(value)?;
        let date = DeedDate::parse(&take_string(&mut body, "date")?)?;
        Ok(Self { date })
    }
}

fn expect_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(body) => Ok(body),
        other => Err(Error::validation(format!(
            "Expected object, received {}",
            kind_of(&other)
        ))),
    }
}

fn take_string(body: &mut Map<String, Value>, field: &str) -> Result<String> {
    match body.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(Error::validation_field(
            field,
            format!("Expected string, received {}", kind_of(&other)),
        )),
        None => Err(Error::validation_field(field, "Required")),
    }
}

/// Human-readable JSON kind, used in validation messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
