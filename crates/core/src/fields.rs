//! Field presence and coercion rules for loosely-typed JSON request bodies.
//!
//! Request bodies arrive as free-form JSON objects. Two notions of "present"
//! are used by the resource routers:
//!
//! - [`supplied`]: the key exists and is not `null`.
//! - [`is_truthy`]: loose truthiness, where `""`, `0`, `false` and `null`
//!   all count as absent.
//!
//! Once a field is known to be present, the `*_field` helpers coerce it into
//! the type the storage layer expects.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Loose truthiness of a JSON value. Empty arrays and objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `true` when the optional value is present and truthy.
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// The value, if the key was sent with anything other than `null`.
pub fn supplied(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Coerce a present value into text.
///
/// Scalars are stringified the way a text column would store them; arrays
/// and objects are rejected.
pub fn text_field(field: &str, value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(CoreError::Validation(format!("'{field}' must be a string"))),
    }
}

/// Coerce a present value into a row id. Integer strings are accepted.
pub fn id_field(field: &str, value: &Value) -> Result<DbId, CoreError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<DbId>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CoreError::Validation(format!("'{field}' must be an integer")))
}

/// Parse a present value as a UTC timestamp.
///
/// Accepts RFC 3339 (`2019-01-03T00:00:00.000Z`) and zone-less ISO 8601
/// date-times, which are taken to be UTC.
pub fn timestamp_field(field: &str, value: &Value) -> Result<Timestamp, CoreError> {
    let invalid = || CoreError::Validation(format!("'{field}' must be an ISO 8601 timestamp"));

    let Value::String(raw) = value else {
        return Err(invalid());
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| invalid())
}
