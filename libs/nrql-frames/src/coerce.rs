//! Total conversions from a dynamically typed value to a target type.
//!
//! Nothing here fails or panics: an incompatible value yields `None`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::reserved::{BEGIN_TIME_SECONDS, END_TIME_SECONDS, TIMESTAMP};

/// Epoch unit of a numeric time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Seconds,
}

impl TimeUnit {
    /// Unit implied by the reserved field that produced the value.
    pub fn for_field(name: &str) -> Option<Self> {
        match name {
            TIMESTAMP => Some(TimeUnit::Millis),
            BEGIN_TIME_SECONDS | END_TIME_SECONDS => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

/// Numbers pass through; strings are parsed as decimal or scientific notation.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Locale-independent parse. Rejects surrounding whitespace and the
/// `inf`/`NaN` spellings `f64::from_str` would otherwise accept.
pub fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Only native booleans. `"true"` stays text.
pub fn as_bool(value: &Value) -> Option<bool> {
    value.as_bool()
}

pub fn as_timestamp(value: &Value, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let n = as_number(value)?;
    let millis = match unit {
        TimeUnit::Millis => n,
        TimeUnit::Seconds => n * 1000.0,
    };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Human-readable projection. Arrays and objects render as compact JSON,
/// null as empty text.
pub fn as_display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
