//! Reusable field filters
//!
//! These filters normalise field values before validation

use anyhow::Result;
use serde_json::Value;

use crate::core::order::OrderStatus;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: blank string becomes null, so optional fields fall back to defaults
pub fn blank_as_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value.as_str() {
        Some(s) if s.trim().is_empty() => Ok(Value::Null),
        _ => Ok(value),
    }
}

/// Filter: rewrite a recognised status label in its canonical spelling
///
/// Unrecognised values pass through untouched for the validator to report.
pub fn canonical_status() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(status) = value.as_str().and_then(|s| s.parse::<OrderStatus>().ok()) {
            Ok(Value::String(status.as_str().to_string()))
        } else {
            Ok(value)
        }
    }
}
