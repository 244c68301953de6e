//! Reusable field validators
//!
//! Each validator receives the field name and its (already filtered) JSON
//! value and returns a message when the value is unacceptable.

use serde_json::Value;

use crate::core::order::{DATE_FORMAT, OrderStatus};

/// Validator: field is present and, if a string, not blank
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null => Err("is required".to_string()),
        Value::String(s) if s.trim().is_empty() => Err("is required".to_string()),
        _ => Ok(()),
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: string must be one of `allowed` (exact match)
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.trim().is_empty() || allowed.iter().any(|a| a == s) {
                Ok(())
            } else {
                Err(format!(
                    "'{}' is not one of: {}",
                    s,
                    allowed.join(", ")
                ))
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be a `YYYY-MM-DD` date
pub fn date_format() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!("must be a YYYY-MM-DD date (got '{}')", s)),
            }
        } else if value.is_null() {
            Ok(())
        } else {
            Err("must be a YYYY-MM-DD date".to_string())
        }
    }
}

/// Validator: string must name a workflow status
pub fn status_label() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) => s
            .parse::<OrderStatus>()
            .map(|_| ())
            .map_err(|_| {
                format!(
                    "'{}' is not one of: {}",
                    s,
                    OrderStatus::labels().join(", ")
                )
            }),
        _ => Err("must be a status label".to_string()),
    }
}

/// Validator: value must be text (numbers are not silently accepted)
pub fn text() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &Value| match value {
        Value::Null | Value::String(_) => Ok(()),
        _ => Err("must be text".to_string()),
    }
}
