//! Validation and filtering of order intake
//!
//! Intake goes through one declarative rule set whether it arrives as a typed
//! [`NewOrder`] or as a raw JSON form body: filters normalise each field,
//! validators report every field at fault, and only then is the payload
//! turned into a [`NewOrder`].

pub mod config;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;

use serde_json::Value;

use crate::core::error::ValidationError;
use crate::core::order::{NewOrder, Roster};

/// Rules for creating an order against `roster`
pub fn new_order_rules(roster: &Roster) -> EntityValidationConfig {
    let mut config = EntityValidationConfig::new("order");

    for field in ["mobile", "name", "details"] {
        config
            .add_filter(field, filters::trim())
            .add_validator(field, validators::text())
            .add_validator(field, validators::required());
    }

    config
        .add_filter("salesperson", filters::trim())
        .add_validator("salesperson", validators::text())
        .add_validator("salesperson", validators::required())
        .add_validator("salesperson", validators::in_list(roster.names().to_vec()));

    config
        .add_filter("date", filters::blank_as_null())
        .add_filter("date", filters::trim())
        .add_validator("date", validators::optional())
        .add_validator("date", validators::date_format());

    config
        .add_filter("status", filters::blank_as_null())
        .add_filter("status", filters::canonical_status())
        .add_validator("status", validators::status_label());

    config
}

impl NewOrder {
    /// Build a validated order from a raw form payload
    pub fn from_payload(payload: Value, roster: &Roster) -> Result<NewOrder, ValidationError> {
        let filtered = new_order_rules(roster)
            .validate_and_filter(payload)
            .map_err(ValidationError::FieldErrors)?;

        serde_json::from_value(filtered).map_err(|e| ValidationError::InvalidRequest {
            message: e.to_string(),
        })
    }

    /// Trim and check this order against `roster`
    pub fn validate(self, roster: &Roster) -> Result<NewOrder, ValidationError> {
        let payload = serde_json::to_value(&self).map_err(|e| ValidationError::InvalidRequest {
            message: e.to_string(),
        })?;
        Self::from_payload(payload, roster)
    }
}
