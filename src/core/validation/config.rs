//! Declarative validation rules for an entity payload

use anyhow::Result;
use serde_json::{Map, Value};

use crate::core::error::FieldValidationError;

type Validator = Box<dyn Fn(&str, &Value) -> std::result::Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

struct FieldRules {
    name: String,
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Filters and validators for every accepted field of an entity
///
/// Fields are processed in the order they were first mentioned, so errors
/// come back in form order. Fields the config does not mention are dropped
/// from the filtered payload.
pub struct EntityValidationConfig {
    entity_type: String,
    fields: Vec<FieldRules>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    fn field_mut(&mut self, field: &str) -> &mut FieldRules {
        let pos = match self.fields.iter().position(|f| f.name == field) {
            Some(pos) => pos,
            None => {
                self.fields.push(FieldRules {
                    name: field.to_string(),
                    filters: Vec::new(),
                    validators: Vec::new(),
                });
                self.fields.len() - 1
            }
        };
        &mut self.fields[pos]
    }

    pub fn add_validator<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: Fn(&str, &Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.field_mut(field).validators.push(Box::new(validator));
        self
    }

    pub fn add_filter<F>(&mut self, field: &str, filter: F) -> &mut Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.field_mut(field).filters.push(Box::new(filter));
        self
    }

    /// Filter then validate every configured field of `payload`
    ///
    /// Returns the filtered payload, or every field error found (not just the
    /// first one).
    pub fn validate_and_filter(
        &self,
        payload: Value,
    ) -> std::result::Result<Value, Vec<FieldValidationError>> {
        let Value::Object(mut input) = payload else {
            return Err(vec![FieldValidationError::new(
                "body",
                format!("{} payload must be a JSON object", self.entity_type),
            )]);
        };

        let mut output = Map::new();
        let mut errors = Vec::new();

        for rules in &self.fields {
            let mut value = input.remove(&rules.name).unwrap_or(Value::Null);

            let mut filter_failed = false;
            for filter in &rules.filters {
                match filter(&rules.name, value.clone()) {
                    Ok(v) => value = v,
                    Err(e) => {
                        errors.push(FieldValidationError::new(&rules.name, e.to_string()));
                        filter_failed = true;
                        break;
                    }
                }
            }
            if filter_failed {
                continue;
            }

            for validator in &rules.validators {
                if let Err(message) = validator(&rules.name, &value) {
                    errors.push(FieldValidationError::new(&rules.name, message));
                }
            }

            if !value.is_null() {
                output.insert(rules.name.clone(), value);
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(errors)
        }
    }
}
