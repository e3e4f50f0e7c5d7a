//! Forms
//!
//! Editable string mirrors of backend entities. A form is filled from an
//! entity with display defaults, edited field by field, then validated into
//! a JSON payload. Validation collects every problem at once.

mod rate_plan_form;
mod reservation_form;
mod vehicle_unit_form;

pub use rate_plan_form::*;
pub use reservation_form::*;
pub use vehicle_unit_form::*;

use crate::error::{Error, FieldError, Result};
use serde_json::{Map, Value};

/// Collects field errors during validation
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// Trimmed value, or an error when blank
    pub fn required(&mut self, field: &str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "is required");
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Optional non-negative number; blank is `None`
    pub fn amount(&mut self, field: &str, value: &str) -> Option<f64> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Some(n),
            Ok(n) if n.is_finite() => {
                self.add(field, "must not be negative");
                None
            }
            _ => {
                self.add(field, "must be a number");
                None
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(Error::Validation { errors: self.0 })
        }
    }
}

/// Trimmed text, `None` when blank
pub(crate) fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Insert `key` only when the value is present
pub(crate) fn put<V: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}
