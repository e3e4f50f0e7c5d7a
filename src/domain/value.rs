//! FlexNumber - numeric values in whatever shape the backend sends them
//!
//! The API is inconsistent: the same field may arrive as a JSON number, a
//! numeric string, or a decimal wrapper object such as
//! `{"$numberDecimal": "12.50"}`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Keys under which a decimal wrapper object stores its value
const WRAPPER_KEYS: [&str; 3] = ["$numberDecimal", "value", "amount"];

/// A number as received from the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlexNumber {
    /// Missing or null
    #[default]
    Empty,
    /// A real JSON number
    Number(f64),
    /// Text; usually numeric but not guaranteed
    Text(String),
}

impl FlexNumber {
    /// Interpret an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => FlexNumber::Empty,
            Value::Number(n) => n.as_f64().map_or(FlexNumber::Empty, FlexNumber::Number),
            Value::String(s) => FlexNumber::Text(s.clone()),
            Value::Object(map) => WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key))
                .map(FlexNumber::from_value)
                .unwrap_or_default(),
            Value::Bool(_) | Value::Array(_) => FlexNumber::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FlexNumber::Empty => true,
            FlexNumber::Text(s) => s.trim().is_empty(),
            FlexNumber::Number(_) => false,
        }
    }

    /// Numeric value, if the content parses as one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlexNumber::Empty => None,
            FlexNumber::Number(n) => Some(*n),
            FlexNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// Canonical display string
    ///
    /// Integral values print without a fraction, others without trailing
    /// zeros. Non-numeric text is returned trimmed.
    pub fn to_display(&self) -> String {
        match self {
            FlexNumber::Empty => String::new(),
            FlexNumber::Number(n) => format_plain(*n),
            FlexNumber::Text(s) => match self.as_f64() {
                Some(n) => format_plain(n),
                None => s.trim().to_string(),
            },
        }
    }

    /// Display string, or `default` when empty
    pub fn display_or(&self, default: &str) -> String {
        if self.is_empty() {
            default.to_string()
        } else {
            self.to_display()
        }
    }
}

/// Format a float without exponent or trailing zeros
pub fn format_plain(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let s = format!("{n:.6}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for FlexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<f64> for FlexNumber {
    fn from(n: f64) -> Self {
        FlexNumber::Number(n)
    }
}

impl From<i64> for FlexNumber {
    fn from(n: i64) -> Self {
        FlexNumber::Number(n as f64)
    }
}

impl From<&str> for FlexNumber {
    fn from(s: &str) -> Self {
        FlexNumber::Text(s.to_string())
    }
}

impl<'de> Deserialize<'de> for FlexNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(FlexNumber::from_value(&value))
    }
}

impl Serialize for FlexNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlexNumber::Empty => serializer.serialize_none(),
            FlexNumber::Number(n) => serializer.serialize_f64(*n),
            FlexNumber::Text(s) => match self.as_f64() {
                Some(n) => serializer.serialize_f64(n),
                None => serializer.serialize_str(s),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_integral_number() {
        assert_eq!(FlexNumber::from_value(&json!(45)).to_display(), "45");
        assert_eq!(FlexNumber::from_value(&json!(45.0)).to_display(), "45");
    }

    #[test]
    fn display_trims_trailing_zeros() {
        assert_eq!(FlexNumber::from_value(&json!("12.50")).to_display(), "12.5");
        assert_eq!(FlexNumber::from_value(&json!(0.125)).to_display(), "0.125");
    }

    #[test]
    fn display_decimal_wrapper() {
        let value = json!({ "$numberDecimal": "89.990" });
        assert_eq!(FlexNumber::from_value(&value).to_display(), "89.99");
        let value = json!({ "amount": 12 });
        assert_eq!(FlexNumber::from_value(&value).to_display(), "12");
    }

    #[test]
    fn non_numeric_text_kept() {
        let n = FlexNumber::from_value(&json!("  call us  "));
        assert_eq!(n.to_display(), "call us");
        assert_eq!(n.as_f64(), None);
    }

    #[test]
    fn null_and_missing_are_empty() {
        assert_eq!(FlexNumber::from_value(&json!(null)).to_display(), "");
        assert_eq!(FlexNumber::from_value(&json!({"other": 1})), FlexNumber::Empty);
        assert_eq!(FlexNumber::Empty.display_or("-"), "-");
        assert_eq!(FlexNumber::Text("   ".into()).display_or("n/a"), "n/a");
    }

    #[test]
    fn deserializes_inside_struct() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            price: FlexNumber,
        }
        let row: Row = serde_json::from_value(json!({ "price": "19.00" })).expect("row");
        assert_eq!(row.price.as_f64(), Some(19.0));
        let row: Row = serde_json::from_value(json!({})).expect("row");
        assert!(row.price.is_empty());
    }

    #[test]
    fn serializes_numeric_text_as_number() {
        let out = serde_json::to_value(FlexNumber::Text("7.5".into())).expect("json");
        assert_eq!(out, json!(7.5));
        let out = serde_json::to_value(FlexNumber::Empty).expect("json");
        assert_eq!(out, json!(null));
    }
}
