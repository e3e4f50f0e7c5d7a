//! Identifiers and references
//!
//! The backend sends ids as strings or numbers, under `id` or `_id`, and
//! foreign keys either as a bare id or as the embedded related object.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Deserialize an id that may be a string or a number
pub fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(id_from_value(&value).unwrap_or_default())
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("_id"))
            .or_else(|| map.get("$oid"))
            .and_then(id_from_value),
        _ => None,
    }
}

/// A foreign key, optionally with the display label of the embedded object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRef {
    pub id: String,
    pub label: Option<String>,
}

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Label if the object was embedded, else the id
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    fn from_value(value: &Value) -> Self {
        let id = id_from_value(value).unwrap_or_default();
        let label = match value {
            Value::Object(map) => label_from_object(map),
            _ => None,
        };
        Self { id, label }
    }
}

fn label_from_object(map: &serde_json::Map<String, Value>) -> Option<String> {
    if let Some(name) = map.get("name").and_then(Value::as_str) {
        return Some(name.to_string());
    }
    let parts: Vec<String> = ["year", "make", "model"]
        .iter()
        .filter_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(EntityRef::from_value(&value))
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.id.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ref_from_bare_id() {
        let r: EntityRef = serde_json::from_value(json!("br-1")).expect("ref");
        assert_eq!(r.id, "br-1");
        assert_eq!(r.display(), "br-1");
    }

    #[test]
    fn ref_from_numeric_id() {
        let r: EntityRef = serde_json::from_value(json!(42)).expect("ref");
        assert_eq!(r.id, "42");
    }

    #[test]
    fn ref_from_embedded_model() {
        let r: EntityRef = serde_json::from_value(json!({
            "_id": "m-7", "make": "Toyota", "model": "Corolla", "year": 2022
        }))
        .expect("ref");
        assert_eq!(r.id, "m-7");
        assert_eq!(r.display(), "2022 Toyota Corolla");
    }

    #[test]
    fn ref_serializes_as_id() {
        let r = EntityRef {
            id: "b-2".into(),
            label: Some("Downtown".into()),
        };
        assert_eq!(serde_json::to_value(&r).expect("json"), json!("b-2"));
    }
}
