//! Branch - Rental Location

use serde::{Deserialize, Serialize};

use crate::domain::refs::deserialize_id;

/// A rental location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branch {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "isActive")]
    pub active: Option<bool>,
    pub opening_hours: Option<String>,
}

impl Branch {
    /// Branches without an explicit flag are treated as active
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Display label, e.g. "Downtown (DTN)"
    pub fn label(&self) -> String {
        match self.code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{} ({})", self.name, code),
            None => self.name.clone(),
        }
    }

    /// "address, city" with missing parts skipped
    pub fn location(&self) -> String {
        [self.address.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_mongo_style_branch() {
        let branch: Branch = serde_json::from_value(json!({
            "_id": "65f0",
            "name": "Airport",
            "code": "APT",
            "city": "Lisbon",
            "isActive": false
        }))
        .expect("branch");
        assert_eq!(branch.id, "65f0");
        assert_eq!(branch.label(), "Airport (APT)");
        assert_eq!(branch.location(), "Lisbon");
        assert!(!branch.is_active());
    }

    #[test]
    fn missing_fields_default() {
        let branch: Branch = serde_json::from_value(json!({ "id": 3, "name": "Center" }))
            .expect("branch");
        assert_eq!(branch.id, "3");
        assert_eq!(branch.label(), "Center");
        assert!(branch.is_active());
    }
}
