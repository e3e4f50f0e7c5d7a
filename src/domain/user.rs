//! User - Accounts, Roles and Driver Profiles

use serde::{Deserialize, Serialize};

use crate::domain::refs::{EntityRef, deserialize_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Agent,
    Driver,
    #[default]
    #[serde(other)]
    Customer,
}

impl Role {
    /// Admins and managers see the management dashboard
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Agent)
    }

    /// Rate plans and fleet records are editable by admins and managers only
    pub fn can_manage_fleet(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "fullName")]
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    #[serde(alias = "branchId")]
    pub branch: EntityRef,
    #[serde(alias = "profileImage")]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// A driver: a user with licensing details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverProfile {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "fullName")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<String>,
    #[serde(alias = "branchId", alias = "assignedBranch")]
    pub branch: EntityRef,
    #[serde(alias = "isAvailable")]
    pub available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_user_role() {
        let user: User = serde_json::from_value(json!({
            "_id": "u9", "email": "m@test.io", "role": "manager"
        }))
        .expect("user");
        assert_eq!(user.role, Role::Manager);
        assert!(user.role.can_manage_fleet());
        assert_eq!(user.display_name(), "m@test.io");
    }

    #[test]
    fn unknown_role_is_customer() {
        let user: User =
            serde_json::from_value(json!({ "id": 1, "name": "Jo", "role": "superuser" }))
                .expect("user");
        assert_eq!(user.role, Role::Customer);
        assert!(!user.role.is_staff());
    }
}
