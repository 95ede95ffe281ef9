use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;
use crate::shared::serde_helpers::null_to_default;

use super::id_tag::IdTag;

/// Backend user account. The password hash is never sent to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub id_tags: Vec<IdTag>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        UserRole::from_code(&self.role) == Some(UserRole::Admin)
    }

    /// Name for headers and menus; falls back to the e-mail.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: String,
    pub status: String,
}

/// Body of `PUT /users/{id}`. An empty password keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub phone: String,
    pub role: String,
    pub status: String,
}

impl From<&User> for UpdateUserRequest {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: None,
            phone: user.phone.clone(),
            role: user.role.clone(),
            status: user.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_user_without_tags() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Admin",
            "email": "admin@csms.local",
            "phone": "",
            "role": "admin",
            "status": "active",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "idTags": null
        }))
        .unwrap();

        assert!(user.is_admin());
        assert!(user.id_tags.is_empty());
        assert_eq!(user.display_name(), "Admin");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = User {
            email: "ops@csms.local".into(),
            role: "operator".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "ops@csms.local");
        assert!(!user.is_admin());
    }

    #[test]
    fn update_request_skips_empty_password() {
        let user = User {
            id: 4,
            name: "Budi".into(),
            email: "budi@csms.local".into(),
            role: "customer".into(),
            status: "active".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(UpdateUserRequest::from(&user)).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Budi",
                "email": "budi@csms.local",
                "phone": "",
                "role": "customer",
                "status": "active"
            })
        );
    }
}
