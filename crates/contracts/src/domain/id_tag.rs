use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::IdTagStatus;

use super::user::User;

/// RFID / authorization tag bound to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTag {
    pub id: u32,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: u32,
    #[serde(default)]
    pub user: Option<Box<User>>,
}

impl IdTag {
    pub fn known_status(&self) -> Option<IdTagStatus> {
        IdTagStatus::from_code(&self.status)
    }

    /// Expiry date, treating the backend's zero timestamp as "never".
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.filter(|d| d.year() > 1)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|d| d <= now)
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.user
            .as_deref()
            .map(|u| u.display_name())
            .filter(|name| !name.is_empty())
    }
}

/// Body of `POST /id-tags` and `PUT /id-tags/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdTagRequest {
    pub tag: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub user_id: u32,
}

impl From<&IdTag> for IdTagRequest {
    fn from(tag: &IdTag) -> Self {
        Self {
            tag: tag.tag.clone(),
            status: tag.status.clone(),
            expiry_date: tag.expires_at(),
            user_id: tag.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn zero_expiry_means_never() {
        let tag: IdTag = serde_json::from_value(json!({
            "id": 3,
            "tag": "RFID-01",
            "status": "Accepted",
            "expiryDate": "0001-01-01T00:00:00Z",
            "userId": 2,
            "user": { "id": 2, "name": "Siti", "email": "siti@csms.local", "idTags": null }
        }))
        .unwrap();

        assert_eq!(tag.expires_at(), None);
        assert!(!tag.is_expired(Utc::now()));
        assert_eq!(tag.owner_name(), Some("Siti"));
        assert_eq!(tag.known_status(), Some(IdTagStatus::Accepted));
    }

    #[test]
    fn past_expiry_is_expired() {
        let tag = IdTag {
            expiry_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(tag.is_expired(now));
    }

    #[test]
    fn request_uses_camel_case_and_drops_zero_expiry() {
        let tag = IdTag {
            id: 9,
            tag: "RFID-09".into(),
            status: "Blocked".into(),
            expiry_date: Some(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()),
            user_id: 4,
            user: None,
        };
        assert_eq!(
            serde_json::to_value(IdTagRequest::from(&tag)).unwrap(),
            json!({ "tag": "RFID-09", "status": "Blocked", "userId": 4 })
        );
    }
}
