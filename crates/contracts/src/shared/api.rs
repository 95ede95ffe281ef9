use serde::{Deserialize, Serialize};

/// Pagination parameters accepted by every list endpoint.
///
/// Both fields are optional; the backend falls back to `limit=100`,
/// `offset=0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListParams {
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

/// Generic `{ "message": "..." }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the backend on non-2xx responses.
///
/// Handlers use either `error` or `message`, sometimes both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Human readable text, preferring `message` over `error`.
    pub fn text(&self) -> Option<String> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_serialize_to_empty_object() {
        let json = serde_json::to_value(ListParams::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
        assert!(ListParams::default().is_empty());
    }

    #[test]
    fn page_params_keep_both_fields() {
        let json = serde_json::to_value(ListParams::page(25, 50)).unwrap();
        assert_eq!(json, serde_json::json!({ "limit": 25, "offset": 50 }));
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":"Invalid request body","message":"email is required"}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("email is required"));
    }

    #[test]
    fn error_body_falls_back_to_error() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"Charge point not found"}"#).unwrap();
        assert_eq!(body.text().as_deref(), Some("Charge point not found"));

        let blank: ApiErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(blank.text(), None);
    }
}
