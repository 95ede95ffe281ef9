use serde::{Deserialize, Serialize};

use crate::domain::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_reads_access_token() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": "eyJhbGciOiJIUzI1NiJ9.e30.sig",
            "user": { "id": 1, "name": "Admin", "email": "admin@csms.local", "role": "admin", "status": "active", "idTags": null }
        }))
        .unwrap();

        assert_eq!(response.access_token, "eyJhbGciOiJIUzI1NiJ9.e30.sig");
        assert!(response.user.is_admin());
    }
}
