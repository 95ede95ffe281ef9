use contracts::domain::User;
use contracts::shared::api::MessageResponse;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils::{get_json, post_empty, post_json_public, ApiError};

/// Login with e-mail and password
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    post_json_public("/api/v1/auth/login", request).await
}

/// Logout (server side token revocation)
pub async fn logout() -> Result<MessageResponse, ApiError> {
    post_empty("/api/v1/auth/logout").await
}

/// Get current user info
pub async fn me() -> Result<User, ApiError> {
    get_json("/api/v1/auth/me").await
}
