use contracts::domain::{CreateUserRequest, UpdateUserRequest, User};
use contracts::shared::api::{ListParams, MessageResponse};
use serde_json::Value;

use crate::shared::api_utils::{
    delete_json, get_json, get_json_with_query, post_json, put_json, ApiError,
};

const BASE: &str = "/api/v1/users";

/// Fetch all users
pub async fn get_users(params: &ListParams) -> Result<Vec<User>, ApiError> {
    get_json_with_query(BASE, params).await
}

pub async fn get_user(id: u32) -> Result<User, ApiError> {
    get_json(&format!("{}/{}", BASE, id)).await
}

/// Create new user. The reply is an acknowledgement, not the entity.
pub async fn create_user(request: &CreateUserRequest) -> Result<Value, ApiError> {
    post_json(BASE, request).await
}

/// Update user
pub async fn update_user(id: u32, request: &UpdateUserRequest) -> Result<Value, ApiError> {
    put_json(&format!("{}/{}", BASE, id), request).await
}

/// Delete user
pub async fn delete_user(id: u32) -> Result<MessageResponse, ApiError> {
    delete_json(&format!("{}/{}", BASE, id)).await
}
