use contracts::domain::{IdTag, IdTagRequest};
use contracts::shared::api::{ListParams, MessageResponse};
use serde_json::Value;

use crate::shared::api_utils::{
    delete_json, get_json, get_json_with_query, post_json, put_json, ApiError,
};

const BASE: &str = "/api/v1/id-tags";

/// Fetch all ID tags (owner preloaded)
pub async fn get_id_tags(params: &ListParams) -> Result<Vec<IdTag>, ApiError> {
    get_json_with_query(BASE, params).await
}

/// Fetch the tags owned by one user
pub async fn get_id_tags_by_user(user_id: u32) -> Result<Vec<IdTag>, ApiError> {
    get_json(&format!("{}/user/{}", BASE, user_id)).await
}

pub async fn get_id_tag(id: u32) -> Result<IdTag, ApiError> {
    get_json(&format!("{}/{}", BASE, id)).await
}

/// Replies carry a message only; callers refetch the list.
pub async fn create_id_tag(request: &IdTagRequest) -> Result<Value, ApiError> {
    post_json(BASE, request).await
}

pub async fn update_id_tag(id: u32, request: &IdTagRequest) -> Result<Value, ApiError> {
    put_json(&format!("{}/{}", BASE, id), request).await
}

pub async fn delete_id_tag(id: u32) -> Result<MessageResponse, ApiError> {
    delete_json(&format!("{}/{}", BASE, id)).await
}
