use contracts::domain::{ChargePoint, CommandAck, RemoteCommandRequest, StatusUpdateRequest};
use contracts::shared::api::{ListParams, MessageResponse};

use crate::shared::api_utils::{get_json, get_json_with_query, patch_json, post_json, ApiError};

const BASE: &str = "/api/v1/charge-points";

/// Fetch charge points (with connectors)
pub async fn get_charge_points(params: &ListParams) -> Result<Vec<ChargePoint>, ApiError> {
    get_json_with_query(BASE, params).await
}

/// Fetch a single charge point
pub async fn get_charge_point(id: u32) -> Result<ChargePoint, ApiError> {
    get_json(&format!("{}/{}", BASE, id)).await
}

/// Set the operational status
pub async fn update_charge_point_status(
    id: u32,
    request: &StatusUpdateRequest,
) -> Result<MessageResponse, ApiError> {
    patch_json(&format!("{}/{}/status", BASE, id), request).await
}

/// Relay an OCPP remote command through the backend
pub async fn send_remote_command(
    charge_point_id: u32,
    command: &RemoteCommandRequest,
) -> Result<CommandAck, ApiError> {
    post_json(&format!("{}/{}/commands", BASE, charge_point_id), command).await
}
