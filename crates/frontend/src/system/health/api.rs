use contracts::system::health::HealthStatus;

use crate::shared::api_utils::{get_json_public, ApiError};

/// Unauthenticated liveness probe of the backend
pub async fn get_health() -> Result<HealthStatus, ApiError> {
    get_json_public("/health").await
}
