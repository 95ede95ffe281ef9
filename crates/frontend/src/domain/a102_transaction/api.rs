use contracts::domain::Transaction;
use contracts::shared::api::ListParams;

use crate::shared::api_utils::{get_json, get_json_with_query, ApiError};

pub async fn get_transactions(params: &ListParams) -> Result<Vec<Transaction>, ApiError> {
    get_json_with_query("/api/v1/transactions", params).await
}

pub async fn get_transaction(id: u32) -> Result<Transaction, ApiError> {
    get_json(&format!("/api/v1/transactions/{}", id)).await
}
