use contracts::dashboards::overview::{DashboardStats, WeeklyChart};

use crate::shared::api_utils::{get_json, ApiError};

/// Aggregate counters for the overview cards
pub async fn get_dashboard_stats() -> Result<DashboardStats, ApiError> {
    get_json("/api/v1/dashboard/stats").await
}

/// Sessions and energy per day for the last seven days
pub async fn get_weekly_chart() -> Result<WeeklyChart, ApiError> {
    get_json("/api/v1/dashboard/weekly-chart").await
}
