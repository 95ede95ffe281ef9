use std::future::Future;

use contracts::dashboards::overview::{DashboardStats, WeeklyChart};
use contracts::domain::{
    ChargePoint, CommandAck, CreateUserRequest, IdTag, IdTagRequest, RemoteCommandRequest,
    StatusUpdateRequest, Transaction, UpdateUserRequest, User,
};
use contracts::shared::api::ListParams;
use leptos::prelude::*;

use super::resource::ResourceState;
use crate::dashboards::d100_overview::api as overview_api;
use crate::domain::a101_charge_point::api as charge_point_api;
use crate::domain::a102_transaction::api as transaction_api;
use crate::domain::a103_id_tag::api as id_tag_api;
use crate::shared::api_utils::ApiError;
use crate::system::users::api as users_api;

/// Dashboard store: overview numbers and the last fetched list of every
/// resource. Mutations refresh the affected list and hand errors back.
#[derive(Clone, Copy)]
pub struct DashboardStore {
    pub stats: RwSignal<DashboardStats>,
    pub weekly_chart: RwSignal<WeeklyChart>,
    pub charge_points: RwSignal<ResourceState<ChargePoint>>,
    pub transactions: RwSignal<ResourceState<Transaction>>,
    pub users: RwSignal<ResourceState<User>>,
    pub id_tags: RwSignal<ResourceState<IdTag>>,
}

async fn load_into<T, F>(target: RwSignal<ResourceState<T>>, what: &str, request: F)
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<Vec<T>, ApiError>>,
{
    target.update(|s| s.begin());
    let result = request.await.map_err(|e| {
        log::error!("Error fetching {}: {}", what, e);
        e.to_string()
    });
    target.update(|s| s.finish(result));
}

fn log_failure<T>(what: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        log::error!("Error {}: {}", what, e);
    }
    result
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            stats: RwSignal::new(DashboardStats::default()),
            weekly_chart: RwSignal::new(WeeklyChart::default()),
            charge_points: RwSignal::new(ResourceState::default()),
            transactions: RwSignal::new(ResourceState::default()),
            users: RwSignal::new(ResourceState::default()),
            id_tags: RwSignal::new(ResourceState::default()),
        }
    }

    // Overview

    pub async fn fetch_dashboard_stats(&self) {
        match overview_api::get_dashboard_stats().await {
            Ok(stats) => self.stats.set(stats),
            Err(e) => log::error!("Error fetching dashboard stats: {}", e),
        }
    }

    pub async fn fetch_weekly_chart(&self) {
        match overview_api::get_weekly_chart().await {
            Ok(chart) => self.weekly_chart.set(chart),
            Err(e) => log::error!("Error fetching weekly chart: {}", e),
        }
    }

    // Charge points

    pub async fn fetch_charge_points(&self, params: ListParams) {
        load_into(
            self.charge_points,
            "charge points",
            charge_point_api::get_charge_points(&params),
        )
        .await;
    }

    pub async fn update_charge_point_status(&self, id: u32, status: String) -> Result<(), ApiError> {
        let request = StatusUpdateRequest { status };
        log_failure(
            "updating charge point status",
            charge_point_api::update_charge_point_status(id, &request).await,
        )?;
        self.fetch_charge_points(ListParams::default()).await;
        Ok(())
    }

    pub async fn send_remote_command(
        &self,
        charge_point_id: u32,
        command: RemoteCommandRequest,
    ) -> Result<CommandAck, ApiError> {
        let ack = log_failure(
            "sending remote command",
            charge_point_api::send_remote_command(charge_point_id, &command).await,
        )?;
        self.fetch_charge_points(ListParams::default()).await;
        Ok(ack)
    }

    // Transactions

    pub async fn fetch_transactions(&self, params: ListParams) {
        load_into(
            self.transactions,
            "transactions",
            transaction_api::get_transactions(&params),
        )
        .await;
    }

    // Users

    pub async fn fetch_users(&self, params: ListParams) {
        load_into(self.users, "users", users_api::get_users(&params)).await;
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<(), ApiError> {
        log_failure("creating user", users_api::create_user(&request).await)?;
        self.fetch_users(ListParams::default()).await;
        Ok(())
    }

    pub async fn update_user(&self, id: u32, request: UpdateUserRequest) -> Result<(), ApiError> {
        log_failure("updating user", users_api::update_user(id, &request).await)?;
        self.fetch_users(ListParams::default()).await;
        Ok(())
    }

    pub async fn delete_user(&self, id: u32) -> Result<(), ApiError> {
        log_failure("deleting user", users_api::delete_user(id).await)?;
        self.fetch_users(ListParams::default()).await;
        Ok(())
    }

    // ID tags

    pub async fn fetch_id_tags(&self, params: ListParams) {
        load_into(self.id_tags, "ID tags", id_tag_api::get_id_tags(&params)).await;
    }

    pub async fn create_id_tag(&self, request: IdTagRequest) -> Result<(), ApiError> {
        log_failure("creating ID tag", id_tag_api::create_id_tag(&request).await)?;
        self.fetch_id_tags(ListParams::default()).await;
        Ok(())
    }

    pub async fn update_id_tag(&self, id: u32, request: IdTagRequest) -> Result<(), ApiError> {
        log_failure("updating ID tag", id_tag_api::update_id_tag(id, &request).await)?;
        self.fetch_id_tags(ListParams::default()).await;
        Ok(())
    }

    pub async fn delete_id_tag(&self, id: u32) -> Result<(), ApiError> {
        log_failure("deleting ID tag", id_tag_api::delete_id_tag(id).await)?;
        self.fetch_id_tags(ListParams::default()).await;
        Ok(())
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_dashboard_store() -> DashboardStore {
    use_context::<DashboardStore>().expect("DashboardStore not provided in component tree")
}
