pub mod dashboard_store;
pub mod resource;
