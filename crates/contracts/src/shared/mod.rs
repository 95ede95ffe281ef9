pub mod api;
pub mod serde_helpers;
