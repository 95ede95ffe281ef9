pub mod command_dialog;
pub mod details;
pub mod list;
pub mod status_dialog;

pub use details::ChargePointDetails;
pub use list::ChargePointList;
