pub mod confirm_dialog;
pub mod notification;
pub mod stat_card;
pub mod ui;
pub mod weekly_chart;
