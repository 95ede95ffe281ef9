pub mod badge;

pub use badge::{status_label, status_variant, BadgeVariant, StatusBadge, StatusKind};
