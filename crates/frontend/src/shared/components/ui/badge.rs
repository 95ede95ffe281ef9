use contracts::enums::{ChargePointStatus, IdTagStatus, TransactionStatus, UserRole, UserStatus};
use leptos::prelude::*;
use thaw::{Badge, BadgeAppearance, BadgeColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    Error,
    Neutral,
}

impl BadgeVariant {
    pub fn color(&self) -> BadgeColor {
        match self {
            BadgeVariant::Primary => BadgeColor::Brand,
            BadgeVariant::Success => BadgeColor::Success,
            BadgeVariant::Warning => BadgeColor::Warning,
            BadgeVariant::Error => BadgeColor::Danger,
            BadgeVariant::Neutral => BadgeColor::Informative,
        }
    }
}

/// Which vocabulary a raw status string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    ChargePoint,
    Transaction,
    IdTag,
    UserStatus,
    UserRole,
}

/// Badge colour for a backend status string. Unknown values are neutral.
pub fn status_variant(kind: StatusKind, status: &str) -> BadgeVariant {
    match kind {
        StatusKind::ChargePoint => match ChargePointStatus::from_code(status) {
            Some(ChargePointStatus::Available) => BadgeVariant::Success,
            Some(ChargePointStatus::Charging) | Some(ChargePointStatus::Occupied) => {
                BadgeVariant::Primary
            }
            Some(ChargePointStatus::Reserved) => BadgeVariant::Warning,
            Some(ChargePointStatus::Faulted) | Some(ChargePointStatus::Unavailable) => {
                BadgeVariant::Error
            }
            None => BadgeVariant::Neutral,
        },
        StatusKind::Transaction => match TransactionStatus::from_code(status) {
            Some(TransactionStatus::Active) => BadgeVariant::Primary,
            Some(TransactionStatus::Completed) => BadgeVariant::Success,
            Some(TransactionStatus::Pending) => BadgeVariant::Warning,
            Some(TransactionStatus::Cancelled) | Some(TransactionStatus::Failed) => {
                BadgeVariant::Error
            }
            None => BadgeVariant::Neutral,
        },
        StatusKind::IdTag => match IdTagStatus::from_code(status) {
            Some(IdTagStatus::Accepted) => BadgeVariant::Success,
            Some(IdTagStatus::ConcurrentTx) => BadgeVariant::Warning,
            Some(_) => BadgeVariant::Error,
            None => BadgeVariant::Neutral,
        },
        StatusKind::UserStatus => match UserStatus::from_code(status) {
            Some(UserStatus::Active) => BadgeVariant::Success,
            Some(UserStatus::Inactive) => BadgeVariant::Neutral,
            Some(UserStatus::Blocked) => BadgeVariant::Error,
            None => BadgeVariant::Neutral,
        },
        StatusKind::UserRole => match UserRole::from_code(status) {
            Some(UserRole::Admin) => BadgeVariant::Primary,
            Some(UserRole::Operator) => BadgeVariant::Warning,
            _ => BadgeVariant::Neutral,
        },
    }
}

/// Human label for a status; role and user status have display names.
pub fn status_label(kind: StatusKind, status: &str) -> String {
    let label = match kind {
        StatusKind::UserStatus => UserStatus::from_code(status).map(|s| s.display_name()),
        StatusKind::UserRole => UserRole::from_code(status).map(|r| r.display_name()),
        _ => None,
    };
    match label {
        Some(l) => l.to_string(),
        None if status.is_empty() => "Unknown".to_string(),
        None => status.to_string(),
    }
}

/// Coloured badge for a raw status string.
#[component]
pub fn StatusBadge(kind: StatusKind, #[prop(into)] status: Signal<String>) -> impl IntoView {
    move || {
        let status = status.get();
        let color = status_variant(kind, &status).color();
        view! {
            <Badge appearance=BadgeAppearance::Tint color=color>
                {status_label(kind, &status)}
            </Badge>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_point_variants() {
        assert_eq!(status_variant(StatusKind::ChargePoint, "Available"), BadgeVariant::Success);
        assert_eq!(status_variant(StatusKind::ChargePoint, "Charging"), BadgeVariant::Primary);
        assert_eq!(status_variant(StatusKind::ChargePoint, "Faulted"), BadgeVariant::Error);
        assert_eq!(status_variant(StatusKind::ChargePoint, "Rebooting"), BadgeVariant::Neutral);
    }

    #[test]
    fn transaction_and_tag_variants() {
        assert_eq!(status_variant(StatusKind::Transaction, "Active"), BadgeVariant::Primary);
        assert_eq!(status_variant(StatusKind::Transaction, "Completed"), BadgeVariant::Success);
        assert_eq!(status_variant(StatusKind::IdTag, "Blocked"), BadgeVariant::Error);
        assert_eq!(status_variant(StatusKind::IdTag, "Accepted"), BadgeVariant::Success);
    }

    #[test]
    fn labels_use_display_names() {
        assert_eq!(status_label(StatusKind::UserRole, "admin"), "Administrator");
        assert_eq!(status_label(StatusKind::UserStatus, "blocked"), "Blocked");
        assert_eq!(status_label(StatusKind::ChargePoint, "Charging"), "Charging");
        assert_eq!(status_label(StatusKind::ChargePoint, ""), "Unknown");
    }
}
