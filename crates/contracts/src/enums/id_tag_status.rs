use serde::{Deserialize, Serialize};

/// OCPP authorization status of an ID tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdTagStatus {
    Accepted,
    Blocked,
    Expired,
    Invalid,
    ConcurrentTx,
}

impl IdTagStatus {
    pub fn code(&self) -> &'static str {
        match self {
            IdTagStatus::Accepted => "Accepted",
            IdTagStatus::Blocked => "Blocked",
            IdTagStatus::Expired => "Expired",
            IdTagStatus::Invalid => "Invalid",
            IdTagStatus::ConcurrentTx => "ConcurrentTx",
        }
    }

    pub fn all() -> Vec<IdTagStatus> {
        vec![
            IdTagStatus::Accepted,
            IdTagStatus::Blocked,
            IdTagStatus::Expired,
            IdTagStatus::Invalid,
            IdTagStatus::ConcurrentTx,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}
