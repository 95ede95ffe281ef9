use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    Completed,
    Cancelled,
    Failed,
    Pending,
}

impl TransactionStatus {
    pub fn code(&self) -> &'static str {
        match self {
            TransactionStatus::Active => "Active",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Cancelled => "Cancelled",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Pending => "Pending",
        }
    }

    pub fn all() -> Vec<TransactionStatus> {
        vec![
            TransactionStatus::Active,
            TransactionStatus::Completed,
            TransactionStatus::Cancelled,
            TransactionStatus::Failed,
            TransactionStatus::Pending,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}
