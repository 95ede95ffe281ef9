use serde::{Deserialize, Serialize};

/// OCPP remote operations the dashboard can ask the backend to relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCommandKind {
    RemoteStartTransaction,
    RemoteStopTransaction,
    Reset,
    UnlockConnector,
    ChangeAvailability,
    ClearCache,
}

impl RemoteCommandKind {
    pub fn code(&self) -> &'static str {
        match self {
            RemoteCommandKind::RemoteStartTransaction => "RemoteStartTransaction",
            RemoteCommandKind::RemoteStopTransaction => "RemoteStopTransaction",
            RemoteCommandKind::Reset => "Reset",
            RemoteCommandKind::UnlockConnector => "UnlockConnector",
            RemoteCommandKind::ChangeAvailability => "ChangeAvailability",
            RemoteCommandKind::ClearCache => "ClearCache",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RemoteCommandKind::RemoteStartTransaction => "Start transaction",
            RemoteCommandKind::RemoteStopTransaction => "Stop transaction",
            RemoteCommandKind::Reset => "Reset",
            RemoteCommandKind::UnlockConnector => "Unlock connector",
            RemoteCommandKind::ChangeAvailability => "Change availability",
            RemoteCommandKind::ClearCache => "Clear cache",
        }
    }

    pub fn all() -> Vec<RemoteCommandKind> {
        vec![
            RemoteCommandKind::RemoteStartTransaction,
            RemoteCommandKind::RemoteStopTransaction,
            RemoteCommandKind::Reset,
            RemoteCommandKind::UnlockConnector,
            RemoteCommandKind::ChangeAvailability,
            RemoteCommandKind::ClearCache,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }

    /// Commands addressed to a single connector.
    pub fn needs_connector(&self) -> bool {
        matches!(
            self,
            RemoteCommandKind::RemoteStartTransaction | RemoteCommandKind::UnlockConnector
        )
    }

    pub fn needs_id_tag(&self) -> bool {
        matches!(self, RemoteCommandKind::RemoteStartTransaction)
    }

    pub fn needs_transaction(&self) -> bool {
        matches!(self, RemoteCommandKind::RemoteStopTransaction)
    }
}
