use serde::{Deserialize, Serialize};

/// Operational status of a charge point as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargePointStatus {
    Available,
    Occupied,
    Charging,
    Faulted,
    Unavailable,
    Reserved,
}

impl ChargePointStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ChargePointStatus::Available => "Available",
            ChargePointStatus::Occupied => "Occupied",
            ChargePointStatus::Charging => "Charging",
            ChargePointStatus::Faulted => "Faulted",
            ChargePointStatus::Unavailable => "Unavailable",
            ChargePointStatus::Reserved => "Reserved",
        }
    }

    pub fn all() -> Vec<ChargePointStatus> {
        vec![
            ChargePointStatus::Available,
            ChargePointStatus::Occupied,
            ChargePointStatus::Charging,
            ChargePointStatus::Faulted,
            ChargePointStatus::Unavailable,
            ChargePointStatus::Reserved,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Statuses the overview counts as "online".
    pub fn is_online(&self) -> bool {
        matches!(self, ChargePointStatus::Available | ChargePointStatus::Charging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in ChargePointStatus::all() {
            assert_eq!(ChargePointStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ChargePointStatus::from_code("available"), None);
    }

    #[test]
    fn online_matches_backend_counting() {
        assert!(ChargePointStatus::Available.is_online());
        assert!(ChargePointStatus::Charging.is_online());
        assert!(!ChargePointStatus::Faulted.is_online());
        assert!(!ChargePointStatus::Occupied.is_online());
    }
}
