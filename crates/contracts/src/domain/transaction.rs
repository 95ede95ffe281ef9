use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::TransactionStatus;

use super::charge_point::ChargePoint;
use super::id_tag::IdTag;

/// A charging session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u32,
    #[serde(default)]
    pub charge_point_id: u32,
    #[serde(default)]
    pub connector_id: i32,
    #[serde(default)]
    pub transaction_id: i32,
    #[serde(default)]
    pub id_tag_id: u32,
    #[serde(default)]
    pub start_meter_value: f64,
    #[serde(default)]
    pub stop_meter_value: f64,
    #[serde(default)]
    pub current_meter_value: f64,
    #[serde(default)]
    pub energy_consumed: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stop_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id_tag: Option<Box<IdTag>>,
    #[serde(default)]
    pub charge_point: Option<Box<ChargePoint>>,
}

impl Transaction {
    pub fn known_status(&self) -> Option<TransactionStatus> {
        TransactionStatus::from_code(&self.status)
    }

    /// Code of the preloaded charge point, if the backend sent one.
    pub fn charge_point_code(&self) -> Option<&str> {
        self.charge_point
            .as_deref()
            .map(|cp| cp.charge_point_code.as_str())
            .filter(|code| !code.is_empty())
    }

    /// Tag value of the preloaded ID tag, if the backend sent one.
    pub fn id_tag_value(&self) -> Option<&str> {
        self.id_tag
            .as_deref()
            .map(|tag| tag.tag.as_str())
            .filter(|tag| !tag.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.stop_time.is_none() && self.known_status() == Some(TransactionStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_running_transaction_with_relations() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 11,
            "chargePointId": 7,
            "connectorId": 1,
            "transactionId": 1001,
            "idTagId": 3,
            "startMeterValue": 1200.0,
            "stopMeterValue": 0,
            "currentMeterValue": 5400.5,
            "energyConsumed": 4.2,
            "totalCost": 6300,
            "startTime": "2024-05-01T09:00:00Z",
            "stopTime": null,
            "status": "Active",
            "reason": "",
            "idTag": { "id": 3, "tag": "RFID-01", "status": "Accepted", "userId": 2 },
            "chargePoint": { "id": 7, "chargePointCode": "CP-007", "connectors": null }
        }))
        .unwrap();

        assert!(tx.is_active());
        assert_eq!(tx.charge_point_code(), Some("CP-007"));
        assert_eq!(tx.id_tag_value(), Some("RFID-01"));
        assert_eq!(tx.total_cost, 6300.0);
    }

    #[test]
    fn empty_relations_read_as_missing() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 12,
            "status": "Completed",
            "stopTime": "2024-05-01T10:00:00Z",
            "idTag": { "id": 0, "tag": "" },
            "chargePoint": { "id": 0, "chargePointCode": "" }
        }))
        .unwrap();

        assert!(!tx.is_active());
        assert_eq!(tx.charge_point_code(), None);
        assert_eq!(tx.id_tag_value(), None);
    }
}
