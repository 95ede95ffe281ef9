use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ChargePointStatus, RemoteCommandKind};
use crate::shared::serde_helpers::null_to_default;

/// A charging station registered with the CSMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargePoint {
    pub id: u32,
    #[serde(default)]
    pub charge_point_code: String,
    #[serde(default)]
    pub charge_box_serial_number: String,
    #[serde(default)]
    pub charge_point_model: String,
    #[serde(default)]
    pub charge_point_vendor: String,
    #[serde(default)]
    pub charge_point_serial_number: String,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default)]
    pub iccid: String,
    #[serde(default)]
    pub imsi: String,
    #[serde(default)]
    pub meter_type: String,
    #[serde(default)]
    pub meter_serial_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_heartbeat: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_boot_notification: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub connectors: Vec<Connector>,
}

impl ChargePoint {
    /// Parsed status, `None` for values outside the known vocabulary.
    pub fn known_status(&self) -> Option<ChargePointStatus> {
        ChargePointStatus::from_code(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: u32,
    #[serde(default)]
    pub charge_point_id: u32,
    #[serde(default)]
    pub connector_id: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub vendor_error_code: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `PATCH /charge-points/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl From<ChargePointStatus> for StatusUpdateRequest {
    fn from(status: ChargePointStatus) -> Self {
        Self {
            status: status.code().to_string(),
        }
    }
}

/// Body of `POST /charge-points/{id}/commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommandRequest {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<i32>,
}

impl RemoteCommandRequest {
    pub fn new(kind: RemoteCommandKind) -> Self {
        Self {
            command: kind.code().to_string(),
            connector_id: None,
            id_tag: None,
            transaction_id: None,
        }
    }

    pub fn with_connector(mut self, connector_id: i32) -> Self {
        self.connector_id = Some(connector_id);
        self
    }

    pub fn with_id_tag(mut self, id_tag: impl Into<String>) -> Self {
        self.id_tag = Some(id_tag.into());
        self
    }

    pub fn with_transaction(mut self, transaction_id: i32) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }
}

/// Acknowledgement returned after a remote command was accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub charge_point_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_charge_point() {
        let cp: ChargePoint = serde_json::from_value(json!({
            "id": 7,
            "chargePointCode": "CP-007",
            "chargeBoxSerialNumber": "",
            "chargePointModel": "Wallbox 22",
            "chargePointVendor": "ABB",
            "chargePointSerialNumber": "SN-1",
            "firmwareVersion": "1.4.2",
            "iccid": "",
            "imsi": "",
            "meterType": "",
            "meterSerialNumber": "",
            "status": "Available",
            "lastHeartbeat": "2024-05-01T08:30:00+07:00",
            "lastBootNotification": "0001-01-01T00:00:00Z",
            "createdAt": "2024-04-01T00:00:00Z",
            "updatedAt": "2024-05-01T01:30:00Z",
            "connectors": [
                { "id": 1, "chargePointId": 7, "connectorId": 1, "status": "Charging",
                  "errorCode": "NoError", "info": "", "vendorId": "", "vendorErrorCode": "" }
            ],
            "transactions": null
        }))
        .unwrap();

        assert_eq!(cp.charge_point_code, "CP-007");
        assert_eq!(cp.known_status(), Some(ChargePointStatus::Available));
        assert_eq!(cp.connectors.len(), 1);
        assert_eq!(cp.connectors[0].status, "Charging");
        assert_eq!(
            cp.last_heartbeat.unwrap().to_rfc3339(),
            "2024-05-01T01:30:00+00:00"
        );
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let cp: ChargePoint =
            serde_json::from_value(json!({ "id": 1, "status": "SuspendedEV", "connectors": null }))
                .unwrap();
        assert_eq!(cp.status, "SuspendedEV");
        assert_eq!(cp.known_status(), None);
        assert!(cp.connectors.is_empty());
    }

    #[test]
    fn command_body_omits_unset_fields() {
        let body = RemoteCommandRequest::new(RemoteCommandKind::Reset);
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "command": "Reset" }));

        let start = RemoteCommandRequest::new(RemoteCommandKind::RemoteStartTransaction)
            .with_connector(2)
            .with_id_tag("RFID-01");
        assert_eq!(
            serde_json::to_value(&start).unwrap(),
            json!({ "command": "RemoteStartTransaction", "connectorId": 2, "idTag": "RFID-01" })
        );
    }

    #[test]
    fn status_update_uses_backend_code() {
        let body = StatusUpdateRequest::from(ChargePointStatus::Unavailable);
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "status": "Unavailable" }));
    }
}
