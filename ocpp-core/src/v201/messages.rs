use std::fmt;

use chrono::{DateTime, Utc};

use super::types::{
    BootReason, ChargingStation, RegistrationStatus, ResetStatus, ResetType, StatusInfo,
};
use crate::format::{check_max_len, ErrorCode, Payload, RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationRequest {
    pub charging_station: ChargingStation,
    pub reason: BootReason,
}

impl Payload for BootNotificationRequest {
    fn validate(&self) -> Result<(), String> {
        self.charging_station.validate()
    }
}

impl RequestPayload for BootNotificationRequest {
    const ACTION: &'static str = "BootNotification";
    const FORMAT_ERROR: ErrorCode = ErrorCode::FormatViolation;
    type Response = BootNotificationResponse;
}

impl fmt::Display for BootNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} ({:?})",
            self.charging_station.vendor_name, self.charging_station.model, self.reason
        )
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationResponse {
    pub current_time: DateTime<Utc>,
    pub interval: i64,
    pub status: RegistrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl Payload for BootNotificationResponse {
    fn validate(&self) -> Result<(), String> {
        match &self.status_info {
            Some(info) => info.validate(),
            None => Ok(()),
        }
    }
}

impl ResponsePayload for BootNotificationResponse {
    fn failure_default() -> Self {
        Self {
            current_time: DateTime::<Utc>::UNIX_EPOCH,
            interval: 0,
            status: RegistrationStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeartbeatRequest {}

impl RequestPayload for HeartbeatRequest {
    const ACTION: &'static str = "Heartbeat";
    const FORMAT_ERROR: ErrorCode = ErrorCode::FormatViolation;
    type Response = HeartbeatResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    pub current_time: DateTime<Utc>,
}

impl ResponsePayload for HeartbeatResponse {
    fn failure_default() -> Self {
        Self {
            current_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    #[serde(rename = "type")]
    pub kind: ResetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evse_id: Option<i32>,
}

impl RequestPayload for ResetRequest {
    const ACTION: &'static str = "Reset";
    const FORMAT_ERROR: ErrorCode = ErrorCode::FormatViolation;
    type Response = ResetResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub status: ResetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for ResetResponse {
    fn failure_default() -> Self {
        Self {
            status: ResetStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEventNotificationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_info: Option<String>,
}

impl Payload for SecurityEventNotificationRequest {
    fn validate(&self) -> Result<(), String> {
        check_max_len("type", &self.kind, 50)?;
        if let Some(tech_info) = &self.tech_info {
            check_max_len("techInfo", tech_info, 255)?;
        }
        Ok(())
    }
}

impl RequestPayload for SecurityEventNotificationRequest {
    const ACTION: &'static str = "SecurityEventNotification";
    const FORMAT_ERROR: ErrorCode = ErrorCode::FormatViolation;
    type Response = SecurityEventNotificationResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SecurityEventNotificationResponse {}

impl ResponsePayload for SecurityEventNotificationResponse {
    fn failure_default() -> Self {
        Self {}
    }
}

plain_payload!(
    HeartbeatRequest,
    HeartbeatResponse,
    ResetRequest,
    ResetResponse,
    SecurityEventNotificationResponse,
);
display_as_json!(
    BootNotificationResponse,
    HeartbeatRequest,
    HeartbeatResponse,
    ResetRequest,
    ResetResponse,
    SecurityEventNotificationRequest,
    SecurityEventNotificationResponse,
);
