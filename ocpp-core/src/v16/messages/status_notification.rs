use std::fmt;

use chrono::{DateTime, Utc};

use super::super::types::{ChargePointErrorCode, ChargePointStatus};
use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotificationRequest {
    pub connector_id: usize,
    pub error_code: ChargePointErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub status: ChargePointStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_error_code: Option<String>,
}

impl StatusNotificationRequest {
    pub fn new(connector_id: usize, status: ChargePointStatus, error_code: ChargePointErrorCode) -> Self {
        Self {
            connector_id,
            error_code,
            info: None,
            status,
            timestamp: None,
            vendor_id: None,
            vendor_error_code: None,
        }
    }
}

impl Payload for StatusNotificationRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(info) = &self.info {
            check_max_len("info", info, 50)?;
        }
        Ok(())
    }
}

impl RequestPayload for StatusNotificationRequest {
    const ACTION: &'static str = "StatusNotification";
    type Response = StatusNotificationResponse;
}

impl fmt::Display for StatusNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector {} {:?} ({:?})", self.connector_id, self.status, self.error_code)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatusNotificationResponse {}

impl Payload for StatusNotificationResponse {}

impl ResponsePayload for StatusNotificationResponse {
    fn failure_default() -> Self {
        Self {}
    }
}

display_as_json!(StatusNotificationResponse);
