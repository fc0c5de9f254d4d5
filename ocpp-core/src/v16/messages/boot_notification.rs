use std::fmt;

use chrono::{DateTime, Utc};

use super::super::types::RegistrationStatus;
use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_box_serial_number: Option<String>,
    pub charge_point_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_point_serial_number: Option<String>,
    pub charge_point_vendor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_type: Option<String>,
}

impl BootNotificationRequest {
    pub fn new(vendor: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            charge_box_serial_number: None,
            charge_point_model: model.into(),
            charge_point_serial_number: None,
            charge_point_vendor: vendor.into(),
            firmware_version: None,
            iccid: None,
            imsi: None,
            meter_serial_number: None,
            meter_type: None,
        }
    }
}

impl Payload for BootNotificationRequest {
    fn validate(&self) -> Result<(), String> {
        check_max_len("chargePointVendor", &self.charge_point_vendor, 20)?;
        check_max_len("chargePointModel", &self.charge_point_model, 20)
    }
}

impl RequestPayload for BootNotificationRequest {
    const ACTION: &'static str = "BootNotification";
    type Response = BootNotificationResponse;
}

impl fmt::Display for BootNotificationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.charge_point_vendor, self.charge_point_model)?;
        if let Some(firmware) = &self.firmware_version {
            write!(f, " (firmware {firmware})")?;
        }
        Ok(())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct BootNotificationResponse {
    pub current_time: DateTime<Utc>,
    pub interval: u64,
    pub status: RegistrationStatus,
}

impl Payload for BootNotificationResponse {}

impl ResponsePayload for BootNotificationResponse {
    fn failure_default() -> Self {
        Self {
            current_time: DateTime::<Utc>::UNIX_EPOCH,
            interval: 0,
            status: RegistrationStatus::Rejected,
        }
    }
}

impl fmt::Display for BootNotificationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, heartbeat every {}s at {}", self.status, self.interval, self.current_time)
    }
}
