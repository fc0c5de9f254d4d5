use chrono::{DateTime, Utc};

use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

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
    type Response = SecurityEventNotificationResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SecurityEventNotificationResponse {}

impl Payload for SecurityEventNotificationResponse {}

impl ResponsePayload for SecurityEventNotificationResponse {
    fn failure_default() -> Self {
        Self {}
    }
}

display_as_json!(SecurityEventNotificationRequest, SecurityEventNotificationResponse);
