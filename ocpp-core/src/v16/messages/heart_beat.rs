use chrono::{DateTime, Utc};

use crate::format::{RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {}

impl RequestPayload for HeartbeatRequest {
    const ACTION: &'static str = "Heartbeat";
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

plain_payload!(HeartbeatRequest, HeartbeatResponse);
display_as_json!(HeartbeatRequest, HeartbeatResponse);
