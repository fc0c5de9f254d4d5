use std::fmt;

use super::super::types::{AvailabilityStatus, AvailabilityType};
use crate::format::{RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAvailabilityRequest {
    pub connector_id: usize,
    #[serde(rename = "type")]
    pub kind: AvailabilityType,
}

impl RequestPayload for ChangeAvailabilityRequest {
    const ACTION: &'static str = "ChangeAvailability";
    type Response = ChangeAvailabilityResponse;
}

impl fmt::Display for ChangeAvailabilityRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector {} -> {:?}", self.connector_id, self.kind)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChangeAvailabilityResponse {
    pub status: AvailabilityStatus,
}

impl ResponsePayload for ChangeAvailabilityResponse {
    fn failure_default() -> Self {
        Self {
            status: AvailabilityStatus::Rejected,
        }
    }
}

plain_payload!(ChangeAvailabilityRequest, ChangeAvailabilityResponse);
display_as_json!(ChangeAvailabilityResponse);
