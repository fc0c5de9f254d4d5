use std::fmt;

use super::super::types::{ResetStatus, ResetType};
use crate::format::{RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    #[serde(rename = "type")]
    pub kind: ResetType,
}

impl RequestPayload for ResetRequest {
    const ACTION: &'static str = "Reset";
    type Response = ResetResponse;
}

impl fmt::Display for ResetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} reset", self.kind)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub status: ResetStatus,
}

impl ResponsePayload for ResetResponse {
    fn failure_default() -> Self {
        Self {
            status: ResetStatus::Rejected,
        }
    }
}

impl fmt::Display for ResetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.status)
    }
}

plain_payload!(ResetRequest, ResetResponse);
