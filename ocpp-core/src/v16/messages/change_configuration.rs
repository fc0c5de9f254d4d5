use super::super::types::ConfigurationStatus;
use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChangeConfigurationRequest {
    pub key: String,
    pub value: String,
}

impl Payload for ChangeConfigurationRequest {
    fn validate(&self) -> Result<(), String> {
        check_max_len("key", &self.key, 50)?;
        check_max_len("value", &self.value, 500)
    }
}

impl RequestPayload for ChangeConfigurationRequest {
    const ACTION: &'static str = "ChangeConfiguration";
    type Response = ChangeConfigurationResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChangeConfigurationResponse {
    pub status: ConfigurationStatus,
}

impl Payload for ChangeConfigurationResponse {}

impl ResponsePayload for ChangeConfigurationResponse {
    fn failure_default() -> Self {
        Self {
            status: ConfigurationStatus::Rejected,
        }
    }
}

display_as_json!(ChangeConfigurationRequest, ChangeConfigurationResponse);
