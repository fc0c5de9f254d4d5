use super::super::types::KeyValue;
use crate::format::{RequestPayload, ResponsePayload, SetOf};

/// Keys are a set: asking twice for the same key yields one entry.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<SetOf<String>>,
}

impl RequestPayload for GetConfigurationRequest {
    const ACTION: &'static str = "GetConfiguration";
    type Response = GetConfigurationResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigurationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_key: Option<SetOf<KeyValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_key: Option<SetOf<String>>,
}

impl ResponsePayload for GetConfigurationResponse {
    fn failure_default() -> Self {
        Self::default()
    }
}

plain_payload!(GetConfigurationRequest, GetConfigurationResponse);
display_as_json!(GetConfigurationRequest, GetConfigurationResponse);
