use super::super::types::DataTransferStatus;
use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferRequest {
    #[serde(rename = "vendorId")]
    pub vendor_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Payload for DataTransferRequest {
    fn validate(&self) -> Result<(), String> {
        check_max_len("vendorId", &self.vendor_string, 255)?;
        if let Some(message_id) = &self.message_id {
            check_max_len("messageId", message_id, 50)?;
        }
        Ok(())
    }
}

impl RequestPayload for DataTransferRequest {
    const ACTION: &'static str = "DataTransfer";
    type Response = DataTransferResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DataTransferResponse {
    pub status: DataTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Payload for DataTransferResponse {}

impl ResponsePayload for DataTransferResponse {
    fn failure_default() -> Self {
        Self {
            status: DataTransferStatus::Rejected,
            data: None,
        }
    }
}

display_as_json!(DataTransferRequest, DataTransferResponse);
