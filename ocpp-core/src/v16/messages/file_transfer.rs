//! File exchange between a CSMS and a networking node or the stations behind
//! it. File contents travel base64 encoded.

use super::super::types::{FileTransferStatus, StatusInfo};
use crate::format::{check_max_len, Payload, RequestPayload, ResponsePayload};

fn check_file_name(file_name: &str) -> Result<(), String> {
    if file_name.is_empty() {
        return Err("fileName must not be empty".into());
    }
    check_max_len("fileName", file_name, 1024)
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SendFileRequest {
    pub file_name: String,
    pub file_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content_type: Option<String>,
    #[serde(rename = "fileSHA256", skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl Payload for SendFileRequest {
    fn validate(&self) -> Result<(), String> {
        check_file_name(&self.file_name)
    }
}

impl RequestPayload for SendFileRequest {
    const ACTION: &'static str = "SendFile";
    type Response = SendFileResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SendFileResponse {
    pub file_name: String,
    pub status: FileTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for SendFileResponse {
    fn failure_default() -> Self {
        Self {
            file_name: String::new(),
            status: FileTransferStatus::Error,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GetFileRequest {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl Payload for GetFileRequest {
    fn validate(&self) -> Result<(), String> {
        check_file_name(&self.file_name)
    }
}

impl RequestPayload for GetFileRequest {
    const ACTION: &'static str = "GetFile";
    type Response = GetFileResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GetFileResponse {
    pub file_name: String,
    pub status: FileTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content_type: Option<String>,
    #[serde(rename = "fileSHA256", skip_serializing_if = "Option::is_none")]
    pub file_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for GetFileResponse {
    fn failure_default() -> Self {
        Self {
            file_name: String::new(),
            status: FileTransferStatus::Error,
            file_content: None,
            file_content_type: None,
            file_sha256: None,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl Payload for DeleteFileRequest {
    fn validate(&self) -> Result<(), String> {
        check_file_name(&self.file_name)
    }
}

impl RequestPayload for DeleteFileRequest {
    const ACTION: &'static str = "DeleteFile";
    type Response = DeleteFileResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileResponse {
    pub file_name: String,
    pub status: FileTransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for DeleteFileResponse {
    fn failure_default() -> Self {
        Self {
            file_name: String::new(),
            status: FileTransferStatus::Error,
            status_info: None,
        }
    }
}

plain_payload!(SendFileResponse, GetFileResponse, DeleteFileResponse);
display_as_json!(
    SendFileResponse,
    GetFileRequest,
    GetFileResponse,
    DeleteFileRequest,
    DeleteFileResponse
);

// File contents can be large, keep them out of log lines.
impl std::fmt::Display for SendFileRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes encoded)", self.file_name, self.file_content.len())
    }
}
