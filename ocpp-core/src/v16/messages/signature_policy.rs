use super::super::types::{GenericStatus, SignaturePolicy, StatusInfo};
use crate::format::{RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AddSignaturePolicyRequest {
    pub signature_policy: SignaturePolicy,
}

impl RequestPayload for AddSignaturePolicyRequest {
    const ACTION: &'static str = "AddSignaturePolicy";
    type Response = AddSignaturePolicyResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AddSignaturePolicyResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for AddSignaturePolicyResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignaturePolicyRequest {
    pub signature_policy: SignaturePolicy,
}

impl RequestPayload for UpdateSignaturePolicyRequest {
    const ACTION: &'static str = "UpdateSignaturePolicy";
    type Response = UpdateSignaturePolicyResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignaturePolicyResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for UpdateSignaturePolicyResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSignaturePolicyRequest {
    pub signature_policy_id: String,
}

impl RequestPayload for DeleteSignaturePolicyRequest {
    const ACTION: &'static str = "DeleteSignaturePolicy";
    type Response = DeleteSignaturePolicyResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSignaturePolicyResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for DeleteSignaturePolicyResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

plain_payload!(
    AddSignaturePolicyRequest,
    AddSignaturePolicyResponse,
    UpdateSignaturePolicyRequest,
    UpdateSignaturePolicyResponse,
    DeleteSignaturePolicyRequest,
    DeleteSignaturePolicyResponse,
);
display_as_json!(
    AddSignaturePolicyRequest,
    AddSignaturePolicyResponse,
    UpdateSignaturePolicyRequest,
    UpdateSignaturePolicyResponse,
    DeleteSignaturePolicyRequest,
    DeleteSignaturePolicyResponse,
);
