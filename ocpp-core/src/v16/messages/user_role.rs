use super::super::types::{GenericStatus, StatusInfo, UserRole};
use crate::format::{RequestPayload, ResponsePayload};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRoleRequest {
    pub user_role: UserRole,
}

impl RequestPayload for AddUserRoleRequest {
    const ACTION: &'static str = "AddUserRole";
    type Response = AddUserRoleResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRoleResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for AddUserRoleResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    pub user_role: UserRole,
}

impl RequestPayload for UpdateUserRoleRequest {
    const ACTION: &'static str = "UpdateUserRole";
    type Response = UpdateUserRoleResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for UpdateUserRoleResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRoleRequest {
    pub user_role_id: String,
}

impl RequestPayload for DeleteUserRoleRequest {
    const ACTION: &'static str = "DeleteUserRole";
    type Response = DeleteUserRoleResponse;
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRoleResponse {
    pub status: GenericStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

impl ResponsePayload for DeleteUserRoleResponse {
    fn failure_default() -> Self {
        Self {
            status: GenericStatus::Rejected,
            status_info: None,
        }
    }
}

plain_payload!(
    AddUserRoleRequest,
    AddUserRoleResponse,
    UpdateUserRoleRequest,
    UpdateUserRoleResponse,
    DeleteUserRoleRequest,
    DeleteUserRoleResponse,
);
display_as_json!(
    AddUserRoleRequest,
    AddUserRoleResponse,
    UpdateUserRoleRequest,
    UpdateUserRoleResponse,
    DeleteUserRoleRequest,
    DeleteUserRoleResponse,
);
