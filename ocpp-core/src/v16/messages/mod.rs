mod boot_notification;
mod change_availability;
mod change_configuration;
mod data_transfer;
mod file_transfer;
mod get_configuration;
mod heart_beat;
mod meter_values;
mod reset;
mod security_event_notification;
mod signature_policy;
mod status_notification;
mod user_role;

pub use boot_notification::{BootNotificationRequest, BootNotificationResponse};
pub use change_availability::{ChangeAvailabilityRequest, ChangeAvailabilityResponse};
pub use change_configuration::{ChangeConfigurationRequest, ChangeConfigurationResponse};
pub use data_transfer::{DataTransferRequest, DataTransferResponse};
pub use file_transfer::{
    DeleteFileRequest, DeleteFileResponse, GetFileRequest, GetFileResponse, SendFileRequest,
    SendFileResponse,
};
pub use get_configuration::{GetConfigurationRequest, GetConfigurationResponse};
pub use heart_beat::{HeartbeatRequest, HeartbeatResponse};
pub use meter_values::{MeterValuesRequest, MeterValuesResponse};
pub use reset::{ResetRequest, ResetResponse};
pub use security_event_notification::{
    SecurityEventNotificationRequest, SecurityEventNotificationResponse,
};
pub use signature_policy::{
    AddSignaturePolicyRequest, AddSignaturePolicyResponse, DeleteSignaturePolicyRequest,
    DeleteSignaturePolicyResponse, UpdateSignaturePolicyRequest, UpdateSignaturePolicyResponse,
};
pub use status_notification::{StatusNotificationRequest, StatusNotificationResponse};
pub use user_role::{
    AddUserRoleRequest, AddUserRoleResponse, DeleteUserRoleRequest, DeleteUserRoleResponse,
    UpdateUserRoleRequest, UpdateUserRoleResponse,
};
