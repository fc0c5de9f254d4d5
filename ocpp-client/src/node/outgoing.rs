use ocppx_core::{
    format::RequestPayload,
    v16::{
        messages::{
            AddSignaturePolicyRequest, AddSignaturePolicyResponse, AddUserRoleRequest,
            AddUserRoleResponse, ChangeAvailabilityRequest, ChangeAvailabilityResponse,
            ChangeConfigurationRequest, ChangeConfigurationResponse, DataTransferRequest,
            DataTransferResponse, DeleteFileRequest, DeleteFileResponse,
            DeleteSignaturePolicyRequest, DeleteSignaturePolicyResponse, DeleteUserRoleRequest,
            DeleteUserRoleResponse, GetConfigurationRequest, GetConfigurationResponse,
            GetFileRequest, GetFileResponse, ResetRequest, ResetResponse, SendFileRequest,
            SendFileResponse, UpdateSignaturePolicyRequest, UpdateSignaturePolicyResponse,
            UpdateUserRoleRequest, UpdateUserRoleResponse,
        },
        types::{AvailabilityType, ResetType, SignaturePolicy, UserRole},
    },
    ChargeBoxId, Failure, Request, Response,
};
use tokio_util::sync::CancellationToken;

use super::relay::NetworkingNode;
use crate::{dispatcher::CallDispatcher, transport::Transport};

/// Send a typed request toward a station and wait for its typed response.
#[async_trait::async_trait]
pub trait SendRequest: Send + Sync {
    fn request_for<P: RequestPayload>(&self, station: &ChargeBoxId, payload: P) -> Request<P>;

    async fn send_request<P: RequestPayload>(
        &self,
        request: Request<P>,
        cancel: CancellationToken,
    ) -> Response<P::Response>;
}

#[async_trait::async_trait]
impl<T: Transport> SendRequest for CallDispatcher<T> {
    fn request_for<P: RequestPayload>(&self, station: &ChargeBoxId, payload: P) -> Request<P> {
        self.request_to(station.clone(), payload)
    }

    async fn send_request<P: RequestPayload>(
        &self,
        request: Request<P>,
        cancel: CancellationToken,
    ) -> Response<P::Response> {
        self.send(request, cancel).await
    }
}

#[async_trait::async_trait]
impl<T: Transport> SendRequest for NetworkingNode<T> {
    fn request_for<P: RequestPayload>(&self, station: &ChargeBoxId, payload: P) -> Request<P> {
        match self.route(station) {
            Some(dispatcher) => dispatcher.request_to(station.clone(), payload),
            None => Request::new(station.clone(), self.next_request_id(), payload),
        }
    }

    async fn send_request<P: RequestPayload>(
        &self,
        request: Request<P>,
        cancel: CancellationToken,
    ) -> Response<P::Response> {
        match self.route(request.charge_box_id()) {
            Some(dispatcher) => dispatcher.send(request, cancel).await,
            None => {
                log::warn!("{}: no route to {}", self.identity(), request.charge_box_id());
                Response::failure(
                    &request.envelope,
                    Failure::server(format!("no route to charging station {}", request.charge_box_id())),
                )
            }
        }
    }
}

/// Core actions a CSMS sends toward a station.
#[async_trait::async_trait]
pub trait CsmsOutgoingMessages: SendRequest {
    async fn reset(&self, station: &ChargeBoxId, kind: ResetType, cancel: CancellationToken) -> Response<ResetResponse> {
        self.send_request(self.request_for(station, ResetRequest { kind }), cancel).await
    }

    async fn change_availability(
        &self,
        station: &ChargeBoxId,
        connector_id: usize,
        kind: AvailabilityType,
        cancel: CancellationToken,
    ) -> Response<ChangeAvailabilityResponse> {
        let payload = ChangeAvailabilityRequest { connector_id, kind };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn change_configuration(
        &self,
        station: &ChargeBoxId,
        key: String,
        value: String,
        cancel: CancellationToken,
    ) -> Response<ChangeConfigurationResponse> {
        let payload = ChangeConfigurationRequest { key, value };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn get_configuration(
        &self,
        station: &ChargeBoxId,
        payload: GetConfigurationRequest,
        cancel: CancellationToken,
    ) -> Response<GetConfigurationResponse> {
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn data_transfer(
        &self,
        station: &ChargeBoxId,
        payload: DataTransferRequest,
        cancel: CancellationToken,
    ) -> Response<DataTransferResponse> {
        self.send_request(self.request_for(station, payload), cancel).await
    }
}

#[async_trait::async_trait]
pub trait FileTransferOutgoing: SendRequest {
    async fn send_file(
        &self,
        station: &ChargeBoxId,
        payload: SendFileRequest,
        cancel: CancellationToken,
    ) -> Response<SendFileResponse> {
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn get_file(&self, station: &ChargeBoxId, file_name: String, cancel: CancellationToken) -> Response<GetFileResponse> {
        let payload = GetFileRequest { file_name, priority: None };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn delete_file(
        &self,
        station: &ChargeBoxId,
        file_name: String,
        cancel: CancellationToken,
    ) -> Response<DeleteFileResponse> {
        let payload = DeleteFileRequest { file_name, priority: None };
        self.send_request(self.request_for(station, payload), cancel).await
    }
}

#[async_trait::async_trait]
pub trait SignaturePolicyOutgoing: SendRequest {
    async fn add_signature_policy(
        &self,
        station: &ChargeBoxId,
        signature_policy: SignaturePolicy,
        cancel: CancellationToken,
    ) -> Response<AddSignaturePolicyResponse> {
        let payload = AddSignaturePolicyRequest { signature_policy };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn update_signature_policy(
        &self,
        station: &ChargeBoxId,
        signature_policy: SignaturePolicy,
        cancel: CancellationToken,
    ) -> Response<UpdateSignaturePolicyResponse> {
        let payload = UpdateSignaturePolicyRequest { signature_policy };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn delete_signature_policy(
        &self,
        station: &ChargeBoxId,
        signature_policy_id: String,
        cancel: CancellationToken,
    ) -> Response<DeleteSignaturePolicyResponse> {
        let payload = DeleteSignaturePolicyRequest { signature_policy_id };
        self.send_request(self.request_for(station, payload), cancel).await
    }
}

#[async_trait::async_trait]
pub trait UserRoleOutgoing: SendRequest {
    async fn add_user_role(
        &self,
        station: &ChargeBoxId,
        user_role: UserRole,
        cancel: CancellationToken,
    ) -> Response<AddUserRoleResponse> {
        let payload = AddUserRoleRequest { user_role };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn update_user_role(
        &self,
        station: &ChargeBoxId,
        user_role: UserRole,
        cancel: CancellationToken,
    ) -> Response<UpdateUserRoleResponse> {
        let payload = UpdateUserRoleRequest { user_role };
        self.send_request(self.request_for(station, payload), cancel).await
    }

    async fn delete_user_role(
        &self,
        station: &ChargeBoxId,
        user_role_id: String,
        cancel: CancellationToken,
    ) -> Response<DeleteUserRoleResponse> {
        let payload = DeleteUserRoleRequest { user_role_id };
        self.send_request(self.request_for(station, payload), cancel).await
    }
}

impl<S: SendRequest> CsmsOutgoingMessages for S {}
impl<S: SendRequest> FileTransferOutgoing for S {}
impl<S: SendRequest> SignaturePolicyOutgoing for S {}
impl<S: SendRequest> UserRoleOutgoing for S {}
