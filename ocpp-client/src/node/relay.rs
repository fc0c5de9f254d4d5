use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use ocppx_core::{
    format::{
        frame::{Call, CallError, CallResult},
        message::CallResponse,
        ErrorCode,
    },
    ChargeBoxId, Envelope, Failure, Outcome, RequestId, ResultCode,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{dispatcher::CallDispatcher, rng::IdGenerator, transport::Transport};

/// Relay between a CSMS and the stations behind it.
///
/// Each station is reached through a `CallDispatcher` on the connection that
/// leads to it. Several stations may share one connection, in which case the
/// dispatcher addresses them through the `chargeBoxId` body field.
pub struct NetworkingNode<T: Transport> {
    identity: ChargeBoxId,
    routes: RwLock<HashMap<ChargeBoxId, Arc<CallDispatcher<T>>>>,
    ids: IdGenerator,
}

impl<T: Transport> NetworkingNode<T> {
    pub fn new(identity: ChargeBoxId) -> Self {
        Self {
            identity,
            routes: RwLock::new(HashMap::new()),
            ids: IdGenerator::new(0),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ids = IdGenerator::new(seed);
        self
    }

    pub fn identity(&self) -> &ChargeBoxId {
        &self.identity
    }

    pub fn add_route(&self, station: ChargeBoxId, dispatcher: Arc<CallDispatcher<T>>) {
        log::info!("{}: routing {} via {}", self.identity, station, dispatcher.charge_box_id());
        self.routes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(station, dispatcher);
    }

    pub fn remove_route(&self, station: &ChargeBoxId) -> Option<Arc<CallDispatcher<T>>> {
        self.routes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(station)
    }

    pub(crate) fn next_request_id(&self) -> RequestId {
        self.ids.request_id()
    }

    pub fn route(&self, station: &ChargeBoxId) -> Option<Arc<CallDispatcher<T>>> {
        self.routes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(station)
            .cloned()
    }

    /// Relays a CALL received on `connection_id` toward the station it is
    /// addressed to and converts the outcome back into a reply frame.
    ///
    /// The body goes out untouched under the original unique id. A CALLERROR
    /// from the far end keeps its error code; failures of the hop itself
    /// become `GenericError` or `InternalError`.
    pub async fn forward(
        &self,
        connection_id: &ChargeBoxId,
        call: Call,
        cancel: CancellationToken,
    ) -> CallResponse<String> {
        let destination = ChargeBoxId::resolve(connection_id, &call.payload);
        let fail = |code: ErrorCode, description: String| {
            CallResponse::CallError(
                CallError::new(call.unique_id.clone(), code.to_string()).with_description(description),
            )
        };

        let Some(dispatcher) = self.route(&destination) else {
            log::warn!("{}: no route to {} for {}", self.identity, destination, call.action);
            return fail(ErrorCode::GenericError, format!("unknown charging station {destination}"));
        };
        let request_id = match RequestId::parse(&call.unique_id) {
            Ok(id) => id,
            Err(e) => return fail(ErrorCode::FormationViolation, e.to_string()),
        };

        let envelope = Envelope::new(destination, call.action.clone(), request_id);
        log::debug!("{}: forwarding {}", self.identity, envelope);
        let response = dispatcher.forward(envelope, call.payload.clone(), cancel).await;

        match response.outcome {
            Outcome::Success(payload) => CallResponse::CallResult(CallResult::new(call.unique_id, payload)),
            Outcome::Failure(failure) => CallResponse::CallError(relayed_error(call.unique_id, failure)),
        }
    }
}

fn relayed_error(unique_id: String, failure: Failure) -> CallError<String> {
    let remote_code = failure
        .details
        .as_ref()
        .and_then(|d| d.get("errorCode"))
        .and_then(Value::as_str)
        .and_then(ErrorCode::parse);

    match (failure.code, remote_code) {
        (ResultCode::Format, Some(code)) => {
            let details = failure.details.as_ref().and_then(|d| d.get("errorDetails")).cloned();
            let description = failure
                .details
                .as_ref()
                .and_then(|d| d.get("errorDescription"))
                .and_then(Value::as_str)
                .unwrap_or(&failure.description)
                .to_string();
            let error = CallError::new(unique_id, code.to_string()).with_description(description);
            match details {
                Some(details) => error.with_details(details),
                None => error,
            }
        }
        (ResultCode::Exception, _) => {
            CallError::new(unique_id, ErrorCode::InternalError.to_string()).with_description(failure.description)
        }
        _ => CallError::new(unique_id, ErrorCode::GenericError.to_string()).with_description(failure.description),
    }
}
