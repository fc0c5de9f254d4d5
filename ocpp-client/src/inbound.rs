use std::{collections::HashMap, fmt, future::Future, panic::AssertUnwindSafe, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use ocppx_core::{
    format::{
        frame::{Call, CallError, CallResult},
        message::{CallResponse, EncodeDecode, OcppMessage},
        payload_to_json, ErrorCode, RequestPayload,
    },
    ChargeBoxId, Request, RequestId,
};

use crate::events::panic_message;

/// Error a handler answers a CALL with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerError {
    pub code: ErrorCode,
    pub description: String,
}

impl HandlerError {
    pub fn new(code: ErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

impl std::error::Error for HandlerError {}

type ErasedHandler =
    Box<dyn Fn(ChargeBoxId, Call) -> BoxFuture<'static, CallResponse<ErrorCode>> + Send + Sync>;

/// Receiving side of the exchange: parses inbound CALLs and hands them to the
/// handler registered for their action.
#[derive(Default)]
pub struct InboundRouter {
    handlers: HashMap<&'static str, ErasedHandler>,
}

impl InboundRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for `P::ACTION`, replacing any earlier one.
    pub fn on<P, F, Fut>(&mut self, handler: F) -> &mut Self
    where
        P: RequestPayload,
        F: Fn(Request<P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<P::Response, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let erased: ErasedHandler = Box::new(move |connection_id, call| {
            let handler = handler.clone();
            async move { dispatch::<P, F, Fut>(handler.as_ref(), connection_id, call).await }.boxed()
        });
        self.handlers.insert(P::ACTION, erased);
        self
    }

    pub fn handles(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    pub async fn handle_call(&self, connection_id: &ChargeBoxId, call: Call) -> CallResponse<ErrorCode> {
        match self.handlers.get(call.action.as_str()) {
            Some(handler) => handler(connection_id.clone(), call).await,
            None => {
                log::warn!("no handler for action {}", call.action);
                let description = format!("action {} is not implemented", call.action);
                CallResponse::CallError(
                    CallError::new(call.unique_id, ErrorCode::NotImplemented).with_description(description),
                )
            }
        }
    }

    /// Handles one text frame and returns the frame to send back, if any.
    /// Responses and frames without a usable unique id get no answer.
    pub async fn handle_frame(&self, connection_id: &ChargeBoxId, text: &str) -> Option<String> {
        match OcppMessage::<String>::decode(text.to_string()) {
            OcppMessage::Call(call) => Some(self.handle_call(connection_id, call).await.encode()),
            OcppMessage::Invalid(invalid) => {
                log::warn!("invalid frame from {}: {}", connection_id, invalid.err_msg);
                invalid.unique_id.map(|unique_id| {
                    CallError::new(unique_id, ErrorCode::FormationViolation)
                        .with_description(invalid.err_msg)
                        .encode()
                })
            }
            OcppMessage::CallResponse(response) => {
                log::debug!("router ignores response {}", response.get_unique_id());
                None
            }
        }
    }
}

async fn dispatch<P, F, Fut>(handler: &F, connection_id: ChargeBoxId, call: Call) -> CallResponse<ErrorCode>
where
    P: RequestPayload,
    F: Fn(Request<P>) -> Fut,
    Fut: Future<Output = Result<P::Response, HandlerError>>,
{
    let fail = |code: ErrorCode, description: String| {
        CallResponse::CallError(CallError::new(call.unique_id.clone(), code).with_description(description))
    };

    let request_id = match RequestId::parse(&call.unique_id) {
        Ok(id) => id,
        Err(e) => return fail(P::FORMAT_ERROR, e.to_string()),
    };
    let request = match Request::<P>::try_parse(&call.payload, request_id, &connection_id, None) {
        Ok(request) => request,
        Err(e) => return fail(P::FORMAT_ERROR, e),
    };

    match AssertUnwindSafe(async { handler(request).await }).catch_unwind().await {
        Ok(Ok(response)) => {
            CallResponse::CallResult(CallResult::new(call.unique_id.clone(), payload_to_json(&response, None)))
        }
        Ok(Err(e)) => fail(e.code, e.description),
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            log::error!("{} handler panicked: {}", P::ACTION, message);
            fail(ErrorCode::InternalError, message)
        }
    }
}
