use std::{fmt, sync::Arc, time::Duration};

use ocppx_core::{format::frame::Call, ChargeBoxId, EventTrackingId, RequestId};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

mod retry;
#[cfg(feature = "tokio_ws")]
mod tokio_ws;
mod websocket;

pub use retry::RetryTransport;
#[cfg(feature = "tokio_ws")]
pub use tokio_ws::TokioWsDriver;
pub use websocket::WebsocketTransport;

/// Everything a binding needs to put one call on the wire.
#[derive(Clone, Debug)]
pub struct OutgoingCall {
    pub charge_box_id: ChargeBoxId,
    pub unique_id: RequestId,
    pub action: String,
    pub payload: Value,
    pub timeout: Duration,
    pub event_tracking_id: EventTrackingId,
}

impl OutgoingCall {
    pub fn to_frame(&self) -> Call {
        Call {
            unique_id: self.unique_id.to_string(),
            action: self.action.clone(),
            payload: self.payload.clone(),
        }
    }
}

/// Protocol level rejection reported by the peer (a CALLERROR frame, or a
/// SOAP fault on the legacy binding).
#[derive(Clone, Debug, PartialEq)]
pub struct CallFault {
    pub error_code: String,
    pub description: String,
    pub details: Value,
    /// The fault exactly as received.
    pub body: String,
}

impl CallFault {
    pub fn new(error_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            description: description.into(),
            details: Value::Object(Default::default()),
            body: String::new(),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl fmt::Display for CallFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}: {}", self.error_code, self.description)
        } else {
            write!(f, "{}: {}", self.error_code, self.body)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransportReply {
    Result(Value),
    Fault(CallFault),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    Timeout,
    Canceled,
    Offline,
    Http { status: u16, body: String },
    /// The connection already carries a call and is set to reject overlaps.
    CallPending,
    Io(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Offline | TransportError::Io(_))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "timed out waiting for response"),
            TransportError::Canceled => write!(f, "call canceled"),
            TransportError::Offline => write!(f, "connection offline"),
            TransportError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            TransportError::CallPending => write!(f, "another call is already pending"),
            TransportError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// A binding that carries one call to the peer and waits for its answer.
///
/// Implementations must not run two calls over the same connection at once,
/// either by queueing or by failing with `TransportError::CallPending`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(
        &self,
        call: OutgoingCall,
        cancel: CancellationToken,
    ) -> Result<TransportReply, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(
        &self,
        call: OutgoingCall,
        cancel: CancellationToken,
    ) -> Result<TransportReply, TransportError> {
        (**self).send(call, cancel).await
    }
}
