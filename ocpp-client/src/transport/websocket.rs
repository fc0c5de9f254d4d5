use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use flume::{Receiver, Sender};
use ocppx_core::format::{
    frame::Call,
    message::{CallResponse, EncodeDecode, OcppMessage},
};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use super::{CallFault, OutgoingCall, Transport, TransportError, TransportReply};
use crate::config::CallPolicy;

type Reply = Result<TransportReply, TransportError>;

struct Pending {
    unique_id: String,
    tx: oneshot::Sender<Reply>,
}

/// OCPP-J over any text frame channel.
///
/// Outgoing frames are pushed to the receiver returned by `new`; whoever owns
/// the socket feeds incoming text back through `on_frame`. At most one call is
/// in flight, a CALLRESULT or CALLERROR is matched to it by unique id, and
/// anything that does not match is dropped.
pub struct WebsocketTransport {
    outbound: Sender<String>,
    pending: Mutex<Option<Pending>>,
    call_lock: tokio::sync::Mutex<()>,
    policy: CallPolicy,
    connected: AtomicBool,
}

impl WebsocketTransport {
    pub fn new(policy: CallPolicy) -> (Self, Receiver<String>) {
        let (outbound, rx) = flume::unbounded();
        (
            Self {
                outbound,
                pending: Mutex::new(None),
                call_lock: tokio::sync::Mutex::new(()),
                policy,
                connected: AtomicBool::new(false),
            },
            rx,
        )
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn on_connected(&self) {
        log::info!("ws connected");
        self.connected.store(true, Ordering::Release);
    }

    /// Fails the call in flight, if any, with `Offline`.
    pub fn on_disconnect(&self) {
        log::info!("ws disconnected");
        self.connected.store(false, Ordering::Release);
        if let Some(pending) = self.lock_pending().take() {
            log::debug!("failing pending call {} on disconnect", pending.unique_id);
            let _ = pending.tx.send(Err(TransportError::Offline));
        }
    }

    /// Feeds one incoming text frame. Returns the frame when it is a CALL
    /// from the peer, which is for the connection owner to answer.
    pub fn on_frame(&self, text: &str) -> Option<Call> {
        log::info!("[MSG_IN] {}", text);
        match OcppMessage::<String>::decode(text.to_string()) {
            OcppMessage::Call(call) => Some(call),
            OcppMessage::CallResponse(response) => {
                self.complete(response, text);
                None
            }
            OcppMessage::Invalid(invalid) => {
                log::warn!("dropping invalid frame: {}", invalid.err_msg);
                None
            }
        }
    }

    /// Queues a frame that is not one of our calls, typically the answer to
    /// a CALL from the peer.
    pub fn send_frame(&self, text: String) -> Result<(), TransportError> {
        log::info!("[MSG_OUT] {}", text);
        self.outbound.send(text).map_err(|_| TransportError::Offline)
    }

    fn complete(&self, response: CallResponse<String>, raw: &str) {
        let mut pending = self.lock_pending();
        match pending.take() {
            Some(call) if call.unique_id == response.get_unique_id() => {
                let reply = match response {
                    CallResponse::CallResult(result) => TransportReply::Result(result.payload),
                    CallResponse::CallError(error) => TransportReply::Fault(
                        CallFault::new(error.error_code, error.error_description)
                            .with_details(error.error_details)
                            .with_body(raw),
                    ),
                };
                let _ = call.tx.send(Ok(reply));
            }
            other => {
                log::warn!("ignoring response {} with no matching call", response.get_unique_id());
                *pending = other;
            }
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// Clears the pending slot when a call ends without an answer (timeout,
// cancellation or the caller dropping the future).
struct PendingSlot<'a> {
    transport: &'a WebsocketTransport,
    unique_id: String,
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        let mut pending = self.transport.lock_pending();
        if pending.as_ref().is_some_and(|p| p.unique_id == self.unique_id) {
            pending.take();
        }
    }
}

#[async_trait::async_trait]
impl Transport for WebsocketTransport {
    async fn send(
        &self,
        call: OutgoingCall,
        cancel: CancellationToken,
    ) -> Result<TransportReply, TransportError> {
        let _turn = match self.policy {
            CallPolicy::Queue => tokio::select! {
                _ = cancel.cancelled() => return Err(TransportError::Canceled),
                guard = self.call_lock.lock() => guard,
            },
            CallPolicy::Reject => self
                .call_lock
                .try_lock()
                .map_err(|_| TransportError::CallPending)?,
        };
        if !self.is_connected() {
            return Err(TransportError::Offline);
        }

        let frame = call.to_frame();
        let (tx, rx) = oneshot::channel();
        *self.lock_pending() = Some(Pending {
            unique_id: frame.unique_id.clone(),
            tx,
        });
        let _slot = PendingSlot {
            transport: self,
            unique_id: frame.unique_id.clone(),
        };

        let text = frame.encode();
        log::info!("[MSG_OUT] {}", text);
        self.outbound
            .send_async(text)
            .await
            .map_err(|_| TransportError::Offline)?;

        tokio::select! {
            _ = cancel.cancelled() => Err(TransportError::Canceled),
            res = tokio::time::timeout(call.timeout, rx) => match res {
                Err(_) => Err(TransportError::Timeout),
                Ok(Err(_)) => Err(TransportError::Offline),
                Ok(Ok(reply)) => reply,
            },
        }
    }
}
