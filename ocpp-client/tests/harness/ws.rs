use std::sync::Arc;

use flume::Receiver;
use ocppx_client::{CallPolicy, WebsocketTransport};
use ocppx_core::format::{
    frame::{Call, CallError, CallResult},
    message::{CallResponse, EncodeDecode, OcppMessage},
};
use serde_json::Value;

/// Plays the far end of a `WebsocketTransport`: reads the frames it writes
/// and injects answers.
pub struct MockPeer {
    pub transport: Arc<WebsocketTransport>,
    outbound: Receiver<String>,
}

impl MockPeer {
    pub fn new(policy: CallPolicy) -> Self {
        let (transport, outbound) = WebsocketTransport::new(policy);
        let transport = Arc::new(transport);
        transport.on_connected();
        Self {
            transport,
            outbound,
        }
    }

    pub async fn next_frame(&self) -> String {
        tokio::time::timeout(std::time::Duration::from_secs(2), self.outbound.recv_async())
            .await
            .expect("no frame written")
            .expect("transport dropped")
    }

    pub async fn next_call(&self) -> Call {
        match OcppMessage::<String>::decode(self.next_frame().await) {
            OcppMessage::Call(call) => call,
            other => panic!("expected a CALL, got {other:?}"),
        }
    }

    pub fn reply(&self, call: &Call, payload: Value) {
        let frame = CallResponse::<String>::CallResult(CallResult::new(call.unique_id.clone(), payload));
        assert!(self.transport.on_frame(&frame.encode()).is_none());
    }

    pub fn reply_error(&self, call: &Call, code: &str, description: &str) {
        let frame = CallError::new(call.unique_id.clone(), code.to_string()).with_description(description);
        assert!(self.transport.on_frame(&frame.encode()).is_none());
    }

    pub fn inject(&self, text: &str) -> Option<Call> {
        self.transport.on_frame(text)
    }
}
