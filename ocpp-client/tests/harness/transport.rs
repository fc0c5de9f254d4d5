use std::{collections::VecDeque, sync::Mutex, time::Duration};

use ocppx_client::{
    CallFault, CancellationToken, OutgoingCall, Transport, TransportError, TransportReply,
};
use serde_json::Value;

use super::event::{Event, EventTx};

pub enum Step {
    Reply(Result<TransportReply, TransportError>),
    /// Waits, then replies.
    Delayed(Duration, Result<TransportReply, TransportError>),
    /// Never answers.
    Hang,
    Panic(&'static str),
}

impl Step {
    pub fn result(json: Value) -> Self {
        Step::Reply(Ok(TransportReply::Result(json)))
    }

    pub fn fault(fault: CallFault) -> Self {
        Step::Reply(Ok(TransportReply::Fault(fault)))
    }

    pub fn error(e: TransportError) -> Self {
        Step::Reply(Err(e))
    }
}

/// Replays a script of outcomes, one per call, and records what was sent.
pub struct MockTransport {
    script: Mutex<VecDeque<Step>>,
    sent: Mutex<Vec<OutgoingCall>>,
    tx: Option<EventTx>,
}

impl MockTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            sent: Mutex::new(Vec::new()),
            tx: None,
        }
    }

    pub fn with_events(mut self, tx: EventTx) -> Self {
        self.tx = Some(tx);
        self
    }

    pub fn sent(&self) -> Vec<OutgoingCall> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        call: OutgoingCall,
        cancel: CancellationToken,
    ) -> Result<TransportReply, TransportError> {
        if let Some(tx) = &self.tx {
            tx.push(Event::Sent {
                action: call.action.clone(),
                payload: call.payload.clone(),
            });
        }
        self.sent.lock().unwrap().push(call);
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Step::error(TransportError::Offline));
        match step {
            Step::Reply(res) => res,
            Step::Delayed(delay, res) => {
                tokio::time::sleep(delay).await;
                res
            }
            Step::Hang => {
                cancel.cancelled().await;
                Err(TransportError::Canceled)
            }
            Step::Panic(message) => panic!("{}", message),
        }
    }
}
