use std::sync::atomic::{AtomicUsize, Ordering};

use ocppx_client::{CallListener, ListenerError, RequestEvent, ResponseEvent};

use super::event::{Event, EventTx};

/// Pushes every lifecycle notification onto the event bus.
pub struct RecordingListener {
    tx: EventTx,
    pub requests: AtomicUsize,
    pub responses: AtomicUsize,
}

impl RecordingListener {
    pub fn new(tx: EventTx) -> Self {
        Self {
            tx,
            requests: AtomicUsize::new(0),
            responses: AtomicUsize::new(0),
        }
    }

    pub fn counts(&self) -> (usize, usize) {
        (
            self.requests.load(Ordering::SeqCst),
            self.responses.load(Ordering::SeqCst),
        )
    }
}

impl CallListener for RecordingListener {
    fn on_request(&self, event: &RequestEvent<'_>) -> Result<(), ListenerError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.tx.push(Event::Request {
            action: event.envelope.action.clone(),
            request_id: event.envelope.request_id.to_string(),
        });
        Ok(())
    }

    fn on_response(&self, event: &ResponseEvent<'_>) -> Result<(), ListenerError> {
        self.responses.fetch_add(1, Ordering::SeqCst);
        self.tx.push(Event::Response {
            action: event.envelope.action.clone(),
            result: event.result,
            description: event.description.map(str::to_string),
        });
        Ok(())
    }
}

pub struct FailingListener;

impl CallListener for FailingListener {
    fn on_request(&self, _event: &RequestEvent<'_>) -> Result<(), ListenerError> {
        Err("listener storage full".into())
    }

    fn on_response(&self, _event: &ResponseEvent<'_>) -> Result<(), ListenerError> {
        Err("listener storage full".into())
    }
}

pub struct PanickingListener;

impl CallListener for PanickingListener {
    fn on_request(&self, _event: &RequestEvent<'_>) -> Result<(), ListenerError> {
        panic!("listener bug");
    }
}
