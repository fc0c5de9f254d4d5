use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
    time::Duration,
};

use chrono::{DateTime, Utc};
use ocppx_core::{Envelope, ResultCode};
use serde_json::Value;

pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Fired once per call, before the request is handed to the transport.
#[derive(Debug)]
pub struct RequestEvent<'a> {
    pub timestamp: DateTime<Utc>,
    pub envelope: &'a Envelope,
    pub payload: &'a Value,
}

/// Fired once per call, after the outcome has been normalized.
#[derive(Debug)]
pub struct ResponseEvent<'a> {
    pub timestamp: DateTime<Utc>,
    pub envelope: &'a Envelope,
    pub result: ResultCode,
    pub description: Option<&'a str>,
    pub payload: Option<&'a Value>,
    pub runtime: Duration,
}

/// Observer of the call lifecycle. A listener that fails or panics is
/// logged and skipped; the call goes on.
pub trait CallListener: Send + Sync {
    fn on_request(&self, _event: &RequestEvent<'_>) -> Result<(), ListenerError> {
        Ok(())
    }

    fn on_response(&self, _event: &ResponseEvent<'_>) -> Result<(), ListenerError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct Listeners {
    list: Vec<Arc<dyn CallListener>>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Arc<dyn CallListener>) {
        self.list.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn request(&self, event: &RequestEvent<'_>) {
        for (index, listener) in self.list.iter().enumerate() {
            isolate(index, "request", event.envelope, || listener.on_request(event));
        }
    }

    pub(crate) fn response(&self, event: &ResponseEvent<'_>) {
        for (index, listener) in self.list.iter().enumerate() {
            isolate(index, "response", event.envelope, || listener.on_response(event));
        }
    }
}

fn isolate(
    index: usize,
    stage: &str,
    envelope: &Envelope,
    f: impl FnOnce() -> Result<(), ListenerError>,
) {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            log::warn!("{stage} listener #{index} failed for {envelope}: {e}");
        }
        Err(panic) => {
            log::error!(
                "{stage} listener #{index} panicked for {envelope}: {}",
                panic_message(panic.as_ref())
            );
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}

/// Writes the call lifecycle to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl CallListener for LogListener {
    fn on_request(&self, event: &RequestEvent<'_>) -> Result<(), ListenerError> {
        log::info!("[CALL] {} {}", event.envelope, event.payload);
        Ok(())
    }

    fn on_response(&self, event: &ResponseEvent<'_>) -> Result<(), ListenerError> {
        match (event.result, event.description) {
            (ResultCode::Ok, _) => log::info!(
                "[CALL_OK] {} in {:?}: {}",
                event.envelope,
                event.runtime,
                event.payload.unwrap_or(&Value::Null)
            ),
            (result, description) => log::warn!(
                "[CALL_FAILED] {} in {:?}: {} {}",
                event.envelope,
                event.runtime,
                result,
                description.unwrap_or_default()
            ),
        }
        Ok(())
    }
}
