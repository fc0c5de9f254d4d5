use std::{
    any::Any,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
    time::Duration,
};

use chrono::Utc;
use futures::FutureExt;
use ocppx_core::{
    format::{CustomParser, CustomSerializer, RequestPayload},
    ChargeBoxId, Envelope, Failure, RawResponse, Request, Response, ResultCode,
    DEFAULT_REQUEST_TIMEOUT,
};
use serde_json::{json, Value};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{ClientConfig, ConfigError},
    events::{panic_message, CallListener, Listeners, RequestEvent, ResponseEvent},
    rng::IdGenerator,
    transport::{OutgoingCall, Transport, TransportError, TransportReply},
};

/// Custom codec hooks for one call.
pub struct CallHooks<P: RequestPayload> {
    pub serializer: Option<Box<CustomSerializer<P>>>,
    pub parser: Option<Box<CustomParser<P::Response>>>,
}

impl<P: RequestPayload> Default for CallHooks<P> {
    fn default() -> Self {
        Self {
            serializer: None,
            parser: None,
        }
    }
}

/// Raw outcome of one exchange, before the answer is parsed.
enum Exchange {
    Reply(Value),
    Failed(Failure),
}

/// Sends requests over a transport and turns whatever happens into a
/// `Response`.
///
/// A call never fails with an error: protocol faults, transport failures,
/// timeouts, cancellation and panics inside the transport all come back as a
/// response whose `result()` says what went wrong.
pub struct CallDispatcher<T: Transport> {
    charge_box_id: ChargeBoxId,
    transport: Arc<T>,
    ids: IdGenerator,
    listeners: Listeners,
    default_timeout: Duration,
}

impl<T: Transport> CallDispatcher<T> {
    /// `charge_box_id` is the identity of the connection the transport runs
    /// on.
    pub fn new(charge_box_id: ChargeBoxId, transport: T) -> Self {
        Self::with_shared_transport(charge_box_id, Arc::new(transport))
    }

    pub fn with_shared_transport(charge_box_id: ChargeBoxId, transport: Arc<T>) -> Self {
        Self {
            charge_box_id,
            transport,
            ids: IdGenerator::new(0),
            listeners: Listeners::default(),
            default_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let mut dispatcher = Self::new(config.charge_box_id()?, transport);
        dispatcher.ids = IdGenerator::new(config.seed);
        dispatcher.default_timeout = config.call_timeout();
        Ok(dispatcher)
    }

    pub fn with_listener(mut self, listener: Arc<dyn CallListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn charge_box_id(&self) -> &ChargeBoxId {
        &self.charge_box_id
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// A request to the connection's own station, with a fresh id and the
    /// dispatcher's default timeout.
    pub fn new_request<P: RequestPayload>(&self, payload: P) -> Request<P> {
        self.request_to(self.charge_box_id.clone(), payload)
    }

    /// A request to a station behind the connection. It is addressed through
    /// the `chargeBoxId` body field when sent.
    pub fn request_to<P: RequestPayload>(&self, station: ChargeBoxId, payload: P) -> Request<P> {
        Request::new(station, self.ids.request_id(), payload).with_timeout(self.default_timeout)
    }

    pub async fn send<P: RequestPayload>(
        &self,
        request: Request<P>,
        cancel: CancellationToken,
    ) -> Response<P::Response> {
        self.send_with(request, cancel, &CallHooks::default()).await
    }

    pub async fn send_with<P: RequestPayload>(
        &self,
        request: Request<P>,
        cancel: CancellationToken,
        hooks: &CallHooks<P>,
    ) -> Response<P::Response> {
        let started = Instant::now();
        let serializer = hooks.serializer.as_deref();
        let relay = request.envelope.charge_box_id != self.charge_box_id;
        let serialized = catch_unwind(AssertUnwindSafe(|| {
            if relay {
                request.to_relay_json(serializer)
            } else {
                request.to_json(serializer)
            }
        }));

        let exchange = match serialized {
            Ok(payload) => self.exchange(&request.envelope, payload, cancel).await,
            Err(panic) => {
                self.listeners.request(&RequestEvent {
                    timestamp: Utc::now(),
                    envelope: &request.envelope,
                    payload: &Value::Null,
                });
                Exchange::Failed(hook_panicked(&request.envelope, "serializer", panic))
            }
        };

        let response = match exchange {
            Exchange::Reply(json) => {
                let parsed = catch_unwind(AssertUnwindSafe(|| {
                    Response::try_parse(&request.envelope, &json, hooks.parser.as_deref())
                }));
                match parsed {
                    Ok(Ok(response)) => response,
                    Ok(Err(e)) => Response::failure(
                        &request.envelope,
                        Failure::format(format!("invalid {} response: {}", P::ACTION, e))
                            .with_details(json),
                    ),
                    Err(panic) => Response::failure(
                        &request.envelope,
                        hook_panicked(&request.envelope, "parser", panic),
                    ),
                }
            }
            Exchange::Failed(failure) => Response::failure(&request.envelope, failure),
        }
        .with_runtime(started.elapsed());

        let json = response.payload().map(|_| response.to_json(None));
        self.fire_response(&response, json.as_ref());
        response
    }

    /// Sends an already serialized body as-is. Used by relays, which must not
    /// lose fields they have no schema for.
    pub async fn forward(
        &self,
        envelope: Envelope,
        payload: Value,
        cancel: CancellationToken,
    ) -> RawResponse {
        let started = Instant::now();
        let response = match self.exchange(&envelope, payload, cancel).await {
            Exchange::Reply(json) => Response::success(&envelope, json),
            Exchange::Failed(failure) => Response::failure(&envelope, failure),
        }
        .with_runtime(started.elapsed());
        self.fire_response(&response, response.payload());
        response
    }

    async fn exchange(&self, envelope: &Envelope, payload: Value, cancel: CancellationToken) -> Exchange {
        self.listeners.request(&RequestEvent {
            timestamp: Utc::now(),
            envelope,
            payload: &payload,
        });

        let call = OutgoingCall {
            charge_box_id: envelope.charge_box_id.clone(),
            unique_id: envelope.request_id.clone(),
            action: envelope.action.clone(),
            payload,
            timeout: envelope.request_timeout,
            event_tracking_id: envelope.event_tracking_id.clone(),
        };
        log::debug!("sending {} (tracking {})", envelope, envelope.event_tracking_id);

        let send = AssertUnwindSafe(self.transport.send(call, cancel.clone())).catch_unwind();
        let res = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Canceled),
            res = tokio::time::timeout(envelope.request_timeout, send) => match res {
                Err(_) => Err(TransportError::Timeout),
                Ok(Err(panic)) => return Exchange::Failed(hook_panicked(envelope, "transport", panic)),
                Ok(Ok(res)) => res,
            },
        };

        match res {
            Ok(TransportReply::Result(json)) => Exchange::Reply(json),
            Ok(TransportReply::Fault(fault)) => {
                log::warn!("{} answered with fault {}", envelope, fault);
                Exchange::Failed(Failure::format(fault.to_string()).with_details(json!({
                    "errorCode": fault.error_code,
                    "errorDescription": fault.description,
                    "errorDetails": fault.details,
                })))
            }
            Err(e) => {
                log::warn!("{} failed: {}", envelope, e);
                Exchange::Failed(transport_failure(e))
            }
        }
    }

    fn fire_response<P>(&self, response: &Response<P>, payload: Option<&Value>) {
        let failure = response.failure_info();
        self.listeners.response(&ResponseEvent {
            timestamp: response.response_timestamp,
            envelope: &response.request,
            result: response.result(),
            description: failure.map(|f| f.description.as_str()),
            payload,
            runtime: response.runtime,
        });
    }
}

fn hook_panicked(envelope: &Envelope, stage: &str, panic: Box<dyn Any + Send>) -> Failure {
    let message = panic_message(panic.as_ref());
    log::error!("{} panicked during {}: {}", stage, envelope, message);
    Failure::new(ResultCode::Exception, message.clone()).with_details(json!({
        "exception": message,
        "action": envelope.action,
        "stage": stage,
    }))
}

fn transport_failure(e: TransportError) -> Failure {
    match e {
        TransportError::Timeout => Failure::new(ResultCode::Timeout, e.to_string()),
        TransportError::Canceled => Failure::new(ResultCode::Canceled, e.to_string()),
        TransportError::Http { status, ref body } => Failure::server(e.to_string())
            .with_details(json!({ "status": status, "body": body })),
        TransportError::Offline | TransportError::CallPending | TransportError::Io(_) => {
            Failure::server(e.to_string())
        }
    }
}
