use std::{
    fmt,
    hash::{Hash, Hasher},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::{
    format::{
        payload_to_map, try_parse_payload, CustomData, CustomParser, CustomSerializer, ParseError,
        RequestPayload, ResponsePayload, CUSTOM_DATA_FIELD,
    },
    identity::{ChargeBoxId, EventTrackingId, RequestId, PAYLOAD_ADDRESS_FIELD},
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Addressing and correlation data shared by every request.
///
/// Equality and hashing look at the target, the action and the request id
/// only: a resend of the same call compares equal to the original even though
/// it was stamped later.
#[derive(Clone, Debug)]
pub struct Envelope {
    pub charge_box_id: ChargeBoxId,
    pub action: String,
    pub request_id: RequestId,
    pub request_timestamp: DateTime<Utc>,
    pub request_timeout: Duration,
    pub event_tracking_id: EventTrackingId,
}

impl Envelope {
    pub fn new(charge_box_id: ChargeBoxId, action: impl Into<String>, request_id: RequestId) -> Self {
        Self {
            charge_box_id,
            action: action.into(),
            event_tracking_id: EventTrackingId::from_request_id(&request_id),
            request_id,
            request_timestamp: Utc::now(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.charge_box_id == other.charge_box_id
            && self.action == other.action
            && self.request_id == other.request_id
    }
}

impl Eq for Envelope {}

impl Hash for Envelope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.charge_box_id.hash(state);
        self.action.hash(state);
        self.request_id.hash(state);
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.charge_box_id, self.action, self.request_id)
    }
}

#[derive(Clone, Debug)]
pub struct Request<P> {
    pub envelope: Envelope,
    pub payload: P,
    pub custom_data: Option<CustomData>,
}

impl<P: RequestPayload> Request<P> {
    pub fn new(charge_box_id: ChargeBoxId, request_id: RequestId, payload: P) -> Self {
        Self {
            envelope: Envelope::new(charge_box_id, P::ACTION, request_id),
            payload,
            custom_data: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.envelope.request_timeout = timeout;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.envelope.request_timestamp = timestamp;
        self
    }

    pub fn with_event_tracking_id(mut self, event_tracking_id: EventTrackingId) -> Self {
        self.envelope.event_tracking_id = event_tracking_id;
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn charge_box_id(&self) -> &ChargeBoxId {
        &self.envelope.charge_box_id
    }

    pub fn request_id(&self) -> &RequestId {
        &self.envelope.request_id
    }

    /// Builds a request from an inbound CALL body. The target is the
    /// connection identity unless the body carries its own `chargeBoxId`.
    pub fn try_parse(
        json: &Value,
        request_id: RequestId,
        connection_id: &ChargeBoxId,
        custom: Option<&CustomParser<P>>,
    ) -> Result<Self, String> {
        let payload = try_parse_payload(json, custom)?;
        let custom_data = CustomData::from_payload(json)?;
        Ok(Self {
            envelope: Envelope::new(ChargeBoxId::resolve(connection_id, json), P::ACTION, request_id),
            payload,
            custom_data,
        })
    }

    pub fn parse(
        json: &Value,
        request_id: RequestId,
        connection_id: &ChargeBoxId,
        custom: Option<&CustomParser<P>>,
    ) -> Result<Self, ParseError> {
        Self::try_parse(json, request_id, connection_id, custom)
            .map_err(|message| ParseError::new(P::ACTION, message))
    }

    pub fn to_json(&self, custom: Option<&CustomSerializer<P>>) -> Value {
        Value::Object(self.build_json(false, custom))
    }

    /// Like `to_json`, but also names the target station in the body so the
    /// next hop can address it.
    pub fn to_relay_json(&self, custom: Option<&CustomSerializer<P>>) -> Value {
        Value::Object(self.build_json(true, custom))
    }

    fn build_json(&self, relay: bool, custom: Option<&CustomSerializer<P>>) -> Map<String, Value> {
        let mut map = payload_to_map(&self.payload);
        if let Some(custom_data) = &self.custom_data {
            map.insert(CUSTOM_DATA_FIELD.into(), custom_data.to_value());
        }
        if relay {
            map.insert(
                PAYLOAD_ADDRESS_FIELD.into(),
                Value::String(self.envelope.charge_box_id.to_string()),
            );
        }
        match custom {
            Some(custom) => custom(&self.payload, map),
            None => map,
        }
    }
}

impl<P: PartialEq> PartialEq for Request<P> {
    fn eq(&self, other: &Self) -> bool {
        self.envelope == other.envelope
            && self.custom_data == other.custom_data
            && self.payload == other.payload
    }
}

impl<P: Eq> Eq for Request<P> {}

impl<P: Hash> Hash for Request<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.envelope.hash(state);
        self.custom_data.hash(state);
        self.payload.hash(state);
    }
}

impl<P: fmt::Display> fmt::Display for Request<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.envelope, self.payload)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok,
    /// The peer's answer, or its fault, did not fit the message schema.
    Format,
    /// The transport or the remote server failed.
    Server,
    Timeout,
    Canceled,
    /// Something panicked while the call was in flight.
    Exception,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultCode::Ok => "Ok",
            ResultCode::Format => "Format",
            ResultCode::Server => "Server",
            ResultCode::Timeout => "Timeout",
            ResultCode::Canceled => "Canceled",
            ResultCode::Exception => "Exception",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub code: ResultCode,
    pub description: String,
    pub details: Option<Value>,
}

impl Failure {
    pub fn new(code: ResultCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn format(description: impl Into<String>) -> Self {
        Self::new(ResultCode::Format, description)
    }

    pub fn server(description: impl Into<String>) -> Self {
        Self::new(ResultCode::Server, description)
    }
}

impl Eq for Failure {}

impl Hash for Failure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.description.hash(state);
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome<P> {
    Success(P),
    Failure(Failure),
}

/// Answer to exactly one request. Failures carry no payload; the message
/// specific fields fall back to `ResponsePayload::failure_default`.
#[derive(Clone, Debug)]
pub struct Response<P> {
    pub request: Envelope,
    pub outcome: Outcome<P>,
    pub custom_data: Option<CustomData>,
    pub response_timestamp: DateTime<Utc>,
    pub runtime: Duration,
}

impl<P> Response<P> {
    pub fn success(request: &Envelope, payload: P) -> Self {
        Self::with_outcome(request, Outcome::Success(payload))
    }

    pub fn failure(request: &Envelope, failure: Failure) -> Self {
        Self::with_outcome(request, Outcome::Failure(failure))
    }

    fn with_outcome(request: &Envelope, outcome: Outcome<P>) -> Self {
        Self {
            request: request.clone(),
            outcome,
            custom_data: None,
            response_timestamp: Utc::now(),
            runtime: Duration::ZERO,
        }
    }

    pub fn with_runtime(mut self, runtime: Duration) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn result(&self) -> ResultCode {
        match &self.outcome {
            Outcome::Success(_) => ResultCode::Ok,
            Outcome::Failure(failure) => failure.code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub fn payload(&self) -> Option<&P> {
        match &self.outcome {
            Outcome::Success(payload) => Some(payload),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure_info(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Response<Q> {
        Response {
            request: self.request,
            outcome: match self.outcome {
                Outcome::Success(payload) => Outcome::Success(f(payload)),
                Outcome::Failure(failure) => Outcome::Failure(failure),
            },
            custom_data: self.custom_data,
            response_timestamp: self.response_timestamp,
            runtime: self.runtime,
        }
    }
}

impl<P: ResponsePayload> Response<P> {
    pub fn try_parse(
        request: &Envelope,
        json: &Value,
        custom: Option<&CustomParser<P>>,
    ) -> Result<Self, String> {
        let payload = try_parse_payload(json, custom)?;
        let custom_data = CustomData::from_payload(json)?;
        let mut response = Self::success(request, payload);
        response.custom_data = custom_data;
        Ok(response)
    }

    pub fn parse(
        request: &Envelope,
        json: &Value,
        custom: Option<&CustomParser<P>>,
    ) -> Result<Self, ParseError> {
        Self::try_parse(request, json, custom)
            .map_err(|message| ParseError::new(request.action.clone(), message))
    }

    pub fn payload_or_default(&self) -> P {
        match &self.outcome {
            Outcome::Success(payload) => payload.clone(),
            Outcome::Failure(_) => P::failure_default(),
        }
    }

    pub fn to_json(&self, custom: Option<&CustomSerializer<P>>) -> Value {
        let payload = self.payload_or_default();
        let mut map = payload_to_map(&payload);
        if let Some(custom_data) = &self.custom_data {
            map.insert(CUSTOM_DATA_FIELD.into(), custom_data.to_value());
        }
        Value::Object(match custom {
            Some(custom) => custom(&payload, map),
            None => map,
        })
    }
}

impl<P: PartialEq> PartialEq for Response<P> {
    fn eq(&self, other: &Self) -> bool {
        self.request == other.request
            && self.custom_data == other.custom_data
            && self.outcome == other.outcome
    }
}

impl<P: Eq> Eq for Response<P> {}

impl<P: Hash> Hash for Response<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.request.hash(state);
        self.custom_data.hash(state);
        self.outcome.hash(state);
    }
}

impl<P: fmt::Display> fmt::Display for Response<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success(payload) => write!(f, "{} -> {}", self.request, payload),
            Outcome::Failure(failure) => write!(f, "{} -> {}", self.request, failure),
        }
    }
}

/// Shorthand used by relays that never look inside the payload.
pub type RawResponse = Response<Value>;
