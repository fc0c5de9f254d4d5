use std::{fmt, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use super::error::ErrorCode;

/// Last-step override applied to a freshly parsed payload. Gets the raw JSON
/// body so vendor fields the schema does not know can still be picked up.
pub type CustomParser<T> = dyn Fn(&Value, T) -> T + Send + Sync;

/// Last-step override applied to the JSON object built for a payload, after
/// absent optional fields have been dropped.
pub type CustomSerializer<T> = dyn Fn(&T, Map<String, Value>) -> Map<String, Value> + Send + Sync;

/// Body of a CALL or CALLRESULT.
///
/// The serde derive on the implementing type is its field schema: renamed
/// keys give the exact wire names, plain fields are mandatory, `Option`
/// fields with `skip_serializing_if` are optional, and enums reject any
/// literal they do not list.
pub trait Payload:
    Serialize
    + DeserializeOwned
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
{
    /// Checks serde cannot express, run after a successful deserialization.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub trait RequestPayload: Payload {
    const ACTION: &'static str;

    /// CALLERROR code for a body that fails to parse.
    const FORMAT_ERROR: ErrorCode = ErrorCode::FormationViolation;

    type Response: ResponsePayload;
}

pub trait ResponsePayload: Payload {
    /// Field values reported when the call failed and no payload was received.
    fn failure_default() -> Self;
}

pub fn try_parse_payload<T: Payload>(
    json: &Value,
    custom: Option<&CustomParser<T>>,
) -> Result<T, String> {
    if !json.is_object() {
        return Err(format!("expected a JSON object, got {}", json));
    }
    let payload: T = serde_json::from_value(json.clone()).map_err(|e| e.to_string())?;
    payload.validate()?;
    Ok(match custom {
        Some(custom) => custom(json, payload),
        None => payload,
    })
}

pub fn payload_to_map<T: Payload>(payload: &T) -> Map<String, Value> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

pub fn payload_to_json<T: Payload>(payload: &T, custom: Option<&CustomSerializer<T>>) -> Value {
    let map = payload_to_map(payload);
    Value::Object(match custom {
        Some(custom) => custom(payload, map),
        None => map,
    })
}

/// Length check for the bounded `CiString` fields of the OCPP schemas.
pub fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max {
        return Err(format!("{field} is {len} characters long, at most {max} allowed"));
    }
    Ok(())
}
