use serde_json::Value;

use super::frame::{Call, CallError, CallResult};

const CALL: u64 = 2;
const CALL_RESULT: u64 = 3;
const CALL_ERROR: u64 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Invalid {
    pub unique_id: Option<String>,
    pub message: String,
    pub err_msg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallResponse<T> {
    CallResult(CallResult),
    CallError(CallError<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OcppMessage<T> {
    Call(Call),
    CallResponse(CallResponse<T>),
    Invalid(Invalid),
}

pub trait EncodeDecode {
    fn encode(&self) -> String;
}

impl<T> CallResponse<T> {
    pub fn get_unique_id(&self) -> &str {
        match self {
            CallResponse::CallResult(t) => &t.unique_id,
            CallResponse::CallError(t) => &t.unique_id,
        }
    }
}

impl<T: serde::de::DeserializeOwned> OcppMessage<T> {
    pub fn decode(message: String) -> OcppMessage<T> {
        let raw: Value = match serde_json::from_str(&message) {
            Ok(val) => val,
            Err(e) => {
                return OcppMessage::Invalid(Invalid {
                    unique_id: None,
                    message,
                    err_msg: format!("JSON parse error: {}", e),
                });
            }
        };

        let arr = match raw {
            Value::Array(arr) => arr,
            _ => {
                return OcppMessage::Invalid(Invalid {
                    unique_id: None,
                    message,
                    err_msg: "Expected JSON array".into(),
                });
            }
        };

        let unique_id = arr.get(1).and_then(Value::as_str).map(|s| s.to_string());

        match arr.first().and_then(Value::as_u64) {
            Some(CALL) if arr.len() == 4 => {
                let action = arr[2].as_str().map(|s| s.to_string());
                match (unique_id.clone(), action, &arr[3]) {
                    (Some(unique_id), Some(action), Value::Object(_)) => OcppMessage::Call(Call {
                        unique_id,
                        action,
                        payload: arr[3].clone(),
                    }),
                    _ => OcppMessage::Invalid(Invalid {
                        unique_id,
                        message,
                        err_msg: "Invalid Call structure".into(),
                    }),
                }
            }

            Some(CALL_RESULT) if arr.len() == 3 => match unique_id {
                Some(unique_id) => OcppMessage::CallResponse(CallResponse::CallResult(CallResult {
                    unique_id,
                    payload: arr[2].clone(),
                })),
                None => OcppMessage::Invalid(Invalid {
                    unique_id: None,
                    message,
                    err_msg: "Invalid CallResult structure".into(),
                }),
            },

            Some(CALL_ERROR) if arr.len() == 5 => {
                let error_code = serde_json::from_value::<T>(arr[2].clone());
                let error_description = arr[3].as_str().map(|s| s.to_string());

                match (unique_id.clone(), error_code, error_description) {
                    (Some(unique_id), Ok(error_code), Some(error_description)) => {
                        OcppMessage::CallResponse(CallResponse::CallError(CallError {
                            unique_id,
                            error_code,
                            error_description,
                            error_details: arr[4].clone(),
                        }))
                    }
                    _ => OcppMessage::Invalid(Invalid {
                        unique_id,
                        message,
                        err_msg: "Invalid CallError structure".into(),
                    }),
                }
            }

            _ => OcppMessage::Invalid(Invalid {
                unique_id,
                message,
                err_msg: "Unknown or malformed message".into(),
            }),
        }
    }
}

impl EncodeDecode for Call {
    fn encode(&self) -> String {
        serde_json::json!([CALL, self.unique_id, self.action, self.payload]).to_string()
    }
}

impl EncodeDecode for CallResult {
    fn encode(&self) -> String {
        serde_json::json!([CALL_RESULT, self.unique_id, self.payload]).to_string()
    }
}

impl<T: ToString> EncodeDecode for CallError<T> {
    fn encode(&self) -> String {
        serde_json::json!([
            CALL_ERROR,
            self.unique_id,
            self.error_code.to_string(),
            self.error_description,
            self.error_details
        ])
        .to_string()
    }
}

impl<T: ToString> EncodeDecode for CallResponse<T> {
    fn encode(&self) -> String {
        match self {
            CallResponse::CallResult(t) => t.encode(),
            CallResponse::CallError(t) => t.encode(),
        }
    }
}
