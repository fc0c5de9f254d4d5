//! Message model of the OCPP exchange engine: identities, the request and
//! response envelope, the JSON wire codec and the message catalogue for
//! OCPP 1.6 and 2.0.1.

macro_rules! display_as_json {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    match ::serde_json::to_string(self) {
                        Ok(json) => f.write_str(&json),
                        Err(_) => ::std::fmt::Debug::fmt(self, f),
                    }
                }
            }
        )+
    };
}

macro_rules! plain_payload {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::format::Payload for $ty {})+
    };
}

pub mod envelope;
pub mod format;
pub mod identity;
pub mod v16;
pub mod v201;

pub use envelope::{
    Envelope, Failure, Outcome, RawResponse, Request, Response, ResultCode,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use identity::{ChargeBoxId, EventTrackingId, IdentityError, RequestId};
