//! OCPP 2.0.1 messages. Every 2.0.1 body may carry `customData`, which the
//! envelope lifts out before the payload is parsed.

pub mod messages;
pub mod types;
