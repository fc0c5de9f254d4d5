//! OCPP 1.6 JSON messages, plus the networking-node extensions for file
//! transfer, signature policies and user roles.

pub mod messages;
pub mod types;
