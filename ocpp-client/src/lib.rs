//! Client side of the OCPP exchange engine: the call dispatcher that turns
//! every outbound request into a typed response, the transports it runs on,
//! the inbound action router and the networking-node relay.

pub mod config;
pub mod dispatcher;
pub mod events;
pub mod inbound;
pub mod node;
mod rng;
pub mod transport;

pub use config::{CallPolicy, ClientConfig, ConfigError, RetryPolicy};
pub use dispatcher::{CallDispatcher, CallHooks};
pub use events::{CallListener, ListenerError, LogListener, RequestEvent, ResponseEvent};
pub use inbound::{HandlerError, InboundRouter};
pub use node::{
    CsmsOutgoingMessages, FileTransferOutgoing, NetworkingNode, SendRequest,
    SignaturePolicyOutgoing, UserRoleOutgoing,
};
pub use rng::IdGenerator;
pub use transport::{
    CallFault, OutgoingCall, RetryTransport, Transport, TransportError, TransportReply,
    WebsocketTransport,
};

pub use tokio_util::sync::CancellationToken;
