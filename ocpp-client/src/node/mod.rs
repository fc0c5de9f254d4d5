mod outgoing;
mod relay;

pub use outgoing::{
    CsmsOutgoingMessages, FileTransferOutgoing, SendRequest, SignaturePolicyOutgoing,
    UserRoleOutgoing,
};
pub use relay::NetworkingNode;
