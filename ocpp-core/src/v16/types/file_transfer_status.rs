#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileTransferStatus {
    Accepted,
    Rejected,
    NotFound,
    InvalidFileName,
    InvalidContent,
    Error,
}
