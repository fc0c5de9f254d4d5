use crate::format::{non_empty, SetOf};

/// Which actions a node must sign, and with what priority the policy applies.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePolicy {
    pub id: String,
    pub priority: u32,
    #[serde(deserialize_with = "non_empty")]
    pub actions: SetOf<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}
