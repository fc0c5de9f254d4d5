use std::{fmt, time::Duration};

use ocppx_core::{identity::IdentityError, ChargeBoxId};

/// What a connection does with a call issued while another one is still
/// waiting for its answer.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallPolicy {
    /// Wait until the connection is free.
    #[default]
    Queue,
    /// Fail at once with `TransportError::CallPending`.
    Reject,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RetryPolicy {
    pub retry_delay_ms: u64,
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_delay_ms: 2000,
            max_retries: 3,
        }
    }
}

impl RetryPolicy {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClientConfig {
    pub cms_url: String,
    pub charge_box_id: String,
    /// Seconds to wait for a CALLRESULT before giving up.
    pub call_timeout: u64,
    pub retry: RetryPolicy,
    pub subprotocol: String,
    pub call_policy: CallPolicy,
    pub seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cms_url: "ws://localhost:9000".into(),
            charge_box_id: "CP001".into(),
            call_timeout: 30,
            retry: RetryPolicy::default(),
            subprotocol: "ocpp1.6".into(),
            call_policy: CallPolicy::default(),
            seed: 0,
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Json)?;
        config.charge_box_id()?;
        Ok(config)
    }

    pub fn charge_box_id(&self) -> Result<ChargeBoxId, ConfigError> {
        ChargeBoxId::parse(&self.charge_box_id).map_err(ConfigError::ChargeBoxId)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout)
    }

    /// OCPP-J endpoint: the station identity is the last path segment.
    pub fn endpoint_url(&self) -> String {
        format!("{}/{}", self.cms_url.trim_end_matches('/'), self.charge_box_id)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    ChargeBoxId(IdentityError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "invalid client config: {e}"),
            ConfigError::ChargeBoxId(e) => write!(f, "invalid charge_box_id: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::ChargeBoxId(e) => Some(e),
        }
    }
}
