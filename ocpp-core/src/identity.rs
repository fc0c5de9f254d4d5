//! Identities carried by every message: who a message is for, which call it
//! belongs to, and which causal chain of events it is part of.

use std::{
    fmt::{self, Write},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde_json::Value;

/// Name of the optional body field a networking node uses to re-target a
/// message at the charging station it fronts.
pub const PAYLOAD_ADDRESS_FIELD: &str = "chargeBoxId";

const MAX_IDENTITY_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    Empty,
    TooLong(usize),
    InvalidCharacter(char),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Empty => write!(f, "identity must not be empty"),
            IdentityError::TooLong(len) => {
                write!(f, "identity is {len} characters long, at most {MAX_IDENTITY_LEN} allowed")
            }
            IdentityError::InvalidCharacter(c) => {
                write!(f, "identity contains invalid character {c:?}")
            }
        }
    }
}

impl std::error::Error for IdentityError {}

fn validate(text: &str) -> Result<&str, IdentityError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IdentityError::Empty);
    }
    let len = text.chars().count();
    if len > MAX_IDENTITY_LEN {
        return Err(IdentityError::TooLong(len));
    }
    if let Some(c) = text.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdentityError::InvalidCharacter(c));
    }
    Ok(text)
}

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident, case_insensitive = $ci:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(String);

        impl $name {
            pub fn parse(text: &str) -> Result<Self, IdentityError> {
                validate(text).map(|t| Self(t.to_string()))
            }

            pub fn try_parse(text: &str) -> Option<Self> {
                Self::parse(text).ok()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            fn normalized(&self) -> std::borrow::Cow<'_, str> {
                if $ci {
                    std::borrow::Cow::Owned(self.0.to_lowercase())
                } else {
                    std::borrow::Cow::Borrowed(&self.0)
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.normalized() == other.normalized()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.normalized().hash(state);
            }
        }

        impl FromStr for $name {
            type Err = IdentityError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

identity!(
    /// Charging station identity, the routing key of every message.
    /// Compared case-insensitively.
    ChargeBoxId,
    case_insensitive = true
);

identity!(
    /// Correlates a CALL with its CALLRESULT/CALLERROR. Case-sensitive, as the
    /// peer echoes it byte for byte.
    RequestId,
    case_insensitive = false
);

identity!(
    /// Ties a request to causally related events (log lines, retries, relayed
    /// hops) across component boundaries.
    EventTrackingId,
    case_insensitive = true
);

impl ChargeBoxId {
    /// Picks the station a message is really addressed to.
    ///
    /// A valid `chargeBoxId` inside the body wins over the identity of the
    /// connection the message arrived on. An absent or malformed body field
    /// leaves the connection identity in place.
    pub fn resolve(connection: &ChargeBoxId, payload: &Value) -> ChargeBoxId {
        Self::from_payload(payload).unwrap_or_else(|| connection.clone())
    }

    pub fn from_payload(payload: &Value) -> Option<ChargeBoxId> {
        payload
            .get(PAYLOAD_ADDRESS_FIELD)
            .and_then(Value::as_str)
            .and_then(ChargeBoxId::try_parse)
    }
}

impl RequestId {
    /// Formats 16 random bytes as a version 4 UUID.
    pub fn from_random_bytes(mut bytes: [u8; 16]) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        let mut s = String::with_capacity(36);
        for (i, b) in bytes.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                s.push('-');
            }
            let _ = write!(s, "{:02x}", b);
        }
        Self(s)
    }
}

impl EventTrackingId {
    pub fn from_request_id(request_id: &RequestId) -> Self {
        Self(request_id.as_str().to_string())
    }
}
