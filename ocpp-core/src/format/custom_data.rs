use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

/// Wire key of the vendor extension object.
pub const CUSTOM_DATA_FIELD: &str = "customData";

/// Vendor extension bag. Carried verbatim, never checked against a schema.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CustomData(Map<String, Value>);

impl CustomData {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Lifts the extension object out of a message body. An absent field is
    /// fine, anything other than an object is not.
    pub fn from_payload(payload: &Value) -> Result<Option<Self>, String> {
        match payload.get(CUSTOM_DATA_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Self(map.clone()))),
            Some(other) => Err(format!("{CUSTOM_DATA_FIELD} must be a JSON object, got {other}")),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

// Map keys are kept sorted, so the serialized text is a stable hash input.
impl Hash for CustomData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Value::Object(self.0.clone()).to_string().hash(state);
    }
}

impl From<Map<String, Value>> for CustomData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
