use serde_json::Value;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Call {
    pub unique_id: String,
    pub action: String,
    pub payload: Value,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct CallResult {
    pub unique_id: String,
    pub payload: Value,
}

impl CallResult {
    pub fn new(unique_id: String, payload: Value) -> Self {
        Self { unique_id, payload }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct CallError<T> {
    pub unique_id: String,
    pub error_code: T,
    pub error_description: String,
    pub error_details: Value,
}

impl<T> CallError<T> {
    pub fn new(unique_id: String, error_code: T) -> Self {
        Self {
            unique_id,
            error_code,
            error_description: String::new(),
            error_details: serde_json::json!({}),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.error_description = description.into();
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.error_details = details;
        self
    }
}
