//! Decoded remote responses

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A decoded answer from the message-queue service
///
/// Every action answers with a numeric `code` and a `message`; anything else
/// the service sends back (queue attributes, ids, ...) lands in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,

    #[serde(rename = "requestId", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Some error answers carry `"message": null`
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiResponse {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
            attributes: Map::new(),
        }
    }

    /// A success answer (`code` 0) with an empty message
    pub fn ok() -> Self {
        Self::new(0, "")
    }

    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}
