//! Flat key-value request bodies

use std::collections::BTreeMap;

use serde_json::Value;

/// The body of one action call: an `Action` name plus flat fields
///
/// Field names are the remote API's own (`queueName`, `maxMsgSize`, ...).
/// Signing and encoding the body is left to the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestParams {
    action: String,
    fields: BTreeMap<String, Value>,
}

impl RequestParams {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as string pairs, `Action` first, ready for form encoding
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.fields.len() + 1);
        pairs.push(("Action".to_string(), self.action.clone()));
        for (key, value) in &self.fields {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            pairs.push((key.clone(), value));
        }
        pairs
    }
}
