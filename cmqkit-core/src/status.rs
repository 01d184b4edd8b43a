//! Mapping of remote status codes to reconciliation outcomes
//!
//! The service is not consistent about how it reports a duplicate name: some
//! deployments answer with the dedicated code, others with the generic error
//! code and the dedicated code embedded in the message text. Both shapes are
//! rows in the table, so the mapping can change without touching control flow.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;
use crate::response::ApiResponse;

pub const CODE_SUCCESS: i64 = 0;
pub const CODE_GENERIC_ERROR: i64 = 4000;
pub const CODE_NOT_FOUND: i64 = 4440;
pub const CODE_DUPLICATE_NAME: i64 = 4460;

/// What a status code means to the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NotFound,
    DuplicateName,
}

/// One row: a code, optionally narrowed by a message substring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRule {
    pub code: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_contains: Option<String>,

    pub outcome: Outcome,
}

impl StatusRule {
    pub fn code(code: i64, outcome: Outcome) -> Self {
        Self {
            code,
            message_contains: None,
            outcome,
        }
    }

    pub fn code_with_message(code: i64, marker: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            code,
            message_contains: Some(marker.into()),
            outcome,
        }
    }

    pub fn matches(&self, response: &ApiResponse) -> bool {
        if response.code != self.code {
            return false;
        }
        match &self.message_contains {
            Some(marker) => response.message.contains(marker.as_str()),
            None => true,
        }
    }
}

/// Ordered rules; the first match wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusTable {
    rules: Vec<StatusRule>,
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::new(vec![
            StatusRule::code(CODE_SUCCESS, Outcome::Success),
            StatusRule::code(CODE_NOT_FOUND, Outcome::NotFound),
            StatusRule::code(CODE_DUPLICATE_NAME, Outcome::DuplicateName),
            StatusRule::code_with_message(
                CODE_GENERIC_ERROR,
                CODE_DUPLICATE_NAME.to_string(),
                Outcome::DuplicateName,
            ),
        ])
    }
}

impl StatusTable {
    pub fn new(rules: Vec<StatusRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[StatusRule] {
        &self.rules
    }

    /// Append a rule; it only applies when no earlier rule matches
    pub fn with_rule(mut self, rule: StatusRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// `None` means the code is not one the reconciler interprets
    pub fn classify(&self, response: &ApiResponse) -> Option<Outcome> {
        self.rules
            .iter()
            .find(|rule| rule.matches(response))
            .map(|rule| rule.outcome)
    }
}

/// One table per resource kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTables {
    #[serde(default)]
    pub queue: StatusTable,

    #[serde(default)]
    pub topic: StatusTable,
}

impl StatusTables {
    pub fn for_kind(&self, kind: ResourceKind) -> &StatusTable {
        match kind {
            ResourceKind::Queue => &self.queue,
            ResourceKind::Topic => &self.topic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = StatusTable::default();

        assert_eq!(table.classify(&ApiResponse::ok()), Some(Outcome::Success));
        assert_eq!(
            table.classify(&ApiResponse::error(4440, "queue is not exist")),
            Some(Outcome::NotFound)
        );
        assert_eq!(
            table.classify(&ApiResponse::error(4460, "queue is already existed")),
            Some(Outcome::DuplicateName)
        );
        assert_eq!(table.classify(&ApiResponse::error(4100, "auth failed")), None);
    }

    #[test]
    fn test_generic_code_needs_marker() {
        let table = StatusTable::default();

        let embedded = ApiResponse::error(4000, "(10460)create queue failed: (4460)duplicated name");
        assert_eq!(table.classify(&embedded), Some(Outcome::DuplicateName));

        let plain = ApiResponse::error(4000, "invalid parameter maxMsgSize");
        assert_eq!(table.classify(&plain), None);
    }

    #[test]
    fn test_first_rule_wins() {
        let table = StatusTable::new(vec![
            StatusRule::code(7, Outcome::NotFound),
            StatusRule::code(7, Outcome::Success),
        ]);

        assert_eq!(table.classify(&ApiResponse::error(7, "")), Some(Outcome::NotFound));
    }

    #[test]
    fn test_tables_deserialize_per_kind() {
        let json = r#"{
            "topic": [
                {"code": 0, "outcome": "success"},
                {"code": 4440, "outcome": "not_found"},
                {"code": 4518, "outcome": "duplicate_name"}
            ]
        }"#;

        let tables: StatusTables = serde_json::from_str(json).unwrap();

        assert_eq!(tables.queue, StatusTable::default());
        let topic = tables.for_kind(ResourceKind::Topic);
        assert_eq!(topic.rules().len(), 3);
        assert_eq!(
            topic.classify(&ApiResponse::error(4518, "")),
            Some(Outcome::DuplicateName)
        );
        assert_eq!(topic.classify(&ApiResponse::error(4460, "")), None);
    }
}
