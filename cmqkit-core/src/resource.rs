//! Resource kinds and creation parameters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::RequestParams;

/// The two kinds of named resource the service manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Queue,
    Topic,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Topic => "topic",
        }
    }

    /// Request field carrying the resource name
    pub fn name_field(&self) -> &'static str {
        match self {
            Self::Queue => "queueName",
            Self::Topic => "topicName",
        }
    }

    pub fn get_attributes_action(&self) -> &'static str {
        match self {
            Self::Queue => "GetQueueAttributes",
            Self::Topic => "GetTopicAttributes",
        }
    }

    pub fn create_action(&self) -> &'static str {
        match self {
            Self::Queue => "CreateQueue",
            Self::Topic => "CreateTopic",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one remote resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub name: String,
    pub kind: ResourceKind,
}

impl ResourceDescriptor {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn queue(name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Queue, name)
    }

    pub fn topic(name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Topic, name)
    }

    /// Body of the `Get*Attributes` call for this resource
    pub fn get_attributes_request(&self) -> RequestParams {
        RequestParams::new(self.kind.get_attributes_action())
            .with(self.kind.name_field(), self.name.as_str())
    }

    /// Body of the `Create*` call, with the creation fields written in
    pub fn create_request(&self, params: &dyn CreationParams) -> RequestParams {
        let mut request = RequestParams::new(self.kind.create_action())
            .with(self.kind.name_field(), self.name.as_str());
        params.write_fields(&mut request);
        request
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Kind-specific tunables sent along with a create call
///
/// Values are not validated locally; the remote service owns validation.
pub trait CreationParams: Send + Sync {
    fn kind(&self) -> ResourceKind;

    fn write_fields(&self, request: &mut RequestParams);
}
