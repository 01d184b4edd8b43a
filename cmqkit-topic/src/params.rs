//! Topic creation parameters

use cmqkit_core::{CreationParams, RequestParams, ResourceKind};
use serde::{Deserialize, Serialize};

/// How subscriptions on a topic select messages. Fixed once the topic exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Match on message tags
    #[default]
    Tag,
    /// Match on routing/binding keys
    BindingKey,
}

impl FilterType {
    pub fn code(&self) -> u8 {
        match self {
            Self::Tag => 1,
            Self::BindingKey => 2,
        }
    }
}

/// Tunables sent with `CreateTopic`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicParams {
    /// Maximum message body size in bytes (1024 to 65536)
    #[serde(default = "default_max_msg_size")]
    pub max_msg_size: u32,

    /// Tag filtering unless set otherwise
    #[serde(default)]
    pub filter_type: FilterType,
}

impl Default for TopicParams {
    fn default() -> Self {
        Self {
            max_msg_size: default_max_msg_size(),
            filter_type: FilterType::default(),
        }
    }
}

fn default_max_msg_size() -> u32 {
    65536
}

impl TopicParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_msg_size(mut self, value: u32) -> Self {
        self.max_msg_size = value;
        self
    }

    pub fn with_filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }
}

impl CreationParams for TopicParams {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Topic
    }

    fn write_fields(&self, request: &mut RequestParams) {
        request.insert("maxMsgSize", self.max_msg_size);
        request.insert("filterType", self.filter_type.code());
    }
}
