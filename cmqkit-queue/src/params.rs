//! Queue creation parameters

use cmqkit_core::{CreationParams, RequestParams, ResourceKind};
use serde::{Deserialize, Serialize};

/// Tunables sent with `CreateQueue`
///
/// Omitted fields take the service's documented defaults, filled in here
/// before the request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueParams {
    /// Maximum number of messages held in the queue
    #[serde(default = "default_max_msg_heap_num")]
    pub max_msg_heap_num: u64,

    /// Long-polling wait for receives, in seconds
    #[serde(default)]
    pub polling_wait_seconds: u32,

    #[serde(default = "default_visibility_timeout")]
    pub visibility_timeout: u32,

    /// Maximum message body size in bytes
    #[serde(default = "default_max_msg_size")]
    pub max_msg_size: u32,

    #[serde(default = "default_msg_retention_seconds")]
    pub msg_retention_seconds: u32,
}

impl Default for QueueParams {
    fn default() -> Self {
        Self {
            max_msg_heap_num: default_max_msg_heap_num(),
            polling_wait_seconds: 0,
            visibility_timeout: default_visibility_timeout(),
            max_msg_size: default_max_msg_size(),
            msg_retention_seconds: default_msg_retention_seconds(),
        }
    }
}

fn default_max_msg_heap_num() -> u64 {
    10_000_000
}

fn default_visibility_timeout() -> u32 {
    30
}

fn default_max_msg_size() -> u32 {
    65536
}

fn default_msg_retention_seconds() -> u32 {
    345_600 // 4 days
}

impl QueueParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_msg_heap_num(mut self, value: u64) -> Self {
        self.max_msg_heap_num = value;
        self
    }

    pub fn with_polling_wait_seconds(mut self, value: u32) -> Self {
        self.polling_wait_seconds = value;
        self
    }

    pub fn with_visibility_timeout(mut self, value: u32) -> Self {
        self.visibility_timeout = value;
        self
    }

    pub fn with_max_msg_size(mut self, value: u32) -> Self {
        self.max_msg_size = value;
        self
    }

    pub fn with_msg_retention_seconds(mut self, value: u32) -> Self {
        self.msg_retention_seconds = value;
        self
    }
}

impl CreationParams for QueueParams {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Queue
    }

    fn write_fields(&self, request: &mut RequestParams) {
        request.insert("maxMsgHeapNum", self.max_msg_heap_num);
        request.insert("pollingWaitSeconds", self.polling_wait_seconds);
        request.insert("visibilityTimeout", self.visibility_timeout);
        request.insert("maxMsgSize", self.max_msg_size);
        request.insert("msgRetentionSeconds", self.msg_retention_seconds);
    }
}
