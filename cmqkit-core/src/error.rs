//! Error types for remote calls and reconciliation

use std::fmt;

use thiserror::Error;

use crate::resource::ResourceKind;
use crate::response::ApiResponse;

/// Failure reported by a transport before any remote status code was seen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Which remote call of a reconciliation produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Create,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`crate::Reconciler::assert_resource`]
#[derive(Debug, Error)]
pub enum AssertError {
    #[error("invalid resource name: {0:?}")]
    InvalidName(String),

    #[error("{params} parameters passed for a {resource}")]
    KindMismatch {
        resource: ResourceKind,
        params: ResourceKind,
    },

    #[error("transport failure during {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The remote service answered with a code the reconciler does not
    /// interpret. The payload is passed through untouched.
    #[error("remote error during {stage}: {} {}", .response.code, .response.message)]
    Remote { stage: Stage, response: ApiResponse },
}

impl AssertError {
    /// Remote payload carried by the error, if the remote side answered
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Remote { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::InvalidName(_) | Self::KindMismatch { .. } => None,
            Self::Transport { stage, .. } | Self::Remote { stage, .. } => Some(*stage),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
