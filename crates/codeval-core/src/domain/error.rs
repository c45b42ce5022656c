//! Error taxonomy for codeval.
//!
//! Only [`ConfigError`] is fatal. [`AgentError`] never escapes the
//! orchestrator: it is folded into a degraded `EvaluationResult`.

use std::time::Duration;

use completion_gateway::CompletionError;

use crate::domain::perspective::Perspective;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is required but not set")]
    MissingApiKey { key: String },

    #[error("invalid {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// A single evaluator agent call failed.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("{perspective} evaluation failed: {source}")]
    ServiceCall {
        perspective: Perspective,
        #[source]
        source: CompletionError,
    },

    #[error("{perspective} evaluation timed out after {}s", .after.as_secs())]
    Timeout {
        perspective: Perspective,
        after: Duration,
    },
}

impl AgentError {
    pub fn perspective(&self) -> Perspective {
        match self {
            AgentError::ServiceCall { perspective, .. } => *perspective,
            AgentError::Timeout { perspective, .. } => *perspective,
        }
    }

    /// Short reason shown to the user in place of feedback.
    pub fn user_reason(&self) -> String {
        match self {
            AgentError::ServiceCall { source, .. } => source.to_string(),
            AgentError::Timeout { after, .. } => {
                format!("no response within {}s", after.as_secs())
            }
        }
    }
}
