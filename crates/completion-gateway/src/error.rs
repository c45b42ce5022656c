//! Error types for completion-gateway

use thiserror::Error;

/// Errors that can occur while calling a text-completion service
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Credential rejected by the service
    #[error("authentication rejected by completion service (status {status})")]
    Auth { status: u16 },

    /// Quota exhausted or request rate too high
    #[error("completion service rate limit exceeded")]
    RateLimited,

    /// Any other non-success status; `body` is a one-line summary of the
    /// response, see [`summarize_body`]
    #[error("completion service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// Network-level failure (DNS, connect, TLS, client timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded into text
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Longest error body summary kept in a `Service` error, in characters.
pub const MAX_BODY_SUMMARY: usize = 200;

impl CompletionError {
    /// Map an HTTP status and response body to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => CompletionError::Auth { status },
            429 => CompletionError::RateLimited,
            _ => CompletionError::Service {
                status,
                body: summarize_body(body),
            },
        }
    }
}

/// Reduce an error response body to one short line.
///
/// Google APIs answer with `{"error": {"message": ...}}`; the message is used
/// when present, otherwise the raw body with whitespace collapsed. Either is
/// cut to [`MAX_BODY_SUMMARY`] characters.
pub fn summarize_body(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    let line = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= MAX_BODY_SUMMARY {
        line
    } else {
        let cut: String = line.chars().take(MAX_BODY_SUMMARY).collect();
        format!("{cut}...")
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        CompletionError::MalformedResponse(err.to_string())
    }
}
