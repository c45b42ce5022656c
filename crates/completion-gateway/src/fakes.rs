//! In-memory fakes for `CompletionService` (testing only)
//!
//! Provides `ScriptedCompletion`, `FailingCompletion` and `SlowCompletion`
//! that satisfy the trait contract without any network access.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::{CompletionService, Result};

// ---------------------------------------------------------------------------
// ScriptedCompletion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail { status: u16, body: String },
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    reply: Reply,
}

/// Answers prompts from a script of `(needle, reply)` rules.
///
/// The first rule whose needle occurs in the prompt wins; otherwise the
/// default reply is used. Every prompt received is recorded.
#[derive(Debug)]
pub struct ScriptedCompletion {
    rules: Vec<Rule>,
    default_reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    /// Reply with `text` to every prompt.
    pub fn new(default_text: &str) -> Self {
        ScriptedCompletion {
            rules: Vec::new(),
            default_reply: Reply::Text(default_text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `text` when the prompt contains `needle`.
    pub fn when(mut self, needle: &str, text: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply: Reply::Text(text.to_string()),
        });
        self
    }

    /// Fail with an HTTP-style status when the prompt contains `needle`.
    pub fn fail_when(mut self, needle: &str, status: u16) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply: Reply::Fail {
                status,
                body: format!("scripted failure for '{needle}'"),
            },
        });
        self
    }

    /// All prompts received so far, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self
            .rules
            .iter()
            .find(|rule| prompt.contains(&rule.needle))
            .map(|rule| &rule.reply)
            .unwrap_or(&self.default_reply);

        match reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail { status, body } => Err(CompletionError::from_status(*status, body)),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// FailingCompletion
// ---------------------------------------------------------------------------

/// Fails every call with a transport error.
#[derive(Debug, Default)]
pub struct FailingCompletion {
    reason: String,
}

impl FailingCompletion {
    pub fn new(reason: &str) -> Self {
        FailingCompletion {
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl CompletionService for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(CompletionError::Transport(self.reason.clone()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

// ---------------------------------------------------------------------------
// SlowCompletion
// ---------------------------------------------------------------------------

/// Sleeps for `delay` before answering when the prompt contains `needle`;
/// answers every other prompt immediately.
#[derive(Debug)]
pub struct SlowCompletion {
    needle: String,
    delay: Duration,
    text: String,
}

impl SlowCompletion {
    pub fn new(needle: &str, delay: Duration, text: &str) -> Self {
        SlowCompletion {
            needle: needle.to_string(),
            delay,
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl CompletionService for SlowCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains(&self.needle) {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.text.clone())
    }

    fn model_name(&self) -> &str {
        "slow"
    }
}
