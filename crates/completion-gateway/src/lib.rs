//! Completion-Gateway: text-completion capability for codeval
//!
//! Defines the single operation the evaluator needs from a hosted model,
//! `complete(prompt) -> text`, behind the [`CompletionService`] trait.
//!
//! - [`gemini`]: production client for the Google Gemini REST API
//! - [`fakes`]: in-memory services for tests (scripted, failing, slow)
//! - [`error`]: `CompletionError`

pub mod error;
pub mod fakes;
pub mod gemini;

use async_trait::async_trait;

pub use error::CompletionError;
pub use gemini::{GeminiClient, GeminiConfig};

/// Result type for completion operations
pub type Result<T> = std::result::Result<T, CompletionError>;

/// A hosted text-completion service.
///
/// Implementations are stateless from the caller's point of view: each call
/// is one outbound request and calls may run concurrently.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `prompt` and return the model's raw text response.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Name of the backing model, for logging.
    fn model_name(&self) -> &str;
}
