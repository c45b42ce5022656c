//! Evaluator agents: one stateless wrapper per perspective around a single
//! completion call.

use std::sync::Arc;

use completion_gateway::CompletionService;
use tracing::{debug, instrument};

use crate::domain::{AgentError, CodeSubmission, Perspective};
use crate::prompt::build_prompt;

/// Sends one perspective's prompt to the completion service.
///
/// No retries: a failed call is reported once as [`AgentError::ServiceCall`].
#[derive(Clone)]
pub struct EvaluatorAgent {
    perspective: Perspective,
    service: Arc<dyn CompletionService>,
}

impl EvaluatorAgent {
    pub fn new(perspective: Perspective, service: Arc<dyn CompletionService>) -> Self {
        EvaluatorAgent {
            perspective,
            service,
        }
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Build the prompt for `submission` and return the model's raw text.
    #[instrument(
        skip(self, submission),
        fields(perspective = %self.perspective, model = %self.service.model_name())
    )]
    pub async fn evaluate(&self, submission: &CodeSubmission) -> Result<String, AgentError> {
        let prompt = build_prompt(submission, self.perspective);
        debug!(prompt_len = prompt.len(), "sending prompt");

        self.service
            .complete(&prompt)
            .await
            .map_err(|source| AgentError::ServiceCall {
                perspective: self.perspective,
                source,
            })
    }
}

impl std::fmt::Debug for EvaluatorAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorAgent")
            .field("perspective", &self.perspective)
            .field("model", &self.service.model_name())
            .finish()
    }
}
