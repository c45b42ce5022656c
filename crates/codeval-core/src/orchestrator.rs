//! Fan-out / fan-in over the three evaluator agents.
//!
//! The three calls are independent: each reads the shared submission and
//! writes only its own result, so they run concurrently and are joined once.
//! Every call is bounded by `EvaluationSettings::call_timeout`. A failed,
//! timed-out or unparseable call degrades only its own perspective to the
//! fallback score; `evaluate` itself never fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use completion_gateway::CompletionService;
use futures::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

use crate::agent::EvaluatorAgent;
use crate::domain::{
    AgentError, AggregateReport, CodeSubmission, EvaluationOutcome, EvaluationResult, Perspective,
};
use crate::obs::{
    emit_evaluation_aggregated, emit_evaluation_started, emit_perspective_degraded,
    emit_perspective_finished, emit_phase_changed, evaluation_span,
};
use crate::score::parse_response;

/// Default bound on a single completion call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-orchestrator settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    /// Maximum wait for one perspective's response.
    pub call_timeout: Duration,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

/// Lifecycle of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationPhase {
    NotStarted,
    AwaitingResponses,
    Aggregated,
}

impl EvaluationPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationPhase::NotStarted => "not_started",
            EvaluationPhase::AwaitingResponses => "awaiting_responses",
            EvaluationPhase::Aggregated => "aggregated",
        }
    }

    /// The only phase that may follow this one; `Aggregated` is terminal.
    pub fn next(self) -> Option<EvaluationPhase> {
        match self {
            EvaluationPhase::NotStarted => Some(EvaluationPhase::AwaitingResponses),
            EvaluationPhase::AwaitingResponses => Some(EvaluationPhase::Aggregated),
            EvaluationPhase::Aggregated => None,
        }
    }
}

fn advance(evaluation_id: Uuid, phase: &mut EvaluationPhase) {
    if let Some(next) = phase.next() {
        emit_phase_changed(evaluation_id, phase.as_str(), next.as_str());
        *phase = next;
    }
}

/// Runs one evaluator agent per perspective and aggregates their scores.
pub struct Orchestrator {
    agents: Vec<EvaluatorAgent>,
    settings: EvaluationSettings,
    model: String,
}

impl Orchestrator {
    /// Create an orchestrator over `service`, one agent per perspective.
    pub fn new(service: Arc<dyn CompletionService>, settings: EvaluationSettings) -> Self {
        let model = service.model_name().to_string();
        let agents = Perspective::ALL
            .iter()
            .map(|perspective| EvaluatorAgent::new(*perspective, Arc::clone(&service)))
            .collect();
        Self {
            agents,
            settings,
            model,
        }
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Evaluate `submission` from every perspective.
    pub async fn evaluate(&self, submission: &CodeSubmission) -> AggregateReport {
        let evaluation_id = Uuid::new_v4();
        let span = evaluation_span(evaluation_id, submission.short_digest());
        self.run(evaluation_id, submission).instrument(span).await
    }

    async fn run(&self, evaluation_id: Uuid, submission: &CodeSubmission) -> AggregateReport {
        let started = Instant::now();
        let mut phase = EvaluationPhase::NotStarted;
        emit_evaluation_started(
            evaluation_id,
            submission.digest(),
            submission.code().len(),
            &self.model,
        );

        advance(evaluation_id, &mut phase);
        let calls = self
            .agents
            .iter()
            .map(|agent| self.run_agent(evaluation_id, agent, submission));
        let results = join_all(calls).await;

        advance(evaluation_id, &mut phase);
        let report = AggregateReport::new(evaluation_id, submission, results);
        emit_evaluation_aggregated(
            evaluation_id,
            report.mean_score(),
            report.degraded_count(),
            started.elapsed().as_millis() as u64,
        );
        report
    }

    async fn run_agent(
        &self,
        evaluation_id: Uuid,
        agent: &EvaluatorAgent,
        submission: &CodeSubmission,
    ) -> EvaluationResult {
        let started = Instant::now();
        let perspective = agent.perspective();
        let timeout = self.settings.call_timeout;

        let response = match tokio::time::timeout(timeout, agent.evaluate(submission)).await {
            Ok(response) => response,
            Err(_) => Err(AgentError::Timeout {
                perspective,
                after: timeout,
            }),
        };

        let result = match response {
            Ok(text) => {
                let result = parse_response(&text).into_result(perspective);
                if result.outcome == EvaluationOutcome::Unparsed {
                    emit_perspective_degraded(
                        evaluation_id,
                        perspective,
                        &"no score found in response",
                    );
                }
                result
            }
            Err(err) => {
                emit_perspective_degraded(evaluation_id, perspective, &err);
                EvaluationResult::failed(perspective, &err.user_reason())
            }
        };

        emit_perspective_finished(
            evaluation_id,
            perspective,
            result.outcome,
            result.score,
            started.elapsed().as_millis() as u64,
        );
        result
    }
}
