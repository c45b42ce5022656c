//! Structured observability hooks for the evaluation lifecycle.
//!
//! This module provides:
//! - An evaluation-scoped tracing span (`evaluation_span`)
//! - Emission functions for key lifecycle events: start, phase change,
//!   per-perspective finish/degrade, aggregation
//!
//! Events carry the evaluation id and the submission digest, never the code
//! or any credential.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{EvaluationOutcome, Perspective};

/// Span scoping every log line of one evaluation; the orchestrator
/// instruments its future with it.
pub(crate) fn evaluation_span(evaluation_id: Uuid, digest: &str) -> tracing::Span {
    tracing::info_span!(
        "codeval.evaluation",
        evaluation_id = %evaluation_id,
        digest = %digest
    )
}

/// Emit event: evaluation started.
pub(crate) fn emit_evaluation_started(
    evaluation_id: Uuid,
    digest: &str,
    code_len: usize,
    model: &str,
) {
    info!(
        event = "evaluation.started",
        evaluation_id = %evaluation_id,
        digest = %digest,
        code_len = code_len,
        model = %model,
    );
}

/// Emit event: orchestrator phase transition.
pub(crate) fn emit_phase_changed(evaluation_id: Uuid, from: &str, to: &str) {
    debug!(
        event = "evaluation.phase_changed",
        evaluation_id = %evaluation_id,
        from = %from,
        to = %to,
    );
}

/// Emit event: one perspective produced its result.
pub(crate) fn emit_perspective_finished(
    evaluation_id: Uuid,
    perspective: Perspective,
    outcome: EvaluationOutcome,
    score: f64,
    elapsed_ms: u64,
) {
    info!(
        event = "evaluation.perspective_finished",
        evaluation_id = %evaluation_id,
        perspective = %perspective,
        outcome = ?outcome,
        score = score,
        elapsed_ms = elapsed_ms,
    );
}

/// Emit event: a perspective fell back to the fallback score (warning level).
pub(crate) fn emit_perspective_degraded(
    evaluation_id: Uuid,
    perspective: Perspective,
    reason: &dyn std::fmt::Display,
) {
    warn!(
        event = "evaluation.perspective_degraded",
        evaluation_id = %evaluation_id,
        perspective = %perspective,
        reason = %reason,
    );
}

/// Emit event: all perspectives joined and the mean computed.
pub(crate) fn emit_evaluation_aggregated(
    evaluation_id: Uuid,
    mean_score: f64,
    degraded: usize,
    duration_ms: u64,
) {
    info!(
        event = "evaluation.aggregated",
        evaluation_id = %evaluation_id,
        mean_score = mean_score,
        degraded = degraded,
        duration_ms = duration_ms,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_emitted_inside_evaluation_span() {
        let id = Uuid::new_v4();
        let span = evaluation_span(id, "abc123");
        let _entered = span.enter();
        emit_evaluation_started(id, "abc123", 42, "scripted");
        emit_perspective_degraded(id, Perspective::Readability, &"no score found in response");
        emit_evaluation_aggregated(id, 6.0, 1, 12);
    }
}
