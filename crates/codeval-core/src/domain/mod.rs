//! Domain models for codeval.
//!
//! - `CodeSubmission`: the code under evaluation
//! - `Perspective`: the three fixed evaluation angles
//! - `EvaluationResult` / `AggregateReport`: per-perspective verdicts and their mean

pub mod error;
pub mod perspective;
pub mod result;
pub mod submission;

pub use error::{AgentError, ConfigError};
pub use perspective::Perspective;
pub use result::{
    mean_score, AggregateReport, EvaluationOutcome, EvaluationResult, QualityBand, ScoreColor,
    FALLBACK_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use submission::CodeSubmission;
