//! codeval-core: multi-perspective code evaluation
//!
//! A submission is sent to three evaluator agents (time complexity, space
//! complexity, readability), each asking a hosted model for feedback and a
//! 0-10 score. The orchestrator runs them concurrently and averages the
//! scores into an [`AggregateReport`].

pub mod agent;
pub mod config;
pub mod domain;
mod obs;
pub mod orchestrator;
pub mod prompt;
pub mod reporting;
pub mod score;
pub mod telemetry;

pub use agent::EvaluatorAgent;
pub use config::{load_env_files, ApiKey, AppConfig};
pub use domain::{
    mean_score, AgentError, AggregateReport, CodeSubmission, ConfigError, EvaluationOutcome,
    EvaluationResult, Perspective, QualityBand, ScoreColor, FALLBACK_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use orchestrator::{EvaluationPhase, EvaluationSettings, Orchestrator, DEFAULT_CALL_TIMEOUT};
pub use prompt::build_prompt;
pub use reporting::{format_mean, format_score, outcome_note, render_report_md, write_report_json};
pub use score::{parse_response, ParsedResponse};
pub use telemetry::init_tracing;

/// Crate version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
