use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use codeval_core::{AggregateReport, CodeSubmission, EvaluationSettings, Orchestrator};
use completion_gateway::CompletionService;

use crate::error::ApiError;
use crate::page::{render_form, render_report, BLANK_WARNING, SAMPLE_CODE};

/// Shared, immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(service: Arc<dyn CompletionService>, settings: EvaluationSettings) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(service, settings)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub code: String,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> Html<String> {
    Html(render_form(SAMPLE_CODE, None))
}

async fn evaluate_form(
    State(state): State<AppState>,
    Form(request): Form<EvaluateRequest>,
) -> Html<String> {
    let submission = CodeSubmission::new(request.code);
    if submission.is_blank() {
        return Html(render_form(submission.code(), Some(BLANK_WARNING)));
    }
    let report = state.orchestrator.evaluate(&submission).await;
    Html(render_report(submission.code(), &report))
}

async fn evaluate_json(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<AggregateReport>, ApiError> {
    let submission = CodeSubmission::new(request.code);
    if submission.is_blank() {
        return Err(ApiError::BlankSubmission);
    }
    Ok(Json(state.orchestrator.evaluate(&submission).await))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/evaluate", post(evaluate_form))
        .route("/api/evaluate", post(evaluate_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
