use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Request-level failures of the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Please enter some code to evaluate")]
    BlankSubmission,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BlankSubmission => StatusCode::BAD_REQUEST,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
