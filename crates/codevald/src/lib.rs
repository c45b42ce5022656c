//! codevald: browser form and JSON API in front of the codeval orchestrator.
//!
//! - `GET /`: input form, prefilled with a sample
//! - `POST /evaluate`: form submission, answers with the HTML report
//! - `POST /api/evaluate`: `{"code": "..."}` in, `AggregateReport` JSON out
//! - `GET /health`: liveness

pub mod error;
pub mod page;
pub mod routes;

pub use error::ApiError;
pub use routes::{build_router, AppState};
