// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required)
pub mod protected; // Tier 2: JWT authentication required (/dashboard, /tasks, /goals)
pub mod public;    // Tier 1: No authentication required (/, /health, /register, /login)

use axum::extract::rejection::JsonRejection;
use axum::Json;
use uuid::Uuid;

use crate::error::ApiError;

/// Unwrap a JSON body, turning extractor rejections into 400 responses.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::invalid_json(rejection.body_text())
    })
}

/// Parse a path id; anything that is not a UUID cannot name a row.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}
