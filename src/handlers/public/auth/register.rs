use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::api::RegisterPayload;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /register - Register new user account
///
/// Expected Input:
/// ```json
/// { "username": "ada", "email": "ada@example.com", "password": "at-least-6" }
/// ```
///
/// Responds 201 with the public user profile. A taken email is a 400
/// validation error.
pub async fn register_post(
    State(state): State<AppState>,
    body: Result<Json<RegisterPayload>, JsonRejection>,
) -> ApiResult<Value> {
    let input = json_body(body)?.validate()?;
    let user = state.auth.register(input).await?;

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully",
        "user": user,
    })))
}
