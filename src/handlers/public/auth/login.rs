use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::LoginPayload;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::LoginResponse;
use crate::state::AppState;

/// POST /login - Authenticate user and receive JWT token
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "message": "Login successful",
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "expires_in": 259200,
///     "user": { "id": "user_uuid", "username": "ada", "email": "ada@example.com" }
///   }
/// }
/// ```
///
/// Unknown email and wrong password both answer 401 with the same message.
pub async fn login_post(
    State(state): State<AppState>,
    body: Result<Json<LoginPayload>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let input = json_body(body)?.validate()?;
    let response = state.auth.login(input).await?;
    Ok(ApiResponse::success(response))
}
