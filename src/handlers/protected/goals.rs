use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::api::GoalPayload;
use crate::database::models::Goal;
use crate::handlers::{json_body, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

const NOT_FOUND: &str = "Goal not found";

/// GET /goals - Goals owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Goal>> {
    Ok(ApiResponse::success(state.goals.list(user.user_id).await?))
}

/// POST /goals - Create a goal owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<GoalPayload>, JsonRejection>,
) -> ApiResult<Goal> {
    let input = json_body(body)?.validate()?;
    let goal = state.goals.create(user.user_id, input).await?;
    Ok(ApiResponse::created(goal))
}

/// GET /goals/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Goal> {
    let id = parse_id(&id, NOT_FOUND)?;
    Ok(ApiResponse::success(state.goals.get(user.user_id, id).await?))
}

/// PUT /goals/:id - Replace the goal's fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<GoalPayload>, JsonRejection>,
) -> ApiResult<Goal> {
    let id = parse_id(&id, NOT_FOUND)?;
    let input = json_body(body)?.validate()?;
    Ok(ApiResponse::success(state.goals.update(user.user_id, id, input).await?))
}

/// DELETE /goals/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.goals.delete(user.user_id, id).await?;
    Ok(ApiResponse::success(json!({ "message": "Goal deleted", "id": id })))
}
