use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::api::TaskPayload;
use crate::database::models::Task;
use crate::handlers::{json_body, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

const NOT_FOUND: &str = "Task not found";

/// GET /tasks - Tasks owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Task>> {
    Ok(ApiResponse::success(state.tasks.list(user.user_id).await?))
}

/// POST /tasks - Create a task owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Task> {
    let input = json_body(body)?.validate()?;
    let task = state.tasks.create(user.user_id, input).await?;
    Ok(ApiResponse::created(task))
}

/// GET /tasks/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Task> {
    let id = parse_id(&id, NOT_FOUND)?;
    Ok(ApiResponse::success(state.tasks.get(user.user_id, id).await?))
}

/// PUT /tasks/:id - Replace the task's fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Task> {
    let id = parse_id(&id, NOT_FOUND)?;
    let input = json_body(body)?.validate()?;
    Ok(ApiResponse::success(state.tasks.update(user.user_id, id, input).await?))
}

/// DELETE /tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.tasks.delete(user.user_id, id).await?;
    Ok(ApiResponse::success(json!({ "message": "Task deleted", "id": id })))
}
