use axum::{extract::State, Extension};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::DashboardSummary;
use crate::state::AppState;

/// GET /dashboard - Completed count, three soonest tasks, mean goal progress, all goals
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<DashboardSummary> {
    Ok(ApiResponse::success(state.dashboard.summary(user.user_id).await?))
}
