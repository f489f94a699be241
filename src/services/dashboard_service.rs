use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::task::COMPLETED_STATUS;
use crate::database::models::{Goal, Task};
use crate::database::Store;
use crate::error::ApiError;

/// Number of soonest-due tasks shown on the dashboard.
pub const UPCOMING_TASK_LIMIT: i64 = 3;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub completed_tasks: i64,
    pub upcoming_tasks: Vec<Task>,
    pub average_progress: i32,
    pub goals: Vec<Goal>,
}

/// Per-user dashboard aggregation.
///
/// The three reads are independent queries; no snapshot spans them.
pub struct DashboardService {
    store: Arc<dyn Store>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn summary(&self, owner: Uuid) -> Result<DashboardSummary, ApiError> {
        let completed_tasks = self.store.count_tasks(owner, COMPLETED_STATUS).await?;
        let upcoming_tasks = self.store.upcoming_tasks(owner, UPCOMING_TASK_LIMIT).await?;
        let goals = self.store.list_goals(owner).await?;

        Ok(DashboardSummary {
            completed_tasks,
            upcoming_tasks,
            average_progress: average_progress(&goals),
            goals,
        })
    }
}

/// Truncating integer mean of goal progress; 0 when there are no goals.
pub fn average_progress(goals: &[Goal]) -> i32 {
    if goals.is_empty() {
        return 0;
    }
    let total: i64 = goals.iter().map(|g| i64::from(g.progress)).sum();
    (total / goals.len() as i64) as i32
}
