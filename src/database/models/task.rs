use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status value the dashboard counts as done.
pub const COMPLETED_STATUS: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated task fields accepted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
}

impl Task {
    pub fn new(id: Uuid, owner: Uuid, input: TaskInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
            priority: input.priority,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: TaskInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.due_date = input.due_date;
        self.status = input.status;
        self.priority = input.priority;
        self.updated_at = now;
    }
}
