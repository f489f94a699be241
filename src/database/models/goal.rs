use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub progress: i32,
    pub due_date: Option<NaiveDate>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated goal fields accepted on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalInput {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub progress: i32,
    pub due_date: Option<NaiveDate>,
}

impl Goal {
    pub fn new(id: Uuid, owner: Uuid, input: GoalInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            progress: input.progress,
            due_date: input.due_date,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: GoalInput, now: DateTime<Utc>) {
        self.title = input.title;
        self.description = input.description;
        self.category = input.category;
        self.progress = input.progress;
        self.due_date = input.due_date;
        self.updated_at = now;
    }
}
