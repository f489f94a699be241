use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Goal, GoalInput, NewUser, Task, TaskInput, User};
use crate::database::Store;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    tasks: Vec<Task>,
    goals: Vec<Goal>,
}

/// Process-local store used for development and tests.
///
/// Rows are kept in insertion order so listings match the PostgreSQL backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Mirrors the `lower(email)` unique index of the PostgreSQL schema.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| same_email(&u.email, email)).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(DatabaseError::Conflict("user already exists".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn insert_task(&self, owner: Uuid, input: TaskInput) -> Result<Task, DatabaseError> {
        let task = Task::new(Uuid::new_v4(), owner, input, Utc::now());
        self.tables.write().await.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().filter(|t| t.user_id == owner).cloned().collect())
    }

    async fn update_task(&self, id: Uuid, input: TaskInput) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        let task = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DatabaseError::NotFound("Task not found".to_string()))?;
        task.apply(input, Utc::now());
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        if tables.tasks.len() == before {
            return Err(DatabaseError::NotFound("Task not found".to_string()));
        }
        Ok(())
    }

    async fn count_tasks(&self, owner: Uuid, status: &str) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        let count = tables
            .tasks
            .iter()
            .filter(|t| t.user_id == owner && t.status == status)
            .count();
        Ok(count as i64)
    }

    async fn upcoming_tasks(&self, owner: Uuid, limit: i64) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal dates.
        tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
        tasks.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(tasks)
    }

    async fn insert_goal(&self, owner: Uuid, input: GoalInput) -> Result<Goal, DatabaseError> {
        let goal = Goal::new(Uuid::new_v4(), owner, input, Utc::now());
        self.tables.write().await.goals.push(goal.clone());
        Ok(goal)
    }

    async fn find_goal(&self, id: Uuid) -> Result<Option<Goal>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.goals.iter().find(|g| g.id == id).cloned())
    }

    async fn list_goals(&self, owner: Uuid) -> Result<Vec<Goal>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.goals.iter().filter(|g| g.user_id == owner).cloned().collect())
    }

    async fn update_goal(&self, id: Uuid, input: GoalInput) -> Result<Goal, DatabaseError> {
        let mut tables = self.tables.write().await;
        let goal = tables
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| DatabaseError::NotFound("Goal not found".to_string()))?;
        goal.apply(input, Utc::now());
        Ok(goal.clone())
    }

    async fn delete_goal(&self, id: Uuid) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.goals.len();
        tables.goals.retain(|g| g.id != id);
        if tables.goals.len() == before {
            return Err(DatabaseError::NotFound("Goal not found".to_string()));
        }
        Ok(())
    }
}
