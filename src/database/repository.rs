use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Goal, GoalInput, NewUser, Task, TaskInput, User};
use crate::database::Store;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, title, description, due_date, status, priority, user_id, created_at, updated_at";
const GOAL_COLUMNS: &str =
    "id, title, description, category, progress, due_date, user_id, created_at, updated_at";

/// PostgreSQL-backed store over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, "user"))
    }

    async fn insert_task(&self, owner: Uuid, input: TaskInput) -> Result<Task, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, title, description, due_date, status, priority, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(&input.status)
        .bind(&input.priority)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, input: TaskInput) -> Result<Task, DatabaseError> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = $2, description = $3, due_date = $4, status = $5, priority = $6,
                 updated_at = now()
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.due_date)
        .bind(&input.status)
        .bind(&input.priority)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Task not found".to_string()))
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Task not found".to_string()));
        }
        Ok(())
    }

    async fn count_tasks(&self, owner: Uuid, status: &str) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = $1 AND status = $2")
                .bind(owner)
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn upcoming_tasks(&self, owner: Uuid, limit: i64) -> Result<Vec<Task>, DatabaseError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE user_id = $1
             ORDER BY due_date ASC NULLS LAST, created_at, id
             LIMIT $2"
        ))
        .bind(owner)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn insert_goal(&self, owner: Uuid, input: GoalInput) -> Result<Goal, DatabaseError> {
        let goal = sqlx::query_as::<_, Goal>(&format!(
            "INSERT INTO goals (id, title, description, category, progress, due_date, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {GOAL_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.progress)
        .bind(input.due_date)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    async fn find_goal(&self, id: Uuid) -> Result<Option<Goal>, DatabaseError> {
        let goal = sqlx::query_as::<_, Goal>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    async fn list_goals(&self, owner: Uuid) -> Result<Vec<Goal>, DatabaseError> {
        let goals = sqlx::query_as::<_, Goal>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    async fn update_goal(&self, id: Uuid, input: GoalInput) -> Result<Goal, DatabaseError> {
        sqlx::query_as::<_, Goal>(&format!(
            "UPDATE goals
             SET title = $2, description = $3, category = $4, progress = $5, due_date = $6,
                 updated_at = now()
             WHERE id = $1
             RETURNING {GOAL_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.progress)
        .bind(input.due_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Goal not found".to_string()))
    }

    async fn delete_goal(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Goal not found".to_string()));
        }
        Ok(())
    }
}
