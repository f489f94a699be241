pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use async_trait::async_trait;
use uuid::Uuid;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::{Goal, GoalInput, NewUser, Task, TaskInput, User, UserProfile};
pub use repository::PgStore;

/// Persistence operations the services depend on.
///
/// Lookups by id are unscoped; ownership is enforced by the services so a
/// foreign row can be told apart from a missing one.
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    // Users
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    /// Fails with `DatabaseError::Conflict` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    // Tasks
    async fn insert_task(&self, owner: Uuid, input: TaskInput) -> Result<Task, DatabaseError>;
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, DatabaseError>;
    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, DatabaseError>;
    async fn update_task(&self, id: Uuid, input: TaskInput) -> Result<Task, DatabaseError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), DatabaseError>;
    async fn count_tasks(&self, owner: Uuid, status: &str) -> Result<i64, DatabaseError>;
    /// Tasks by ascending due date, undated tasks last.
    async fn upcoming_tasks(&self, owner: Uuid, limit: i64) -> Result<Vec<Task>, DatabaseError>;

    // Goals
    async fn insert_goal(&self, owner: Uuid, input: GoalInput) -> Result<Goal, DatabaseError>;
    async fn find_goal(&self, id: Uuid) -> Result<Option<Goal>, DatabaseError>;
    async fn list_goals(&self, owner: Uuid) -> Result<Vec<Goal>, DatabaseError>;
    async fn update_goal(&self, id: Uuid, input: GoalInput) -> Result<Goal, DatabaseError>;
    async fn delete_goal(&self, id: Uuid) -> Result<(), DatabaseError>;
}
