use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::{Task, TaskInput};
use crate::database::Store;
use crate::error::ApiError;

/// Task CRUD scoped to the authenticated owner
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Task>, ApiError> {
        Ok(self.store.list_tasks(owner).await?)
    }

    pub async fn create(&self, owner: Uuid, input: TaskInput) -> Result<Task, ApiError> {
        let task = self.store.insert_task(owner, input).await?;
        tracing::debug!("Created task {} for user {}", task.id, owner);
        Ok(task)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Task, ApiError> {
        self.owned(owner, id).await
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, input: TaskInput) -> Result<Task, ApiError> {
        self.owned(owner, id).await?;
        Ok(self.store.update_task(id, input).await?)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.owned(owner, id).await?;
        self.store.delete_task(id).await?;
        tracing::debug!("Deleted task {} for user {}", id, owner);
        Ok(())
    }

    async fn owned(&self, owner: Uuid, id: Uuid) -> Result<Task, ApiError> {
        let task = self
            .store
            .find_task(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Task not found"))?;

        if task.user_id != owner {
            tracing::warn!("User {} attempted to access task {} owned by {}", owner, id, task.user_id);
            return Err(ApiError::forbidden("You do not have access to this task"));
        }
        Ok(task)
    }
}
