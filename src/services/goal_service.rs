use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::{Goal, GoalInput};
use crate::database::Store;
use crate::error::ApiError;

/// Goal CRUD scoped to the authenticated owner
pub struct GoalService {
    store: Arc<dyn Store>,
}

impl GoalService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Goal>, ApiError> {
        Ok(self.store.list_goals(owner).await?)
    }

    pub async fn create(&self, owner: Uuid, input: GoalInput) -> Result<Goal, ApiError> {
        let goal = self.store.insert_goal(owner, input).await?;
        tracing::debug!("Created goal {} for user {}", goal.id, owner);
        Ok(goal)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Goal, ApiError> {
        self.owned(owner, id).await
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, input: GoalInput) -> Result<Goal, ApiError> {
        self.owned(owner, id).await?;
        Ok(self.store.update_goal(id, input).await?)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), ApiError> {
        self.owned(owner, id).await?;
        self.store.delete_goal(id).await?;
        tracing::debug!("Deleted goal {} for user {}", id, owner);
        Ok(())
    }

    async fn owned(&self, owner: Uuid, id: Uuid) -> Result<Goal, ApiError> {
        let goal = self
            .store
            .find_goal(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Goal not found"))?;

        if goal.user_id != owner {
            tracing::warn!("User {} attempted to access goal {} owned by {}", owner, id, goal.user_id);
            return Err(ApiError::forbidden("You do not have access to this goal"));
        }
        Ok(goal)
    }
}
