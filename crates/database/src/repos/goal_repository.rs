//! Repository for goals

use async_trait::async_trait;
use tracing::info;

use super::{first_row, GoalRepo, GOALS_TABLE};
use crate::connection::SupabaseClient;
use crate::entities::{Goal, GoalProgressUpdate, NewGoal};
use crate::types::StoreResult;

#[derive(Clone)]
pub struct GoalRepository {
    client: SupabaseClient,
}

impl GoalRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GoalRepo for GoalRepository {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Goal>> {
        self.client
            .from(GOALS_TABLE)
            .select("*")
            .eq("usuario_id", user_id)
            .order("data_criacao", false)
            .fetch()
            .await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Goal>> {
        self.client
            .from(GOALS_TABLE)
            .select("*")
            .eq("id", id)
            .fetch_optional()
            .await
    }

    async fn create(&self, goal: &NewGoal) -> StoreResult<Goal> {
        let rows = self.client.from(GOALS_TABLE).insert(goal).await?;
        let created: Goal = first_row(rows, GOALS_TABLE)?;
        info!(goal_id = %created.id, user_id = %created.user_id, "goal created");
        Ok(created)
    }

    async fn update_progress(
        &self,
        id: &str,
        update: &GoalProgressUpdate,
    ) -> StoreResult<Option<Goal>> {
        let rows: Vec<Goal> = self
            .client
            .from(GOALS_TABLE)
            .eq("id", id)
            .update(update)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client.from(GOALS_TABLE).eq("id", id).delete().await?;
        info!(goal_id = %id, "goal deleted");
        Ok(())
    }
}
