//! Repository for user profiles

use async_trait::async_trait;
use tracing::info;

use super::{first_row, UserRepo, USERS_TABLE};
use crate::connection::SupabaseClient;
use crate::entities::{NewUserProfile, UserProfile, UserProfileUpdate};
use crate::types::StoreResult;

#[derive(Clone)]
pub struct UserRepository {
    client: SupabaseClient,
}

impl UserRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepo for UserRepository {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        self.client
            .from(USERS_TABLE)
            .select("*")
            .eq("id", id)
            .fetch_optional()
            .await
    }

    async fn create(&self, profile: &NewUserProfile) -> StoreResult<UserProfile> {
        let rows = self.client.from(USERS_TABLE).insert(profile).await?;
        let created: UserProfile = first_row(rows, USERS_TABLE)?;
        info!(user_id = %created.id, "profile created");
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        update: &UserProfileUpdate,
    ) -> StoreResult<Option<UserProfile>> {
        let rows: Vec<UserProfile> = self
            .client
            .from(USERS_TABLE)
            .eq("id", id)
            .update(update)
            .await?;
        Ok(rows.into_iter().next())
    }
}
