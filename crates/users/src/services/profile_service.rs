//! Profile reads and owner-only updates.

use std::sync::Arc;

use nutri_database::{UserProfile, UserProfileUpdate, UserRepo};
use tracing::info;

use super::ensure_owner;
use crate::types::{UserError, UserResult};

#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepo>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    /// Any authenticated caller may read a profile
    pub async fn get(&self, user_id: &str) -> UserResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound("User"))
    }

    pub async fn find(&self, user_id: &str) -> UserResult<Option<UserProfile>> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    pub async fn update(
        &self,
        caller_id: &str,
        user_id: &str,
        update: &UserProfileUpdate,
    ) -> UserResult<UserProfile> {
        ensure_owner(caller_id, user_id)?;
        if update.is_empty() {
            return Err(UserError::InvalidInput(
                "No updatable profile fields supplied".to_string(),
            ));
        }

        let updated = self
            .users
            .update(user_id, update)
            .await?
            .ok_or(UserError::NotFound("User"))?;
        info!(%user_id, "profile updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_database::test_support::{profile, InMemoryStore};

    async fn service() -> ProfileService {
        let store = InMemoryStore::new();
        store.seed_user(profile("ana", "Ana")).await;
        ProfileService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_not_found() {
        let service = service().await;
        assert!(matches!(
            service.get("ghost").await,
            Err(UserError::NotFound("User"))
        ));
        assert_eq!(service.get("ana").await.unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_update_rejects_other_callers() {
        let service = service().await;
        let update = UserProfileUpdate {
            weight: Some(60.0),
            ..UserProfileUpdate::default()
        };

        let result = service.update("mallory", "ana", &update).await;
        assert!(matches!(result, Err(UserError::AccessDenied)));
        assert_eq!(service.get("ana").await.unwrap().weight, None);
    }

    #[tokio::test]
    async fn test_update_applies_allow_listed_fields() {
        let service = service().await;
        let update = UserProfileUpdate {
            weight: Some(60.0),
            objective: Some("ganhar massa".to_string()),
            ..UserProfileUpdate::default()
        };

        let updated = service.update("ana", "ana", &update).await.unwrap();
        assert_eq!(updated.weight, Some(60.0));
        assert_eq!(updated.objective.as_deref(), Some("ganhar massa"));
    }

    #[tokio::test]
    async fn test_empty_update_is_invalid() {
        let service = service().await;
        let result = service
            .update("ana", "ana", &UserProfileUpdate::default())
            .await;
        assert!(matches!(result, Err(UserError::InvalidInput(_))));
    }
}
