//! Nutritionist directory, self-service profile and patient list.

use std::sync::Arc;

use nutri_database::{
    Nutritionist, NutritionistRepo, NutritionistUpdate, NutritionistWithUser, PatientLink,
};
use tracing::info;

use crate::types::{UserError, UserResult};

#[derive(Clone)]
pub struct NutritionistService {
    nutritionists: Arc<dyn NutritionistRepo>,
}

impl NutritionistService {
    pub fn new(nutritionists: Arc<dyn NutritionistRepo>) -> Self {
        Self { nutritionists }
    }

    /// Approved nutritionists only
    pub async fn list_active(&self) -> UserResult<Vec<NutritionistWithUser>> {
        Ok(self.nutritionists.list_active().await?)
    }

    /// The nutritionist row owned by an account, if the account is a nutritionist
    pub async fn find_for_user(&self, user_id: &str) -> UserResult<Option<Nutritionist>> {
        Ok(self.nutritionists.find_by_user_id(user_id).await?)
    }

    pub async fn update_own(
        &self,
        user_id: &str,
        update: &NutritionistUpdate,
    ) -> UserResult<Nutritionist> {
        if update.is_empty() {
            return Err(UserError::InvalidInput(
                "No updatable nutritionist fields supplied".to_string(),
            ));
        }

        let updated = self
            .nutritionists
            .update_by_user_id(user_id, update)
            .await?
            .ok_or(UserError::NotFound("Nutritionist"))?;
        info!(%user_id, nutritionist_id = %updated.id, "nutritionist profile updated");
        Ok(updated)
    }

    pub async fn patients(&self, nutritionist: &Nutritionist) -> UserResult<Vec<PatientLink>> {
        Ok(self.nutritionists.list_patients(&nutritionist.id).await?)
    }
}
