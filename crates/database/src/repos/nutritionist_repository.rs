//! Repository for nutritionists and their patient links

use async_trait::async_trait;
use tracing::info;

use super::{first_row, NutritionistRepo, NUTRITIONISTS_TABLE, PATIENT_LINKS_TABLE};
use crate::connection::SupabaseClient;
use crate::entities::{
    NewNutritionist, Nutritionist, NutritionistUpdate, NutritionistWithUser, PatientLink,
};
use crate::types::StoreResult;

const LISTING_COLUMNS: &str = "*,usuario:user_id(id,email,nome,telefone)";
const PATIENT_COLUMNS: &str =
    "id,paciente:usuario_id(id,nome,email,data_nascimento,genero,objetivo,created_at)";

#[derive(Clone)]
pub struct NutritionistRepository {
    client: SupabaseClient,
}

impl NutritionistRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NutritionistRepo for NutritionistRepository {
    async fn list_active(&self) -> StoreResult<Vec<NutritionistWithUser>> {
        self.client
            .from(NUTRITIONISTS_TABLE)
            .select(LISTING_COLUMNS)
            .eq("ativo", true)
            .fetch()
            .await
    }

    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<Nutritionist>> {
        self.client
            .from(NUTRITIONISTS_TABLE)
            .select("*")
            .eq("user_id", user_id)
            .fetch_optional()
            .await
    }

    async fn create(&self, nutritionist: &NewNutritionist) -> StoreResult<Nutritionist> {
        let rows = self
            .client
            .from(NUTRITIONISTS_TABLE)
            .insert(nutritionist)
            .await?;
        let created: Nutritionist = first_row(rows, NUTRITIONISTS_TABLE)?;
        info!(nutritionist_id = %created.id, user_id = %created.user_id, "nutritionist registered");
        Ok(created)
    }

    async fn update_by_user_id(
        &self,
        user_id: &str,
        update: &NutritionistUpdate,
    ) -> StoreResult<Option<Nutritionist>> {
        let rows: Vec<Nutritionist> = self
            .client
            .from(NUTRITIONISTS_TABLE)
            .eq("user_id", user_id)
            .update(update)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_patients(&self, nutritionist_id: &str) -> StoreResult<Vec<PatientLink>> {
        self.client
            .from(PATIENT_LINKS_TABLE)
            .select(PATIENT_COLUMNS)
            .eq("nutricionista_id", nutritionist_id)
            .fetch()
            .await
    }
}
