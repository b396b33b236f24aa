//! Repository traits and their Supabase-backed implementations

use async_trait::async_trait;

use crate::entities::{
    ChatMessage, Goal, GoalProgressUpdate, HealthMetric, NewChatMessage, NewGoal,
    NewHealthMetric, NewNutritionist, NewUserProfile, Nutritionist, NutritionistUpdate,
    NutritionistWithUser, PatientLink, UserProfile, UserProfileUpdate,
};
use crate::types::StoreResult;

pub mod goal_repository;
pub mod message_repository;
pub mod metric_repository;
pub mod nutritionist_repository;
pub mod user_repository;

pub use goal_repository::GoalRepository;
pub use message_repository::MessageRepository;
pub use metric_repository::MetricRepository;
pub use nutritionist_repository::NutritionistRepository;
pub use user_repository::UserRepository;

pub const USERS_TABLE: &str = "usuarios";
pub const METRICS_TABLE: &str = "metricas_saude";
pub const NUTRITIONISTS_TABLE: &str = "nutricionistas";
pub const PATIENT_LINKS_TABLE: &str = "pacientes_nutricionistas";
pub const MESSAGES_TABLE: &str = "mensagens_chat";
pub const GOALS_TABLE: &str = "metas";

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>>;
    async fn create(&self, profile: &NewUserProfile) -> StoreResult<UserProfile>;
    /// Returns `None` when no row matched
    async fn update(&self, id: &str, update: &UserProfileUpdate)
        -> StoreResult<Option<UserProfile>>;
}

#[async_trait]
pub trait MetricRepo: Send + Sync {
    /// Newest first by `data_registro`
    async fn list_recent(&self, user_id: &str, limit: usize) -> StoreResult<Vec<HealthMetric>>;
    async fn create(&self, metric: &NewHealthMetric) -> StoreResult<HealthMetric>;
}

#[async_trait]
pub trait NutritionistRepo: Send + Sync {
    async fn list_active(&self) -> StoreResult<Vec<NutritionistWithUser>>;
    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<Nutritionist>>;
    async fn create(&self, nutritionist: &NewNutritionist) -> StoreResult<Nutritionist>;
    async fn update_by_user_id(
        &self,
        user_id: &str,
        update: &NutritionistUpdate,
    ) -> StoreResult<Option<Nutritionist>>;
    async fn list_patients(&self, nutritionist_id: &str) -> StoreResult<Vec<PatientLink>>;
}

#[async_trait]
pub trait MessageRepo: Send + Sync {
    /// Every message sent or received by `user_id`, newest first
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>>;
    /// Messages exchanged between two users, oldest first
    async fn list_between(&self, first: &str, second: &str) -> StoreResult<Vec<ChatMessage>>;
    async fn create(&self, message: &NewChatMessage) -> StoreResult<ChatMessage>;
    /// Mark the given messages as read, restricted to those addressed to `recipient_id`
    async fn mark_read(&self, ids: &[String], recipient_id: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait GoalRepo: Send + Sync {
    /// Newest first by `data_criacao`
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Goal>>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Goal>>;
    async fn create(&self, goal: &NewGoal) -> StoreResult<Goal>;
    async fn update_progress(
        &self,
        id: &str,
        update: &GoalProgressUpdate,
    ) -> StoreResult<Option<Goal>>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Inserts answer with the created rows; an empty representation means the store dropped the write.
pub(crate) fn first_row<T>(rows: Vec<T>, table: &str) -> StoreResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| crate::types::StoreError::NotFound(table.to_string()))
}
