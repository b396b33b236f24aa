//! Row types for the hosted tables
//!
//! Field names on the wire follow the table columns; Rust names are English.

pub mod goal;
pub mod message;
pub mod metric;
pub mod nutritionist;
pub mod user;

pub use goal::{Goal, GoalProgressUpdate, NewGoal};
pub use message::{ChatMessage, NewChatMessage, DEFAULT_MESSAGE_KIND};
pub use metric::{HealthMetric, HealthMetricValues, NewHealthMetric};
pub use nutritionist::{
    NewNutritionist, Nutritionist, NutritionistUpdate, NutritionistWithUser, PatientLink,
    PatientSummary, UserSummary,
};
pub use user::{NewUserProfile, UserProfile, UserProfileUpdate};

/// Deserializers for columns whose JSON type depends on the table definition
pub mod serde_ids {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    /// Accept both `bigint` and `uuid`/`text` identifiers, carrying them as strings
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => value,
            RawId::Number(value) => value.to_string(),
        })
    }

    /// Same as [`string_or_number`] for a list of identifiers
    pub fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Vec::<RawId>::deserialize(deserializer)?
            .into_iter()
            .map(|id| match id {
                RawId::Text(value) => value,
                RawId::Number(value) => value.to_string(),
            })
            .collect())
    }
}
