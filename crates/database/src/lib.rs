//! Nutri Database Crate
//!
//! Client for the hosted table API plus the row types and repositories the
//! services are written against. Nothing here owns data; every call is a
//! remote request.

pub mod connection;
pub mod entities;
pub mod repos;
pub mod test_support;
pub mod types;

pub use connection::{SupabaseClient, TableQuery};

pub use repos::{
    GoalRepo, GoalRepository, MessageRepo, MessageRepository, MetricRepo, MetricRepository,
    NutritionistRepo, NutritionistRepository, UserRepo, UserRepository,
};

pub use entities::{
    ChatMessage, Goal, GoalProgressUpdate, HealthMetric, HealthMetricValues, NewChatMessage,
    NewGoal, NewHealthMetric, NewNutritionist, NewUserProfile, Nutritionist, NutritionistUpdate,
    NutritionistWithUser, PatientLink, PatientSummary, UserProfile, UserProfileUpdate,
    UserSummary, DEFAULT_MESSAGE_KIND,
};

pub use types::{StoreError, StoreResult};
