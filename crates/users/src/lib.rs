//! # Nutri Users Crate
//!
//! Account lifecycle, user profiles, health metrics, nutritionists and goals.
//!
//! ## Architecture
//!
//! - **Services**: business rules and ownership checks
//! - **Types**: request/response bodies and [`UserError`]
//!
//! Persistence goes through the repository traits in `nutri-database` and
//! authentication through [`nutri_auth::AuthProvider`].

pub mod services;
pub mod types;

pub use services::{
    is_completed, summarize, AccountService, GoalService, MetricService, NutritionistService,
    ProfileService, METRICS_PAGE_SIZE,
};
pub use types::{
    CurrentUser, GoalStats, GoalTypeStats, NewGoalRequest, NutritionistRegistration,
    NutritionistSignupRequest, SignupProfile, SignupRequest, SignupResponse, UserError,
    UserResult,
};
