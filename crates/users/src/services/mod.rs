//! Business logic for accounts, profiles, health metrics, nutritionists and goals.
//!
//! Owner-scoped operations take the authenticated caller id and compare it
//! with the owner before touching the store.

pub mod account_service;
pub mod goal_service;
pub mod metric_service;
pub mod nutritionist_service;
pub mod profile_service;

pub use account_service::AccountService;
pub use goal_service::{is_completed, summarize, GoalService};
pub use metric_service::{MetricService, METRICS_PAGE_SIZE};
pub use nutritionist_service::NutritionistService;
pub use profile_service::ProfileService;

use crate::types::{UserError, UserResult};

pub(crate) fn ensure_owner(caller_id: &str, owner_id: &str) -> UserResult<()> {
    if caller_id == owner_id {
        Ok(())
    } else {
        Err(UserError::AccessDenied)
    }
}
