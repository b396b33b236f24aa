//! Response bodies built by the services.

use std::collections::BTreeMap;

use nutri_auth::{AuthSession, AuthUser};
use nutri_database::{Nutritionist, UserProfile};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub user: UserProfile,
    pub session: Option<AuthSession>,
}

/// Auth account fields with the stored profile alongside
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub account: AuthUser,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionistRegistration {
    pub message: String,
    pub nutricionista: Nutritionist,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct GoalTypeStats {
    pub total: usize,
    pub concluidas: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GoalStats {
    pub total_metas: usize,
    pub metas_concluidas: usize,
    /// Percentage rounded to two decimals
    pub taxa_conclusao: f64,
    pub por_tipo: BTreeMap<String, GoalTypeStats>,
}
