//! Request bodies accepted by the account, nutritionist and goal endpoints.

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "userData")]
    pub user_data: SignupProfile,
}

/// Profile fields collected on the sign-up form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SignupProfile {
    pub nome: String,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(rename = "dataNascimento", default)]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub altura: Option<f64>,
    #[serde(default)]
    pub peso: Option<f64>,
    #[serde(default)]
    pub genero: Option<String>,
    #[serde(default)]
    pub objetivo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NutritionistSignupRequest {
    pub email: String,
    pub password: String,
    pub nome: String,
    pub crn: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub especialidade: Option<String>,
}

/// `tipo` and `valor_alvo` are optional here so that their absence is
/// reported with a precise message instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewGoalRequest {
    pub usuario_id: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub valor_alvo: Option<f64>,
    #[serde(default)]
    pub data_limite: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}
