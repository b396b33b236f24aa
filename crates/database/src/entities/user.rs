//! User profile rows (`usuarios`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "altura")]
    pub height: Option<f64>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "objetivo")]
    pub objective: Option<String>,
    pub created_at: Option<String>,
}

/// Profile row written right after a successful sign-up. The id is the auth user id.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProfile {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub cpf: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "altura")]
    pub height: Option<f64>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "objetivo")]
    pub objective: Option<String>,
}

/// Fields a user may change on their own profile. Anything else in the
/// request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileUpdate {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "data_nascimento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "altura", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "peso", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "genero", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "objetivo", default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
}

impl UserProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
