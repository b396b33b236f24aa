//! Goal rows (`metas`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_ids;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    #[serde(deserialize_with = "serde_ids::string_or_number")]
    pub id: String,
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "valor_alvo")]
    pub target_value: f64,
    #[serde(rename = "valor_atual", default)]
    pub current_value: f64,
    #[serde(rename = "data_limite")]
    pub deadline: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "concluida", default)]
    pub completed: bool,
    #[serde(rename = "data_criacao")]
    pub created_at: Option<String>,
    #[serde(rename = "data_atualizacao")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "valor_alvo")]
    pub target_value: f64,
    #[serde(rename = "valor_atual")]
    pub current_value: f64,
    #[serde(rename = "data_limite")]
    pub deadline: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "data_criacao")]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgressUpdate {
    #[serde(rename = "valor_atual")]
    pub current_value: f64,
    #[serde(rename = "concluida")]
    pub completed: bool,
    #[serde(rename = "data_atualizacao")]
    pub updated_at: String,
}
