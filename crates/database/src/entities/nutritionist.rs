//! Nutritionist rows (`nutricionistas`) and patient links (`pacientes_nutricionistas`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_ids;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Nutritionist {
    #[serde(deserialize_with = "serde_ids::string_or_number")]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub crn: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
    #[serde(rename = "ativo", default)]
    pub active: bool,
}

/// Account fields embedded next to a nutritionist in the public listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub email: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionistWithUser {
    #[serde(flatten)]
    pub nutritionist: Nutritionist,
    #[serde(rename = "usuario", default)]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNutritionist {
    pub user_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub crn: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
}

/// Fields a nutritionist may edit on their own row; `ativo` stays with admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionistUpdate {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "especialidade", default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl NutritionistUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientSummary {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "genero")]
    pub gender: Option<String>,
    #[serde(rename = "objetivo")]
    pub objective: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientLink {
    #[serde(deserialize_with = "serde_ids::string_or_number")]
    pub id: String,
    #[serde(rename = "paciente", default)]
    pub patient: Option<PatientSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_row_keeps_embedded_user() {
        let row = serde_json::json!({
            "id": 3,
            "user_id": "u-9",
            "nome": "Dra. Clara",
            "crn": "CRN-3 1234",
            "ativo": true,
            "usuario": { "id": "u-9", "email": "clara@example.com", "nome": "Clara", "telefone": null }
        });

        let listed: NutritionistWithUser = serde_json::from_value(row).unwrap();
        assert_eq!(listed.nutritionist.id, "3");
        assert!(listed.nutritionist.active);
        assert_eq!(
            listed.user.and_then(|user| user.email).as_deref(),
            Some("clara@example.com")
        );
    }

    #[test]
    fn test_update_cannot_touch_activation() {
        let update: NutritionistUpdate =
            serde_json::from_value(serde_json::json!({ "ativo": true, "user_id": "x" })).unwrap();
        assert!(update.is_empty());
    }
}
