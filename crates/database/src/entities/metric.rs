//! Health metric rows (`metricas_saude`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_ids;

/// Measurements a user may record. Also the allow-list for inserts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthMetricValues {
    #[serde(rename = "peso", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "altura", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "imc", default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(rename = "gordura_corporal", default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(rename = "massa_muscular", default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,
    #[serde(rename = "circunferencia_cintura", default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(rename = "pressao_arterial", default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "frequencia_cardiaca", default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HealthMetricValues {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthMetric {
    #[serde(deserialize_with = "serde_ids::string_or_number")]
    pub id: String,
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(flatten)]
    pub values: HealthMetricValues,
    #[serde(rename = "data_registro")]
    pub recorded_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHealthMetric {
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    #[serde(flatten)]
    pub values: HealthMetricValues,
    #[serde(rename = "data_registro")]
    pub recorded_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_row_flattens_measurements() {
        let row = serde_json::json!({
            "id": 42,
            "usuario_id": "u-1",
            "peso": 80.2,
            "pressao_arterial": "12/8",
            "data_registro": "2024-05-01T10:00:00+00:00"
        });

        let metric: HealthMetric = serde_json::from_value(row).unwrap();
        assert_eq!(metric.id, "42");
        assert_eq!(metric.values.weight, Some(80.2));
        assert_eq!(metric.values.blood_pressure.as_deref(), Some("12/8"));
    }

    #[test]
    fn test_insert_serializes_only_present_values() {
        let insert = NewHealthMetric {
            user_id: "u-1".to_string(),
            values: HealthMetricValues {
                weight: Some(79.0),
                ..HealthMetricValues::default()
            },
            recorded_at: "2024-05-02T08:00:00+00:00".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&insert).unwrap(),
            serde_json::json!({
                "usuario_id": "u-1",
                "peso": 79.0,
                "data_registro": "2024-05-02T08:00:00+00:00"
            })
        );
    }
}
