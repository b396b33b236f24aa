//! Request bodies for the chat endpoints.

use nutri_database::entities::serde_ids;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[serde(rename = "destinatarioId")]
    pub recipient_id: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MarkReadRequest {
    #[serde(
        rename = "mensagensIds",
        default,
        deserialize_with = "serde_ids::strings_or_numbers"
    )]
    pub message_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_accepts_numeric_and_text_ids() {
        let request: MarkReadRequest =
            serde_json::from_value(serde_json::json!({ "mensagensIds": [1, "2"] })).unwrap();
        assert_eq!(request.message_ids, vec!["1".to_string(), "2".to_string()]);

        let empty: MarkReadRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.message_ids.is_empty());
    }
}
