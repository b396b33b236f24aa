//! Chat message rows (`mensagens_chat`)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_ids;

pub const DEFAULT_MESSAGE_KIND: &str = "texto";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[serde(deserialize_with = "serde_ids::string_or_number")]
    pub id: String,
    #[serde(rename = "remetente_id")]
    pub sender_id: String,
    #[serde(rename = "destinatario_id")]
    pub recipient_id: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "tipo", default = "default_kind")]
    pub kind: String,
    #[serde(rename = "lida", default)]
    pub read: bool,
    #[serde(rename = "data_envio")]
    pub sent_at: String,
}

impl ChatMessage {
    pub fn is_unread_for(&self, user_id: &str) -> bool {
        self.recipient_id == user_id && !self.read
    }
}

fn default_kind() -> String {
    DEFAULT_MESSAGE_KIND.to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    #[serde(rename = "remetente_id")]
    pub sender_id: String,
    #[serde(rename = "destinatario_id")]
    pub recipient_id: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "lida")]
    pub read: bool,
    #[serde(rename = "data_envio")]
    pub sent_at: String,
}
