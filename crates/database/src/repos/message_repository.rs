//! Repository for chat messages

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{first_row, MessageRepo, MESSAGES_TABLE};
use crate::connection::{quote_value, SupabaseClient};
use crate::entities::{ChatMessage, NewChatMessage};
use crate::types::StoreResult;

#[derive(Clone)]
pub struct MessageRepository {
    client: SupabaseClient,
}

impl MessageRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn involving(user_id: &str) -> String {
    let user = quote_value(user_id);
    format!("remetente_id.eq.{user},destinatario_id.eq.{user}")
}

fn exchanged_between(first: &str, second: &str) -> String {
    let (first, second) = (quote_value(first), quote_value(second));
    format!(
        "and(remetente_id.eq.{first},destinatario_id.eq.{second}),\
         and(remetente_id.eq.{second},destinatario_id.eq.{first})"
    )
}

#[async_trait]
impl MessageRepo for MessageRepository {
    async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<ChatMessage>> {
        self.client
            .from(MESSAGES_TABLE)
            .select("*")
            .or(&involving(user_id))
            .order("data_envio", false)
            .fetch()
            .await
    }

    async fn list_between(&self, first: &str, second: &str) -> StoreResult<Vec<ChatMessage>> {
        self.client
            .from(MESSAGES_TABLE)
            .select("*")
            .or(&exchanged_between(first, second))
            .order("data_envio", true)
            .fetch()
            .await
    }

    async fn create(&self, message: &NewChatMessage) -> StoreResult<ChatMessage> {
        let rows = self.client.from(MESSAGES_TABLE).insert(message).await?;
        first_row(rows, MESSAGES_TABLE)
    }

    async fn mark_read(&self, ids: &[String], recipient_id: &str) -> StoreResult<()> {
        let updated: Vec<ChatMessage> = self
            .client
            .from(MESSAGES_TABLE)
            .in_list("id", ids)
            .eq("destinatario_id", recipient_id)
            .update(&json!({ "lida": true }))
            .await?;
        debug!(count = updated.len(), %recipient_id, "messages marked read");
        Ok(())
    }
}
