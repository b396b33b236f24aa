//! Message service: conversation listing, history, sending and read receipts.

use std::sync::Arc;

use chrono::Utc;
use nutri_database::{ChatMessage, MessageRepo, NewChatMessage, UserRepo, DEFAULT_MESSAGE_KIND};
use tracing::{debug, info, warn};

use crate::types::{
    aggregate_conversations, ChatError, ChatResult, ConversationSummary, SendMessageRequest,
};

#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageRepo>,
    users: Arc<dyn UserRepo>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { messages, users }
    }

    pub async fn conversations(&self, user_id: &str) -> ChatResult<Vec<ConversationSummary>> {
        let messages = self.messages.list_for_user(user_id).await?;
        Ok(aggregate_conversations(messages, user_id))
    }

    /// Messages between two users, oldest first. Only a participant may read
    /// them. Messages addressed to the caller are marked read afterwards; the
    /// returned rows reflect the state before that update.
    pub async fn history(
        &self,
        caller_id: &str,
        user_id: &str,
        nutritionist_id: &str,
    ) -> ChatResult<Vec<ChatMessage>> {
        if caller_id != user_id && caller_id != nutritionist_id {
            return Err(ChatError::AccessDenied);
        }

        let messages = self.messages.list_between(user_id, nutritionist_id).await?;

        let unread: Vec<String> = messages
            .iter()
            .filter(|message| message.is_unread_for(caller_id))
            .map(|message| message.id.clone())
            .collect();
        if !unread.is_empty() {
            if let Err(err) = self.messages.mark_read(&unread, caller_id).await {
                warn!(%caller_id, error = %err, "failed to mark conversation as read");
            } else {
                debug!(%caller_id, count = unread.len(), "conversation marked read");
            }
        }

        Ok(messages)
    }

    /// Persist a message from `sender_id`. The recipient must have a profile.
    pub async fn send(
        &self,
        sender_id: &str,
        request: SendMessageRequest,
    ) -> ChatResult<ChatMessage> {
        if request.content.trim().is_empty() {
            return Err(ChatError::InvalidInput("conteudo is required".to_string()));
        }

        if self.users.find_by_id(&request.recipient_id).await?.is_none() {
            return Err(ChatError::NotFound("Recipient"));
        }

        let message = NewChatMessage {
            sender_id: sender_id.to_string(),
            recipient_id: request.recipient_id,
            content: request.content,
            kind: request
                .kind
                .unwrap_or_else(|| DEFAULT_MESSAGE_KIND.to_string()),
            read: false,
            sent_at: Utc::now().to_rfc3339(),
        };
        let created = self.messages.create(&message).await?;
        info!(
            message_id = %created.id,
            sender_id = %created.sender_id,
            recipient_id = %created.recipient_id,
            "message sent"
        );
        Ok(created)
    }

    /// Mark messages read on behalf of their recipient. Ids addressed to
    /// someone else are left untouched.
    pub async fn mark_read(&self, caller_id: &str, message_ids: &[String]) -> ChatResult<()> {
        if message_ids.is_empty() {
            return Err(ChatError::InvalidInput(
                "mensagensIds must be a non-empty list".to_string(),
            ));
        }
        self.messages.mark_read(message_ids, caller_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutri_database::test_support::{profile, InMemoryStore};

    fn message(id: &str, from: &str, to: &str, sent_at: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: from.to_string(),
            recipient_id: to.to_string(),
            content: format!("msg {id}"),
            kind: "texto".to_string(),
            read: false,
            sent_at: sent_at.to_string(),
        }
    }

    async fn seeded() -> (InMemoryStore, MessageService) {
        let store = InMemoryStore::new();
        store.seed_user(profile("ana", "Ana")).await;
        store.seed_user(profile("clara", "Clara")).await;
        store
            .seed_message(message("1", "clara", "ana", "2024-01-01T10:00:00Z"))
            .await;
        store
            .seed_message(message("2", "ana", "clara", "2024-01-01T10:05:00Z"))
            .await;
        let service = MessageService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (store, service)
    }

    #[tokio::test]
    async fn test_history_requires_participant() {
        let (_, service) = seeded().await;
        assert!(matches!(
            service.history("mallory", "ana", "clara").await,
            Err(ChatError::AccessDenied)
        ));
    }

    #[tokio::test]
    async fn test_history_marks_incoming_messages_read() {
        let (store, service) = seeded().await;

        let history = service.history("ana", "ana", "clara").await.unwrap();
        let ids: Vec<&str> = history.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let stored = store.messages().await;
        assert!(stored.iter().find(|m| m.id == "1").unwrap().read);
        assert!(!stored.iter().find(|m| m.id == "2").unwrap().read);
    }

    #[tokio::test]
    async fn test_history_survives_read_marking_failure() {
        let (store, service) = seeded().await;
        store.fail_mark_read(true);

        let history = service.history("ana", "ana", "clara").await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(store.messages().await.iter().all(|m| !m.read));
    }

    #[tokio::test]
    async fn test_send_defaults_and_recipient_check() {
        let (_, service) = seeded().await;

        let sent = service
            .send(
                "ana",
                SendMessageRequest {
                    recipient_id: "clara".to_string(),
                    content: "bom dia".to_string(),
                    kind: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(sent.kind, DEFAULT_MESSAGE_KIND);
        assert!(!sent.read);
        assert!(!sent.sent_at.is_empty());

        let missing = service
            .send(
                "ana",
                SendMessageRequest {
                    recipient_id: "ghost".to_string(),
                    content: "oi".to_string(),
                    kind: None,
                },
            )
            .await;
        assert!(matches!(missing, Err(ChatError::NotFound("Recipient"))));
    }

    #[tokio::test]
    async fn test_conversations_count_unread_for_caller() {
        let (_, service) = seeded().await;

        let summaries = service.conversations("ana").await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "ana_clara");
        assert_eq!(summaries[0].ultima_mensagem.id, "2");
        assert_eq!(summaries[0].nao_lidas, 1);

        let summaries = service.conversations("clara").await.unwrap();
        assert_eq!(summaries[0].nao_lidas, 1);
    }

    #[tokio::test]
    async fn test_mark_read_requires_ids() {
        let (store, service) = seeded().await;

        assert!(matches!(
            service.mark_read("ana", &[]).await,
            Err(ChatError::InvalidInput(_))
        ));

        service
            .mark_read("ana", &["1".to_string(), "2".to_string()])
            .await
            .unwrap();
        let stored = store.messages().await;
        assert!(stored.iter().find(|m| m.id == "1").unwrap().read);
        assert!(!stored.iter().find(|m| m.id == "2").unwrap().read);
    }
}
