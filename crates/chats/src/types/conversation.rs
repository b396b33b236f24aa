//! Grouping of a user's messages into one summary per conversation partner.

use std::collections::HashMap;

use nutri_database::ChatMessage;
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::canonical_pair_key;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConversationSummary {
    /// Canonical pair key of the two participants
    pub id: String,
    /// Sender and recipient of `ultimaMensagem`, in that order
    #[schema(value_type = Vec<String>)]
    pub participantes: [String; 2],
    #[serde(rename = "ultimaMensagem")]
    pub ultima_mensagem: ChatMessage,
    #[serde(rename = "naoLidas")]
    pub nao_lidas: usize,
}

/// Group `messages` (already newest first) by participant pair.
///
/// Summaries come out in first-seen order, so the conversation with the most
/// recent activity leads. Unread counts only include messages addressed to
/// `user_id`.
pub fn aggregate_conversations(messages: Vec<ChatMessage>, user_id: &str) -> Vec<ConversationSummary> {
    let mut summaries: Vec<ConversationSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for message in messages {
        let key = canonical_pair_key(&message.sender_id, &message.recipient_id);
        let unread = usize::from(message.is_unread_for(user_id));

        match index.get(&key) {
            Some(&position) => summaries[position].nao_lidas += unread,
            None => {
                index.insert(key.clone(), summaries.len());
                summaries.push(ConversationSummary {
                    id: key,
                    participantes: [message.sender_id.clone(), message.recipient_id.clone()],
                    ultima_mensagem: message,
                    nao_lidas: unread,
                });
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, from: &str, to: &str, sent_at: &str, read: bool) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: from.to_string(),
            recipient_id: to.to_string(),
            content: format!("msg {id}"),
            kind: "texto".to_string(),
            read,
            sent_at: sent_at.to_string(),
        }
    }

    #[test]
    fn test_both_directions_share_one_summary() {
        let summaries = aggregate_conversations(
            vec![
                message("2", "a", "b", "2024-01-01T00:00:02Z", false),
                message("1", "b", "a", "2024-01-01T00:00:01Z", false),
            ],
            "a",
        );

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.id, "a_b");
        assert_eq!(summary.ultima_mensagem.id, "2");
        assert_eq!(summary.participantes, ["a".to_string(), "b".to_string()]);
        assert_eq!(summary.nao_lidas, 1);
    }

    #[test]
    fn test_unread_counts_only_messages_to_caller() {
        let summaries = aggregate_conversations(
            vec![
                message("4", "a", "b", "2024-01-01T00:00:04Z", false),
                message("3", "b", "a", "2024-01-01T00:00:03Z", false),
                message("2", "b", "a", "2024-01-01T00:00:02Z", true),
                message("1", "b", "a", "2024-01-01T00:00:01Z", false),
            ],
            "a",
        );

        assert_eq!(summaries[0].nao_lidas, 2);
    }

    #[test]
    fn test_conversations_keep_first_seen_order() {
        let summaries = aggregate_conversations(
            vec![
                message("3", "c", "a", "2024-01-01T00:00:03Z", false),
                message("2", "a", "b", "2024-01-01T00:00:02Z", false),
                message("1", "a", "c", "2024-01-01T00:00:01Z", false),
            ],
            "a",
        );

        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a_c", "a_b"]);
        assert_eq!(summaries[0].participantes, ["c".to_string(), "a".to_string()]);
        assert_eq!(summaries[0].nao_lidas, 1);
        assert_eq!(summaries[1].nao_lidas, 0);
    }

    #[test]
    fn test_summary_wire_names() {
        let summaries = aggregate_conversations(
            vec![message("1", "a", "b", "2024-01-01T00:00:01Z", false)],
            "b",
        );
        let value = serde_json::to_value(&summaries[0]).unwrap();

        assert_eq!(value["id"], "a_b");
        assert_eq!(value["naoLidas"], 1);
        assert_eq!(value["ultimaMensagem"]["remetente_id"], "a");
        assert_eq!(value["participantes"], serde_json::json!(["a", "b"]));
    }
}
