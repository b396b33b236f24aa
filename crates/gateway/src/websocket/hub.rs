//! Room registry for the chat relay

use std::collections::HashMap;
use std::sync::Arc;

use nutri_database::entities::serde_ids;
use nutri_database::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

const ROOM_CAPACITY: usize = 100;

/// Frames sent by clients
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinChat {
        #[serde(rename = "userId", deserialize_with = "serde_ids::string_or_number")]
        user_id: String,
        #[serde(rename = "nutriId", deserialize_with = "serde_ids::string_or_number")]
        nutri_id: String,
    },
    SendMessage {
        #[serde(rename = "userId", deserialize_with = "serde_ids::string_or_number")]
        user_id: String,
        #[serde(rename = "nutriId", deserialize_with = "serde_ids::string_or_number")]
        nutri_id: String,
        message: Value,
    },
}

/// Frames pushed to every socket in a room
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    ReceiveMessage {
        #[serde(rename = "userId")]
        user_id: String,
        #[serde(rename = "nutriId")]
        nutri_id: String,
        message: Value,
        timestamp: String,
    },
    NewMessage {
        message: ChatMessage,
    },
}

/// Broadcast channel per room, created on first join and dropped once its
/// last subscriber leaves.
#[derive(Clone, Default)]
pub struct ChatHub {
    rooms: Arc<RwLock<HashMap<String, broadcast::Sender<ServerEvent>>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `room`, creating it if needed
    pub async fn join(&self, room: &str) -> broadcast::Receiver<ServerEvent> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room.to_string())
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Deliver `event` to everyone currently in `room`. Returns how many
    /// subscribers it reached; an empty or unknown room is not an error.
    pub async fn emit(&self, room: &str, event: ServerEvent) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(room) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Forget `room` if nobody listens to it any more
    pub async fn release(&self, room: &str) {
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(room)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            rooms.remove(room);
            debug!(%room, "room closed");
        }
    }

    pub async fn subscriber_count(&self, room: &str) -> usize {
        self.rooms
            .read()
            .await
            .get(room)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
