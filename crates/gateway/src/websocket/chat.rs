//! Chat relay socket: clients join the room of a conversation and everything
//! emitted to that room is pushed down their socket.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use nutri_chats::canonical_pair_key;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::hub::{ChatHub, ClientEvent, ServerEvent};
use crate::state::GatewayState;

const OUTBOUND_BUFFER: usize = 64;

/// Upgrade to the chat relay. The relay carries no credentials.
pub async fn chat_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<GatewayState>>,
) -> Response {
    let hub = state.chat_hub.clone();
    ws.on_upgrade(move |socket| handle_chat_websocket(socket, hub))
}

async fn handle_chat_websocket(socket: WebSocket, hub: ChatHub) {
    let connection_id = Uuid::new_v4();
    info!(%connection_id, "websocket connected");

    let (mut sender, mut receiver) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<ServerEvent>(OUTBOUND_BUFFER);

    let writer = tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(error) => {
                    warn!(%error, "failed to encode relay event");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut rooms: HashMap<String, JoinHandle<()>> = HashMap::new();

    while let Some(frame) = receiver.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(error) => {
                debug!(%connection_id, %error, "websocket read failed");
                break;
            }
        };

        match frame {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    handle_client_event(event, &hub, &out_tx, &mut rooms, connection_id).await
                }
                Err(error) => debug!(%connection_id, %error, "ignoring malformed frame"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    for (room, forwarder) in rooms.drain() {
        forwarder.abort();
        let _ = forwarder.await;
        hub.release(&room).await;
    }
    drop(out_tx);
    let _ = writer.await;

    info!(%connection_id, "websocket disconnected");
}

async fn handle_client_event(
    event: ClientEvent,
    hub: &ChatHub,
    out_tx: &mpsc::Sender<ServerEvent>,
    rooms: &mut HashMap<String, JoinHandle<()>>,
    connection_id: Uuid,
) {
    match event {
        ClientEvent::JoinChat { user_id, nutri_id } => {
            let room = canonical_pair_key(&user_id, &nutri_id);
            if rooms.contains_key(&room) {
                return;
            }
            let forwarder = spawn_forwarder(hub, &room, out_tx.clone()).await;
            info!(%connection_id, %room, "joined chat room");
            rooms.insert(room, forwarder);
        }
        ClientEvent::SendMessage {
            user_id,
            nutri_id,
            message,
        } => {
            let room = canonical_pair_key(&user_id, &nutri_id);
            let event = ServerEvent::ReceiveMessage {
                user_id,
                nutri_id,
                message,
                timestamp: Utc::now().to_rfc3339(),
            };
            let delivered = hub.emit(&room, event).await;
            debug!(%connection_id, %room, delivered, "relayed message");
        }
    }
}

async fn spawn_forwarder(
    hub: &ChatHub,
    room: &str,
    out_tx: mpsc::Sender<ServerEvent>,
) -> JoinHandle<()> {
    let mut events = hub.join(room).await;
    let room = room.to_string();

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if out_tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%room, skipped, "socket fell behind, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
