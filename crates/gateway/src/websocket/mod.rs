//! WebSocket endpoints for the gateway

pub mod chat;
pub mod hub;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::GatewayState;

pub use chat::chat_websocket_handler;
pub use hub::{ChatHub, ClientEvent, ServerEvent};

/// Create all WebSocket routes
pub fn create_websocket_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/ws", get(chat::chat_websocket_handler))
}
