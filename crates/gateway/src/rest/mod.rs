//! REST API endpoints for the gateway

pub mod auth;
pub mod chat;
pub mod goals;
pub mod health;
pub mod nutritionists;
pub mod users;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::middleware::{auth_middleware, nutritionist_middleware};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Create all REST API routes. Protected groups get the auth layer;
/// nutritionist routes get the role check on top of it.
pub fn create_rest_routes(state: Arc<GatewayState>) -> Router<Arc<GatewayState>> {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::public_routes())
        .merge(nutritionists::public_routes());

    let nutritionist_only = nutritionists::nutritionist_routes()
        .route_layer(from_fn_with_state(state.clone(), nutritionist_middleware));

    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(users::protected_routes())
        .merge(nutritionists::protected_routes())
        .merge(chat::protected_routes())
        .merge(goals::protected_routes())
        .merge(nutritionist_only)
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
