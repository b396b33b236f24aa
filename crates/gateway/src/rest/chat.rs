//! Chat REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use nutri_auth::AuthUser;
use nutri_chats::{canonical_pair_key, ConversationSummary, MarkReadRequest, SendMessageRequest};
use nutri_database::ChatMessage;

use super::SuccessResponse;
use crate::error::{ErrorResponse, GatewayError, GatewayResult};
use crate::state::GatewayState;
use crate::websocket::ServerEvent;

pub fn protected_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/chat/conversas", get(list_conversations))
        .route("/api/chat/send", post(send_message))
        .route("/api/chat/marcar-lidas", post(mark_read))
        .route("/api/chat/:user_id/:nutri_id", get(get_history))
}

#[utoipa::path(
    get,
    path = "/api/chat/conversas",
    tag = "chat",
    responses(
        (status = 200, description = "One summary per conversation partner", body = [ConversationSummary])
    )
)]
pub async fn list_conversations(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
) -> GatewayResult<Json<Vec<ConversationSummary>>> {
    Ok(Json(state.message_service.conversations(&user.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/chat/{user_id}/{nutri_id}",
    tag = "chat",
    params(
        ("user_id" = String, Path, description = "Patient id"),
        ("nutri_id" = String, Path, description = "Nutritionist's user id")
    ),
    responses(
        (status = 200, description = "Messages, oldest first", body = [ChatMessage]),
        (status = 403, description = "Caller is not a participant", body = ErrorResponse)
    )
)]
pub async fn get_history(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, nutri_id)): Path<(String, String)>,
) -> GatewayResult<Json<Vec<ChatMessage>>> {
    let messages = state
        .message_service
        .history(&user.id, &user_id, &nutri_id)
        .await?;
    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/api/chat/send",
    tag = "chat",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Stored message", body = ChatMessage),
        (status = 400, description = "Empty message", body = ErrorResponse),
        (status = 404, description = "Recipient has no profile", body = ErrorResponse)
    )
)]
pub async fn send_message(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(request), _): WithRejection<Json<SendMessageRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<ChatMessage>)> {
    let message = state.message_service.send(&user.id, request).await?;

    let room = canonical_pair_key(&message.sender_id, &message.recipient_id);
    let delivered = state
        .chat_hub
        .emit(
            &room,
            ServerEvent::NewMessage {
                message: message.clone(),
            },
        )
        .await;
    tracing::debug!(%room, delivered, "new message pushed to room");

    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    post,
    path = "/api/chat/marcar-lidas",
    tag = "chat",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Messages addressed to the caller marked read", body = SuccessResponse),
        (status = 400, description = "No ids supplied", body = ErrorResponse)
    )
)]
pub async fn mark_read(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(request), _): WithRejection<Json<MarkReadRequest>, GatewayError>,
) -> GatewayResult<Json<SuccessResponse>> {
    state
        .message_service
        .mark_read(&user.id, &request.message_ids)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
