//! Account endpoints: sign-up, sign-in, sign-out and the current account

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use nutri_auth::{AuthResponse, AuthUser};
use nutri_users::{CurrentUser, SignupRequest, SignupResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, GatewayError, GatewayResult};
use crate::middleware::bearer_token;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub fn public_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

pub fn protected_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/api/auth/me", get(me))
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account and profile created"),
        (status = 400, description = "Sign-up refused", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<GatewayState>>,
    WithRejection(Json(request), _): WithRejection<Json<SignupRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<SignupResponse>)> {
    let created = state.account_service.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; body carries user and session"),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, GatewayError>,
) -> GatewayResult<Json<AuthResponse>> {
    let session = state
        .account_service
        .sign_in(&request.email, &request.password)
        .await?;
    Ok(Json(session))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session revoked", body = MessageResponse),
        (status = 500, description = "Auth service failure", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> GatewayResult<Json<MessageResponse>> {
    state
        .account_service
        .sign_out(bearer_token(&headers))
        .await?;
    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Auth account fields plus the stored profile"),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
) -> GatewayResult<Json<CurrentUser>> {
    Ok(Json(state.account_service.current_user(user).await?))
}
