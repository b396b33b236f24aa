//! Middleware for authentication and other cross-cutting concerns

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use nutri_auth::AuthUser;
use nutri_config::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// Bearer token from the `Authorization` header, if one was sent.
/// The scheme name is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim_start().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// Resolve the bearer token to an account and attach it to the request.
/// A missing token is 401, a token the auth service refuses is 403.
pub async fn auth_middleware(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| GatewayError::Unauthorized("Access token required".to_string()))?;

    let user = state.auth.get_user(token).await.map_err(|error| {
        tracing::debug!(%error, "token rejected");
        GatewayError::Forbidden("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Load the caller's nutritionist row once per request. Must run after
/// [`auth_middleware`].
pub async fn nutritionist_middleware(
    State(state): State<Arc<GatewayState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let user_id = extract_user(&request)?.id.clone();

    let nutritionist = state
        .nutritionist_service
        .find_for_user(&user_id)
        .await?
        .ok_or_else(|| {
            GatewayError::Forbidden("Access restricted to nutritionists".to_string())
        })?;

    request.extensions_mut().insert(nutritionist);
    Ok(next.run(request).await)
}

/// Extract the authenticated account from request extensions
pub fn extract_user(request: &Request) -> GatewayResult<&AuthUser> {
    request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| GatewayError::Unauthorized("User not authenticated".to_string()))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// CORS restricted to the configured origins, with credentials
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .allow_credentials(true)
}
