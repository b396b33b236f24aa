//! Profile and health-metric endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use nutri_auth::AuthUser;
use nutri_database::{HealthMetric, HealthMetricValues, UserProfile, UserProfileUpdate};

use crate::error::{ErrorResponse, GatewayError, GatewayResult};
use crate::state::GatewayState;

pub fn protected_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/user/:id", get(get_profile).put(update_profile))
        .route("/api/user/:id/metricas", get(list_metrics).post(record_metric))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 404, description = "No such profile", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<UserProfile>> {
    Ok(Json(state.profile_service.get(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/user/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Profile id")),
    request_body = UserProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    WithRejection(Json(update), _): WithRejection<Json<UserProfileUpdate>, GatewayError>,
) -> GatewayResult<Json<UserProfile>> {
    Ok(Json(
        state.profile_service.update(&user.id, &id, &update).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}/metricas",
    tag = "users",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Latest metrics, newest first", body = [HealthMetric]),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn list_metrics(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Vec<HealthMetric>>> {
    Ok(Json(state.metric_service.recent(&user.id, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/user/{id}/metricas",
    tag = "users",
    params(("id" = String, Path, description = "Profile id")),
    request_body = HealthMetricValues,
    responses(
        (status = 201, description = "Metric recorded", body = HealthMetric),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn record_metric(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    WithRejection(Json(values), _): WithRejection<Json<HealthMetricValues>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<HealthMetric>)> {
    let metric = state.metric_service.record(&user.id, &id, values).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}
