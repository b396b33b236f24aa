//! Goal endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use nutri_auth::AuthUser;
use nutri_database::Goal;
use nutri_users::{GoalStats, NewGoalRequest};
use serde::Deserialize;
use utoipa::ToSchema;

use super::SuccessResponse;
use crate::error::{ErrorResponse, GatewayError, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressRequest {
    #[serde(default)]
    pub valor_atual: Option<f64>,
}

/// `:id` is a user id on GET and a goal id on DELETE
pub fn protected_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/metas", post(create_goal))
        .route("/api/metas/:id", get(list_goals).delete(delete_goal))
        .route("/api/metas/:id/progresso", put(update_progress))
        .route("/api/metas/:id/estatisticas", get(goal_stats))
}

#[utoipa::path(
    get,
    path = "/api/metas/{id}",
    tag = "goals",
    params(("id" = String, Path, description = "Owner's user id")),
    responses(
        (status = 200, description = "Goals, newest first", body = [Goal]),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn list_goals(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> GatewayResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.list(&user.id, &user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/metas",
    tag = "goals",
    request_body = NewGoalRequest,
    responses(
        (status = 201, description = "Goal created", body = Goal),
        (status = 400, description = "Missing tipo or valor_alvo", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn create_goal(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(request), _): WithRejection<Json<NewGoalRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create(&user.id, request).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(
    put,
    path = "/api/metas/{id}/progresso",
    tag = "goals",
    params(("id" = String, Path, description = "Goal id")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Goal with completion re-evaluated", body = Goal),
        (status = 400, description = "valor_atual missing", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such goal", body = ErrorResponse)
    )
)]
pub async fn update_progress(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(goal_id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<ProgressRequest>, GatewayError>,
) -> GatewayResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_progress(&user.id, &goal_id, request.valor_atual)
        .await?;
    Ok(Json(goal))
}

#[utoipa::path(
    delete,
    path = "/api/metas/{id}",
    tag = "goals",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "Goal deleted", body = SuccessResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "No such goal", body = ErrorResponse)
    )
)]
pub async fn delete_goal(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(goal_id): Path<String>,
) -> GatewayResult<Json<SuccessResponse>> {
    state.goal_service.delete(&user.id, &goal_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/metas/{id}/estatisticas",
    tag = "goals",
    params(("id" = String, Path, description = "Owner's user id")),
    responses(
        (status = 200, description = "Completion statistics", body = GoalStats),
        (status = 403, description = "Not the owner", body = ErrorResponse)
    )
)]
pub async fn goal_stats(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> GatewayResult<Json<GoalStats>> {
    Ok(Json(state.goal_service.stats(&user.id, &user_id).await?))
}
