//! Nutritionist directory, registration and the nutritionist's own area

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use nutri_auth::AuthUser;
use nutri_database::{Nutritionist, NutritionistUpdate, NutritionistWithUser, PatientLink};
use nutri_users::{NutritionistRegistration, NutritionistSignupRequest};

use crate::error::{ErrorResponse, GatewayError, GatewayResult};
use crate::state::GatewayState;

pub fn public_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/api/nutricionistas", post(register_nutritionist))
}

pub fn protected_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/api/nutricionistas", get(list_nutritionists))
}

/// Routes that additionally require the caller to be a nutritionist
pub fn nutritionist_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/api/nutricionistas/me",
            get(get_own_profile).put(update_own_profile),
        )
        .route("/api/nutricionistas/pacientes", get(list_patients))
}

#[utoipa::path(
    get,
    path = "/api/nutricionistas",
    tag = "nutritionists",
    responses(
        (status = 200, description = "Active nutritionists", body = [NutritionistWithUser])
    )
)]
pub async fn list_nutritionists(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<NutritionistWithUser>>> {
    Ok(Json(state.nutritionist_service.list_active().await?))
}

#[utoipa::path(
    post,
    path = "/api/nutricionistas",
    tag = "nutritionists",
    request_body = NutritionistSignupRequest,
    responses(
        (status = 201, description = "Registration pending approval"),
        (status = 400, description = "Registration refused", body = ErrorResponse)
    )
)]
pub async fn register_nutritionist(
    State(state): State<Arc<GatewayState>>,
    WithRejection(Json(request), _): WithRejection<Json<NutritionistSignupRequest>, GatewayError>,
) -> GatewayResult<(StatusCode, Json<NutritionistRegistration>)> {
    let registration = state.account_service.register_nutritionist(request).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/nutricionistas/me",
    tag = "nutritionists",
    responses(
        (status = 200, description = "Caller's nutritionist row", body = Nutritionist),
        (status = 403, description = "Caller is not a nutritionist", body = ErrorResponse)
    )
)]
pub async fn get_own_profile(Extension(nutritionist): Extension<Nutritionist>) -> Json<Nutritionist> {
    Json(nutritionist)
}

#[utoipa::path(
    put,
    path = "/api/nutricionistas/me",
    tag = "nutritionists",
    request_body = NutritionistUpdate,
    responses(
        (status = 200, description = "Updated row", body = Nutritionist),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 403, description = "Caller is not a nutritionist", body = ErrorResponse)
    )
)]
pub async fn update_own_profile(
    State(state): State<Arc<GatewayState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(update), _): WithRejection<Json<NutritionistUpdate>, GatewayError>,
) -> GatewayResult<Json<Nutritionist>> {
    Ok(Json(
        state
            .nutritionist_service
            .update_own(&user.id, &update)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/nutricionistas/pacientes",
    tag = "nutritionists",
    responses(
        (status = 200, description = "Patients linked to the caller", body = [PatientLink]),
        (status = 403, description = "Caller is not a nutritionist", body = ErrorResponse)
    )
)]
pub async fn list_patients(
    State(state): State<Arc<GatewayState>>,
    Extension(nutritionist): Extension<Nutritionist>,
) -> GatewayResult<Json<Vec<PatientLink>>> {
    Ok(Json(state.nutritionist_service.patients(&nutritionist).await?))
}
