//! # Nutri Gateway Crate
//!
//! HTTP REST and WebSocket layer of the nutrition coaching backend. Requests
//! are authenticated against the managed auth service and routed to the
//! user and chat services.
//!
//! ## Architecture
//!
//! - **REST**: HTTP API endpoints with OpenAPI documentation
//! - **WebSocket**: chat relay rooms keyed by conversation
//! - **State**: services plus the relay room registry
//! - **Middleware**: authentication, nutritionist role, CORS and request logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nutri_gateway::{create_router, GatewayState};
//!
//! let state = GatewayState::from_supabase(&client, config.cors.clone());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod websocket;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use middleware::auth_middleware;
pub use state::{GatewayState, Repositories};
pub use websocket::{ChatHub, ServerEvent};

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let cors = middleware::create_cors_layer(&state.cors);
    let arc_state = Arc::new(state);

    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_rest_routes(arc_state.clone()).with_state(arc_state.clone()))
        .merge(websocket::create_websocket_routes().with_state(arc_state))
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::auth::signup,
                rest::auth::login,
                rest::auth::logout,
                rest::auth::me,
                rest::users::get_profile,
                rest::users::update_profile,
                rest::users::list_metrics,
                rest::users::record_metric,
                rest::nutritionists::list_nutritionists,
                rest::nutritionists::register_nutritionist,
                rest::nutritionists::get_own_profile,
                rest::nutritionists::update_own_profile,
                rest::nutritionists::list_patients,
                rest::chat::list_conversations,
                rest::chat::get_history,
                rest::chat::send_message,
                rest::chat::mark_read,
                rest::goals::list_goals,
                rest::goals::create_goal,
                rest::goals::update_progress,
                rest::goals::delete_goal,
                rest::goals::goal_stats,
            ),
            components(
                schemas(
                    ErrorResponse,
                    rest::SuccessResponse,
                    rest::health::HealthResponse,
                    rest::auth::LoginRequest,
                    rest::auth::MessageResponse,
                    rest::goals::ProgressRequest,
                    nutri_users::SignupRequest,
                    nutri_users::SignupProfile,
                    nutri_users::NutritionistSignupRequest,
                    nutri_users::NewGoalRequest,
                    nutri_users::GoalStats,
                    nutri_users::GoalTypeStats,
                    nutri_chats::ConversationSummary,
                    nutri_chats::SendMessageRequest,
                    nutri_chats::MarkReadRequest,
                    nutri_database::UserProfile,
                    nutri_database::UserProfileUpdate,
                    nutri_database::HealthMetric,
                    nutri_database::HealthMetricValues,
                    nutri_database::Nutritionist,
                    nutri_database::NutritionistUpdate,
                    nutri_database::NutritionistWithUser,
                    nutri_database::UserSummary,
                    nutri_database::PatientLink,
                    nutri_database::PatientSummary,
                    nutri_database::ChatMessage,
                    nutri_database::Goal,
                )
            ),
            tags(
                (name = "health", description = "Liveness"),
                (name = "auth", description = "Account endpoints"),
                (name = "users", description = "Profiles and health metrics"),
                (name = "nutritionists", description = "Nutritionist directory and area"),
                (name = "chat", description = "Conversations and messages"),
                (name = "goals", description = "Goals and progress"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
