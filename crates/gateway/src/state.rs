//! Shared application state for the gateway

use std::sync::Arc;

use nutri_auth::{AuthProvider, SupabaseAuthenticator};
use nutri_chats::MessageService;
use nutri_config::CorsConfig;
use nutri_database::{
    GoalRepo, GoalRepository, MessageRepo, MessageRepository, MetricRepo, MetricRepository,
    NutritionistRepo, NutritionistRepository, SupabaseClient, UserRepo, UserRepository,
};
use nutri_users::{AccountService, GoalService, MetricService, NutritionistService, ProfileService};

use crate::websocket::ChatHub;

/// Repository handles the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepo>,
    pub metrics: Arc<dyn MetricRepo>,
    pub nutritionists: Arc<dyn NutritionistRepo>,
    pub messages: Arc<dyn MessageRepo>,
    pub goals: Arc<dyn GoalRepo>,
}

impl Repositories {
    /// Repositories backed by the hosted table API
    pub fn supabase(client: &SupabaseClient) -> Self {
        Self {
            users: Arc::new(UserRepository::new(client.clone())),
            metrics: Arc::new(MetricRepository::new(client.clone())),
            nutritionists: Arc::new(NutritionistRepository::new(client.clone())),
            messages: Arc::new(MessageRepository::new(client.clone())),
            goals: Arc::new(GoalRepository::new(client.clone())),
        }
    }

    /// Every repository served by one store value
    pub fn shared<S>(store: S) -> Self
    where
        S: UserRepo + MetricRepo + NutritionistRepo + MessageRepo + GoalRepo + Clone + 'static,
    {
        Self {
            users: Arc::new(store.clone()),
            metrics: Arc::new(store.clone()),
            nutritionists: Arc::new(store.clone()),
            messages: Arc::new(store.clone()),
            goals: Arc::new(store),
        }
    }
}

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Token validation for the auth middleware
    pub auth: Arc<dyn AuthProvider>,
    pub account_service: AccountService,
    pub profile_service: ProfileService,
    pub metric_service: MetricService,
    pub nutritionist_service: NutritionistService,
    pub goal_service: GoalService,
    pub message_service: MessageService,
    /// Relay rooms, shared by REST handlers and sockets
    pub chat_hub: ChatHub,
    pub cors: CorsConfig,
}

impl GatewayState {
    pub fn new(auth: Arc<dyn AuthProvider>, repositories: Repositories, cors: CorsConfig) -> Self {
        Self {
            account_service: AccountService::new(
                auth.clone(),
                repositories.users.clone(),
                repositories.nutritionists.clone(),
            ),
            profile_service: ProfileService::new(repositories.users.clone()),
            metric_service: MetricService::new(repositories.metrics),
            nutritionist_service: NutritionistService::new(repositories.nutritionists),
            goal_service: GoalService::new(repositories.goals),
            message_service: MessageService::new(repositories.messages, repositories.users),
            auth,
            chat_hub: ChatHub::new(),
            cors,
        }
    }

    /// State wired to the hosted backend for both auth and tables
    pub fn from_supabase(client: &SupabaseClient, cors: CorsConfig) -> Self {
        let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuthenticator::new(client.clone()));
        Self::new(auth, Repositories::supabase(client), cors)
    }
}
