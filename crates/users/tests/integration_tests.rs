//! Integration tests for the users crate against the in-memory store

use std::sync::Arc;

use nutri_auth::test_support::StaticAuthProvider;
use nutri_database::test_support::InMemoryStore;
use nutri_database::{HealthMetricValues, UserProfileUpdate};
use nutri_users::{
    AccountService, GoalService, MetricService, NewGoalRequest, ProfileService, SignupProfile,
    SignupRequest, UserError,
};

struct Services {
    accounts: AccountService,
    profiles: ProfileService,
    metrics: MetricService,
    goals: GoalService,
}

fn services() -> Services {
    let store = InMemoryStore::new();
    Services {
        accounts: AccountService::new(
            Arc::new(StaticAuthProvider::new()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        ),
        profiles: ProfileService::new(Arc::new(store.clone())),
        metrics: MetricService::new(Arc::new(store.clone())),
        goals: GoalService::new(Arc::new(store)),
    }
}

fn signup(email: &str, name: &str) -> SignupRequest {
    SignupRequest {
        email: email.to_string(),
        password: "secret123".to_string(),
        user_data: SignupProfile {
            nome: name.to_string(),
            ..SignupProfile::default()
        },
    }
}

#[tokio::test]
async fn test_new_user_journey() {
    let services = services();

    let ana = services
        .accounts
        .sign_up(signup("ana@example.com", "Ana"))
        .await
        .unwrap()
        .user;

    let update = UserProfileUpdate {
        height: Some(1.65),
        ..UserProfileUpdate::default()
    };
    let profile = services
        .profiles
        .update(&ana.id, &ana.id, &update)
        .await
        .unwrap();
    assert_eq!(profile.height, Some(1.65));

    services
        .metrics
        .record(
            &ana.id,
            &ana.id,
            HealthMetricValues {
                weight: Some(63.0),
                ..HealthMetricValues::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(services.metrics.recent(&ana.id, &ana.id).await.unwrap().len(), 1);

    let goal = services
        .goals
        .create(
            &ana.id,
            NewGoalRequest {
                usuario_id: ana.id.clone(),
                tipo: Some("peso".to_string()),
                valor_alvo: Some(60.0),
                data_limite: None,
                descricao: Some("perder 3kg".to_string()),
            },
        )
        .await
        .unwrap();
    services
        .goals
        .update_progress(&ana.id, &goal.id, Some(61.0))
        .await
        .unwrap();

    let stats = services.goals.stats(&ana.id, &ana.id).await.unwrap();
    assert_eq!(stats.total_metas, 1);
    assert_eq!(stats.metas_concluidas, 1);
    assert_eq!(stats.taxa_conclusao, 100.0);
}

#[tokio::test]
async fn test_users_cannot_reach_each_others_data() {
    let services = services();
    let ana = services
        .accounts
        .sign_up(signup("ana@example.com", "Ana"))
        .await
        .unwrap()
        .user;
    let bob = services
        .accounts
        .sign_up(signup("bob@example.com", "Bob"))
        .await
        .unwrap()
        .user;

    assert!(matches!(
        services.metrics.recent(&bob.id, &ana.id).await,
        Err(UserError::AccessDenied)
    ));
    assert!(matches!(
        services.goals.list(&bob.id, &ana.id).await,
        Err(UserError::AccessDenied)
    ));
    assert!(matches!(
        services.goals.stats(&bob.id, &ana.id).await,
        Err(UserError::AccessDenied)
    ));

    // Profiles are readable by any signed-in user
    assert_eq!(services.profiles.get(&ana.id).await.unwrap().name, "Ana");
}
