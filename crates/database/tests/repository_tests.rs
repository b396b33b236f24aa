//! Contract tests for the Supabase-backed repositories against a mocked table API.

use httpmock::prelude::*;
use httpmock::Method::PATCH;
use nutri_database::{
    GoalProgressUpdate, GoalRepo, GoalRepository, MessageRepo, MessageRepository, MetricRepo,
    MetricRepository, NewChatMessage, NutritionistRepo, NutritionistRepository, StoreError,
    SupabaseClient, UserRepo, UserRepository, UserProfileUpdate,
};
use serde_json::json;

fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::with_client(reqwest::Client::new(), &server.base_url(), "anon-key")
}

#[tokio::test]
async fn metrics_are_requested_newest_first_with_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/metricas_saude")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer anon-key")
                .query_param("usuario_id", "eq.u-1")
                .query_param("order", "data_registro.desc")
                .query_param("limit", "30");
            then.status(200).json_body(json!([
                { "id": 2, "usuario_id": "u-1", "peso": 70.5, "data_registro": "2024-02-01T00:00:00Z" },
                { "id": 1, "usuario_id": "u-1", "peso": 71.0, "data_registro": "2024-01-01T00:00:00Z" }
            ]));
        })
        .await;

    let repo = MetricRepository::new(client_for(&server));
    let metrics = repo.list_recent("u-1", 30).await.unwrap();

    mock.assert_async().await;
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].id, "2");
    assert_eq!(metrics[0].values.weight, Some(70.5));
}

#[tokio::test]
async fn missing_profile_is_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/usuarios")
                .query_param("id", "eq.ghost")
                .query_param("limit", "1");
            then.status(200).json_body(json!([]));
        })
        .await;

    let repo = UserRepository::new(client_for(&server));
    assert!(repo.find_by_id("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn profile_update_patches_only_allow_listed_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/usuarios")
                .query_param("id", "eq.u-1")
                .header("Prefer", "return=representation")
                .json_body(json!({ "peso": 68.0 }));
            then.status(200).json_body(json!([
                { "id": "u-1", "nome": "Ana", "peso": 68.0 }
            ]));
        })
        .await;

    let repo = UserRepository::new(client_for(&server));
    let update = UserProfileUpdate {
        weight: Some(68.0),
        ..UserProfileUpdate::default()
    };
    let updated = repo.update("u-1", &update).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(updated.weight, Some(68.0));
}

#[tokio::test]
async fn active_nutritionists_embed_user_summary() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/nutricionistas")
                .query_param("ativo", "eq.true")
                .query_param("select", "*,usuario:user_id(id,email,nome,telefone)");
            then.status(200).json_body(json!([{
                "id": 7,
                "user_id": "n-1",
                "nome": "Dra. Clara",
                "crn": "CRN-1",
                "ativo": true,
                "usuario": { "id": "n-1", "email": "clara@example.com", "nome": "Clara", "telefone": null }
            }]));
        })
        .await;

    let repo = NutritionistRepository::new(client_for(&server));
    let listed = repo.list_active().await.unwrap();

    mock.assert_async().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].nutritionist.id, "7");
    assert_eq!(listed[0].user.as_ref().unwrap().id, "n-1");
}

#[tokio::test]
async fn message_insert_returns_created_row() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/v1/mensagens_chat")
                .header("Prefer", "return=representation")
                .json_body_partial(r#"{ "remetente_id": "a", "destinatario_id": "b", "lida": false }"#);
            then.status(201).json_body(json!([{
                "id": 99,
                "remetente_id": "a",
                "destinatario_id": "b",
                "conteudo": "oi",
                "tipo": "texto",
                "lida": false,
                "data_envio": "2024-03-01T12:00:00Z"
            }]));
        })
        .await;

    let repo = MessageRepository::new(client_for(&server));
    let created = repo
        .create(&NewChatMessage {
            sender_id: "a".to_string(),
            recipient_id: "b".to_string(),
            content: "oi".to_string(),
            kind: "texto".to_string(),
            read: false,
            sent_at: "2024-03-01T12:00:00Z".to_string(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "99");
    assert!(!created.read);
}

#[tokio::test]
async fn mark_read_is_scoped_to_recipient() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/mensagens_chat")
                .query_param("id", "in.(\"1\",\"2\")")
                .query_param("destinatario_id", "eq.b")
                .json_body(json!({ "lida": true }));
            then.status(200).json_body(json!([]));
        })
        .await;

    let repo = MessageRepository::new(client_for(&server));
    repo.mark_read(&["1".to_string(), "2".to_string()], "b")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn goal_progress_update_returns_none_when_nothing_matched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/metas")
                .query_param("id", "eq.404");
            then.status(200).json_body(json!([]));
        })
        .await;

    let repo = GoalRepository::new(client_for(&server));
    let updated = repo
        .update_progress(
            "404",
            &GoalProgressUpdate {
                current_value: 1.0,
                completed: false,
                updated_at: "2024-03-01T12:00:00Z".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(updated.is_none());
}

#[tokio::test]
async fn store_errors_carry_provider_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/rest/v1/metas");
            then.status(401)
                .json_body(json!({ "message": "JWT expired", "code": "PGRST301" }));
        })
        .await;

    let repo = GoalRepository::new(client_for(&server));
    let err = repo.delete("1").await.unwrap_err();

    match err {
        StoreError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "JWT expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
