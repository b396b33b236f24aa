use httpmock::prelude::*;
use nutri_auth::{AuthError, AuthProvider, SupabaseAuthenticator};
use nutri_database::SupabaseClient;
use serde_json::json;

fn authenticator(server: &MockServer) -> SupabaseAuthenticator {
    SupabaseAuthenticator::new(SupabaseClient::with_client(
        reqwest::Client::new(),
        &server.base_url(),
        "anon-key",
    ))
}

#[tokio::test]
async fn sign_up_sends_metadata_and_returns_session() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/signup")
                .header("apikey", "anon-key")
                .json_body(json!({
                    "email": "ana@example.com",
                    "password": "secret123",
                    "data": { "full_name": "Ana", "tipo": "usuario" }
                }));
            then.status(200).json_body(json!({
                "access_token": "jwt-ana",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "refresh",
                "user": { "id": "u-ana", "email": "ana@example.com" }
            }));
        })
        .await;

    let result = authenticator(&server)
        .sign_up(
            "ana@example.com",
            "secret123",
            json!({ "full_name": "Ana", "tipo": "usuario" }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.user.unwrap().id, "u-ana");
    assert_eq!(result.session.unwrap().access_token, "jwt-ana");
}

#[tokio::test]
async fn sign_up_rejection_keeps_provider_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/v1/signup");
            then.status(422)
                .json_body(json!({ "code": 422, "msg": "User already registered" }));
        })
        .await;

    let err = authenticator(&server)
        .sign_up("ana@example.com", "secret123", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Rejected { status: 422, .. }));
    assert_eq!(err.to_string(), "User already registered");
}

#[tokio::test]
async fn password_grant_hits_token_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/token")
                .query_param("grant_type", "password");
            then.status(200).json_body(json!({
                "access_token": "jwt",
                "user": { "id": "u-1", "email": "a@example.com" }
            }));
        })
        .await;

    let result = authenticator(&server)
        .sign_in_with_password("a@example.com", "pw")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.session.unwrap().access_token, "jwt");
}

#[tokio::test]
async fn get_user_maps_unauthorized_to_invalid_token() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/v1/user")
                .header("authorization", "Bearer expired");
            then.status(401).json_body(json!({ "msg": "JWT expired" }));
        })
        .await;

    let err = authenticator(&server).get_user("expired").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn sign_out_uses_session_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/v1/logout")
                .header("authorization", "Bearer live-token");
            then.status(204);
        })
        .await;

    authenticator(&server).sign_out("live-token").await.unwrap();
    mock.assert_async().await;
}
