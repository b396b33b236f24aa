use async_trait::async_trait;
use nutri_database::connection::{provider_error, SupabaseClient};
use nutri_database::StoreError;
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod test_support;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("auth service unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected auth response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Api { status, message } => AuthError::Rejected { status, message },
            StoreError::Http(err) => AuthError::Http(err),
            StoreError::Decode(err) => AuthError::Decode(err),
            other => AuthError::Rejected {
                status: 500,
                message: other.to_string(),
            },
        }
    }
}

/// Account as reported by the auth service. Fields beyond the ones the
/// backend reads are kept so they can be echoed back to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthUser {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
            user_metadata: Value::Object(Map::new()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Result of a sign-up or sign-in. Sign-up yields no session while the
/// address is waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResponse {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

impl AuthResponse {
    /// Token endpoints return the session with the user nested; sign-up
    /// without auto-confirm returns the bare user object.
    fn from_body(body: Value) -> Result<Self, AuthError> {
        if body.get("access_token").is_some() {
            let user = body
                .get("user")
                .cloned()
                .map(serde_json::from_value::<AuthUser>)
                .transpose()?;
            let session = serde_json::from_value::<AuthSession>(body)?;
            return Ok(Self {
                user,
                session: Some(session),
            });
        }

        let user = if body.get("id").is_some() {
            Some(serde_json::from_value::<AuthUser>(body)?)
        } else {
            body.get("user")
                .cloned()
                .map(serde_json::from_value::<AuthUser>)
                .transpose()?
        };

        Ok(Self {
            user,
            session: None,
        })
    }
}

/// The managed authentication service
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthResponse, AuthError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Resolve a bearer token to its account
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
}

#[derive(Clone)]
pub struct SupabaseAuthenticator {
    client: SupabaseClient,
}

impl SupabaseAuthenticator {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn read_body(response: Response) -> Result<Value, AuthError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(provider_error(status, &bytes).into());
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthenticator {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.client.auth_url("signup");
        let response = self
            .client
            .request(Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let result = AuthResponse::from_body(body)?;
        info!(
            user_id = result.user.as_ref().map(|user| user.id.as_str()).unwrap_or("-"),
            confirmed = result.session.is_some(),
            "account signed up"
        );
        Ok(result)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.client.auth_url("token");
        let response = self
            .client
            .request(Method::POST, &url, None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let result = AuthResponse::from_body(body)?;
        debug!(
            user_id = result.user.as_ref().map(|user| user.id.as_str()).unwrap_or("-"),
            "password sign-in"
        );
        Ok(result)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.client.auth_url("logout");
        let response = self
            .client
            .request(Method::POST, &url, Some(access_token))
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = self.client.auth_url("user");
        let response = self
            .client
            .request(Method::GET, &url, Some(access_token))
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            warn!(status = %response.status(), "token rejected by auth service");
            return Err(AuthError::InvalidToken);
        }

        let body = Self::read_body(response).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_body_splits_user_and_session() {
        let body = json!({
            "access_token": "jwt",
            "refresh_token": "r",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "u-1", "email": "a@example.com", "role": "authenticated" }
        });

        let parsed = AuthResponse::from_body(body).unwrap();
        let user = parsed.user.unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.extra.get("role"), Some(&json!("authenticated")));
        assert_eq!(parsed.session.unwrap().access_token, "jwt");
    }

    #[test]
    fn test_unconfirmed_signup_has_user_without_session() {
        let body = json!({ "id": "u-2", "email": "b@example.com", "confirmation_sent_at": "2024-01-01T00:00:00Z" });

        let parsed = AuthResponse::from_body(body).unwrap();
        assert_eq!(parsed.user.unwrap().id, "u-2");
        assert!(parsed.session.is_none());
    }

    #[test]
    fn test_store_api_error_becomes_rejection() {
        let err: AuthError = StoreError::Api {
            status: 400,
            message: "User already registered".to_string(),
        }
        .into();
        assert!(matches!(err, AuthError::Rejected { status: 400, .. }));
        assert_eq!(err.to_string(), "User already registered");
    }
}
