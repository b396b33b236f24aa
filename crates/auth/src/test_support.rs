//! Auth provider double backed by in-memory maps

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{AuthError, AuthProvider, AuthResponse, AuthSession, AuthUser};

#[derive(Default)]
struct Accounts {
    by_email: HashMap<String, (String, AuthUser)>,
    tokens: HashMap<String, AuthUser>,
}

#[derive(Clone, Default)]
pub struct StaticAuthProvider {
    accounts: Arc<RwLock<Accounts>>,
    next_id: Arc<AtomicU64>,
}

impl StaticAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as a valid session for `user_id`
    pub async fn with_token(self, token: &str, user_id: &str) -> Self {
        let user = AuthUser::new(user_id, Some(format!("{user_id}@example.com")));
        self.accounts
            .write()
            .await
            .tokens
            .insert(token.to_string(), user);
        self
    }

    pub async fn is_token_active(&self, token: &str) -> bool {
        self.accounts.read().await.tokens.contains_key(token)
    }

    fn issue_session(user: &AuthUser) -> AuthSession {
        AuthSession {
            access_token: format!("token-{}", user.id),
            refresh_token: None,
            token_type: Some("bearer".to_string()),
            expires_in: Some(3600),
            expires_at: None,
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthResponse, AuthError> {
        let mut accounts = self.accounts.write().await;
        if accounts.by_email.contains_key(email) {
            return Err(AuthError::Rejected {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        if password.len() < 6 {
            return Err(AuthError::Rejected {
                status: 422,
                message: "Password should be at least 6 characters".to_string(),
            });
        }

        let id = format!("user-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut user = AuthUser::new(id, Some(email.to_string()));
        user.user_metadata = metadata;

        let session = Self::issue_session(&user);
        accounts
            .tokens
            .insert(session.access_token.clone(), user.clone());
        accounts
            .by_email
            .insert(email.to_string(), (password.to_string(), user.clone()));

        Ok(AuthResponse {
            user: Some(user),
            session: Some(session),
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let mut accounts = self.accounts.write().await;
        let user = match accounts.by_email.get(email) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => {
                return Err(AuthError::Rejected {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        };

        let session = Self::issue_session(&user);
        accounts
            .tokens
            .insert(session.access_token.clone(), user.clone());

        Ok(AuthResponse {
            user: Some(user),
            session: Some(session),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.accounts
            .write()
            .await
            .tokens
            .remove(access_token)
            .map(|_| ())
            .ok_or(AuthError::InvalidToken)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        self.accounts
            .read()
            .await
            .tokens
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
