//! Error types for the user-facing services.

use nutri_auth::AuthError;
use nutri_database::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized")]
    AccessDenied,

    #[error("{0}")]
    InvalidInput(String),

    /// Sign-up or registration refused by the auth service or the store
    #[error("{0}")]
    Registration(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Auth service error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type UserResult<T> = Result<T, UserError>;
