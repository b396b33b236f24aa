//! Error types for chat operations.

use nutri_database::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not authorized")]
    AccessDenied,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type ChatResult<T> = Result<T, ChatError>;
