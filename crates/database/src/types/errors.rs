//! Error types for the store layer

use thiserror::Error;

/// Errors raised while talking to the managed table API
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Row not found: {0}")]
    NotFound(String),

    #[error("Store rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store misconfigured: {0}")]
    Configuration(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::NotFound("metas".to_string());
        assert_eq!(err.to_string(), "Row not found: metas");
        assert!(err.is_not_found());

        let err = StoreError::Api {
            status: 409,
            message: "duplicate key value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Store rejected request (409): duplicate key value"
        );
        assert!(!err.is_not_found());
    }
}
