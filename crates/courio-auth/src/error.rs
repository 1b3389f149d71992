//! Authentication error types.

use courio_core::error::CourioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("invalid auth configuration: {0}")]
    InvalidConfig(String),
}

impl From<AuthError> for CourioError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(msg) => CourioError::Crypto(msg),
            AuthError::InvalidConfig(_) => CourioError::Internal(err.to_string()),
        }
    }
}
