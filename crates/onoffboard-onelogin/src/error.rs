//! Error types for the OneLogin resolver.

use onoffboard_core::{ResolutionError, UserId};
use thiserror::Error;

/// Result type alias using `OneLoginError`.
pub type OneLoginResult<T> = Result<T, OneLoginError>;

/// Errors that can occur when talking to OneLogin.
#[derive(Debug, Error)]
pub enum OneLoginError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `OAuth2` token request failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// User does not exist.
    #[error("User {0} not found")]
    NotFound(UserId),

    /// Unexpected status from the API.
    #[error("OneLogin API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<OneLoginError> for ResolutionError {
    fn from(err: OneLoginError) -> Self {
        match err {
            OneLoginError::NotFound(user_id) => Self::NotFound(user_id),
            OneLoginError::Auth(message) => Self::Auth(message),
            OneLoginError::Config(message) => Self::Auth(format!("misconfigured client: {message}")),
            OneLoginError::Api { status, body } => Self::Status { status, body },
            OneLoginError::Http(e) => Self::Http(e.to_string()),
            OneLoginError::Json(e) => Self::Parse(e.to_string()),
        }
    }
}
