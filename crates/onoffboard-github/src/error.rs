//! Error types for the GitHub membership client.

use onoffboard_core::MutationError;
use thiserror::Error;

pub type GitHubResult<T> = Result<T, GitHubError>;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The handle cannot be used as a GitHub login.
    #[error("Invalid handle: {0:?}")]
    InvalidHandle(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer, including "already a member" style refusals.
    #[error("GitHub API returned {status}: {body}")]
    Api { status: u16, body: String },
}

impl From<GitHubError> for MutationError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Config(message) => Self::InvalidRequest(message),
            GitHubError::InvalidHandle(handle) => {
                Self::InvalidRequest(format!("invalid handle {handle:?}"))
            }
            GitHubError::Http(e) => Self::Http(e.to_string()),
            GitHubError::Api { status, body } => Self::Status { status, body },
        }
    }
}
