//! Error taxonomy shared by the pipeline and its adapters.
//!
//! Only structural errors cross the batch boundary. Everything here is
//! recovered per event by the reconciler.

use thiserror::Error;

use crate::ids::{RoleId, UserId};

/// Identity lookup failed for one event.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The provider has no user with this id.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The provider rejected our credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The provider answered with an unexpected status.
    #[error("identity provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body could not be decoded.
    #[error("failed to parse user record: {0}")]
    Parse(String),
}

/// Platform membership change failed for one event.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("platform returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Chat message delivery failed.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notifier could not be built from its settings.
    #[error("invalid notifier configuration: {0}")]
    Config(String),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),
}

/// The role-team table was configured inconsistently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("role {role_id} is already registered as {existing}, cannot also register it as {requested}")]
    DuplicateRole {
        role_id: RoleId,
        existing: String,
        requested: String,
    },
}
