//! Collaborator traits
//!
//! Capability traits for the three external systems the pipeline talks to.
//! Adapters live in their own crates; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::action::Direction;
use crate::error::{MutationError, NotificationError, ResolutionError};
use crate::ids::{TeamId, UserId};
use crate::user::UserRecord;

/// Looks up a user's attributes in the identity provider.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Fetch a fresh [`UserRecord`] for `user_id`.
    async fn resolve(&self, user_id: UserId) -> Result<UserRecord, ResolutionError>;
}

/// Adds or removes a handle from a team on the collaboration platform.
///
/// Implementations should treat "already a member" and "not a member" like
/// any other platform answer: success or a plain [`MutationError`]. No
/// read-back is expected.
#[async_trait]
pub trait MembershipMutator: Send + Sync {
    async fn apply(
        &self,
        direction: Direction,
        team_id: TeamId,
        handle: &str,
    ) -> Result<(), MutationError>;
}

/// Posts a message to a chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}
