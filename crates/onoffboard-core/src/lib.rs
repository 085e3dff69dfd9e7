//! onoffboard Core Library
//!
//! Shared types and traits for the lifecycle pipeline.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed integer identifiers (UserId, RoleId, TeamId)
//! - [`event`] - Lifecycle events and their classification
//! - [`user`] - Resolved user records
//! - [`mapping`] - Role-team map and first-match selection
//! - [`action`] - Membership actions and notification text
//! - [`traits`] - Resolver, mutator and notifier capabilities
//! - [`error`] - Per-event error taxonomy
//!
//! # Example
//!
//! ```
//! use onoffboard_core::{select_team, RoleId, RoleTeamMap, TeamId};
//!
//! let map = RoleTeamMap::new()
//!     .with_role(RoleId::new(258_878), TeamId::new(10), "QA")
//!     .unwrap();
//!
//! let team = select_team(&[RoleId::new(1), RoleId::new(258_878)], &map).unwrap();
//! assert_eq!(team.team_id, TeamId::new(10));
//! ```

pub mod action;
pub mod error;
pub mod event;
pub mod ids;
pub mod mapping;
pub mod traits;
pub mod user;

pub use action::{Direction, MembershipAction};
pub use error::{MappingError, MutationError, NotificationError, ResolutionError};
pub use event::{parse_batch, EventClass, LifecycleEvent};
pub use ids::{ParseIdError, RoleId, TeamId, UserId};
pub use mapping::{
    select_role, select_team, KnownRole, RoleSelection, RoleTeamMap, TeamBinding, TeamMatch,
    KNOWN_ROLES,
};
pub use traits::{IdentityResolver, MembershipMutator, Notifier};
pub use user::UserRecord;
