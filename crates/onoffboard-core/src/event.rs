//! Lifecycle events delivered by the identity provider.
//!
//! The provider's event schema carries dozens of optional fields. Only the
//! event type and the affected user are modeled; serde drops the rest.

use serde::{Deserialize, Deserializer};

use crate::action::Direction;
use crate::ids::UserId;

/// Event type code for a newly created user.
pub const USER_CREATED: i64 = 13;
/// Event type code for a deactivated user.
pub const USER_DEACTIVATED: i64 = 15;
/// Event type code for a suspended user.
pub const USER_SUSPENDED: i64 = 21;
/// Event type code for a user whose license was removed.
pub const USER_UNLICENSED: i64 = 223;

/// One record of an incoming batch.
///
/// Missing or `null` fields decode to zero, which classifies as
/// [`EventClass::Ignore`] or is skipped by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LifecycleEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_type_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: UserId,
}

impl LifecycleEvent {
    #[must_use]
    pub fn new(event_type_id: i64, user_id: impl Into<UserId>) -> Self {
        Self {
            event_type_id,
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn class(&self) -> EventClass {
        EventClass::classify(self.event_type_id)
    }

    /// Whether the event reaches the collaborators: a recognized type code
    /// and a user to act on.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.class().direction().is_some() && !self.user_id.is_zero()
    }
}

/// Outcome of classifying an event type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Onboard,
    Offboard,
    Ignore,
}

impl EventClass {
    /// Map an event type code to its lifecycle outcome.
    ///
    /// Deactivation, suspension and unlicensing are three codes for the same
    /// offboarding behavior.
    #[must_use]
    pub fn classify(event_type_id: i64) -> Self {
        match event_type_id {
            USER_CREATED => Self::Onboard,
            USER_DEACTIVATED | USER_SUSPENDED | USER_UNLICENSED => Self::Offboard,
            _ => Self::Ignore,
        }
    }

    /// Access direction for this class, `None` when the event is ignored.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Onboard => Some(Direction::Grant),
            Self::Offboard => Some(Direction::Revoke),
            Self::Ignore => None,
        }
    }
}

/// Parse a raw batch payload.
///
/// Fails only when the payload is not a JSON array of objects with
/// well-typed known fields. Unknown fields are ignored.
pub fn parse_batch(body: &[u8]) -> Result<Vec<LifecycleEvent>, serde_json::Error> {
    serde_json::from_slice(body)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
