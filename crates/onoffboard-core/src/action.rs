//! Membership actions derived from a lifecycle event.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::ids::TeamId;
use crate::mapping::TeamMatch;

/// Whether access is being granted or revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Grant,
    Revoke,
}

impl Direction {
    /// Past-tense phrase used in notifications.
    #[must_use]
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Grant => "added to",
            Self::Revoke => "removed from",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grant => write!(f, "grant"),
            Self::Revoke => write!(f, "revoke"),
        }
    }
}

/// One membership change, consumed by the mutator and the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipAction {
    pub direction: Direction,
    pub team_id: TeamId,
    pub team_label: String,
    pub handle: String,
    pub actor_name: String,
}

impl MembershipAction {
    #[must_use]
    pub fn new(
        direction: Direction,
        team: TeamMatch,
        handle: impl Into<String>,
        actor_name: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            team_id: team.team_id,
            team_label: team.label,
            handle: handle.into(),
            actor_name: actor_name.into(),
        }
    }

    /// Text posted to the chat channel.
    ///
    /// Describes the attempted action; it is sent whether or not the
    /// mutation succeeded.
    #[must_use]
    pub fn notification_text(&self) -> String {
        format!(
            "User {} with github handler {} {} github team {} ({})",
            self.actor_name,
            self.handle,
            self.direction.past_tense(),
            self.team_label,
            self.team_id
        )
    }
}
