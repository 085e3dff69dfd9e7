//! Strongly Typed Identifiers
//!
//! The identity provider and the collaboration platform both use plain
//! integers for users, roles and teams. Wrapping them keeps a role id from
//! being passed where a team id is expected.
//!
//! # Example
//!
//! ```
//! use onoffboard_core::{RoleId, TeamId};
//!
//! let role = RoleId::new(258_878);
//! let team = TeamId::new(42);
//!
//! fn requires_team(id: TeamId) -> String {
//!     id.to_string()
//! }
//!
//! assert_eq!(requires_team(team), "42");
//! // requires_team(role); // This would not compile!
//! # let _ = role;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying integer parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed integer ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw integer identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer.
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Zero is what a missing field decodes to.
            #[must_use]
            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identity-provider user identifier.
    UserId
);

define_id!(
    /// Identity-provider role identifier.
    RoleId
);

define_id!(
    /// Collaboration-platform team identifier.
    TeamId
);
