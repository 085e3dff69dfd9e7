//! Resolved identity snapshot.

use crate::ids::{RoleId, UserId};

/// User attributes fetched from the identity provider for one event.
///
/// Never cached: every event resolves a fresh record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub display_name: String,
    /// Collaboration-platform username, `None` when the attribute is absent.
    pub external_handle: Option<String>,
    /// Role identifiers in the order the provider lists them.
    pub role_ids: Vec<RoleId>,
}

impl UserRecord {
    /// Join first and last name the way the notification text expects.
    #[must_use]
    pub fn display_name_from(first: &str, last: &str) -> String {
        format!("{} {}", first.trim(), last.trim()).trim().to_string()
    }

    /// The handle if it is present and not blank.
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        self.external_handle
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_first_and_last() {
        assert_eq!(UserRecord::display_name_from("Ada", "Lovelace"), "Ada Lovelace");
        assert_eq!(UserRecord::display_name_from("Ada", ""), "Ada");
        assert_eq!(UserRecord::display_name_from("", ""), "");
    }

    #[test]
    fn test_blank_handle_is_absent() {
        let mut user = UserRecord::default();
        assert_eq!(user.handle(), None);

        user.external_handle = Some("   ".to_string());
        assert_eq!(user.handle(), None);

        user.external_handle = Some(" octocat ".to_string());
        assert_eq!(user.handle(), Some("octocat"));
    }
}
