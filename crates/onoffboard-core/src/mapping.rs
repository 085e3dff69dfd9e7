//! Role-to-team mapping and first-match team selection.
//!
//! The map is built once at startup and shared read-only between requests.

use std::collections::HashMap;

use crate::error::MappingError;
use crate::ids::{RoleId, TeamId};

/// A provider role the service knows how to map, with its default id and
/// the configuration variables that bind it to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownRole {
    pub label: &'static str,
    pub default_role_id: RoleId,
    /// Variable overriding the provider role id.
    pub role_id_var: &'static str,
    /// Variable holding the platform team id.
    pub team_id_var: &'static str,
}

/// Roles supported out of the box. When a user holds several, the user's
/// own role order decides which one is acted upon.
pub const KNOWN_ROLES: [KnownRole; 4] = [
    KnownRole {
        label: "Dev",
        default_role_id: RoleId::new(258_872),
        role_id_var: "ROLE_DEV_ID",
        team_id_var: "GITHUB_DEV_TEAMID",
    },
    KnownRole {
        label: "QA",
        default_role_id: RoleId::new(258_878),
        role_id_var: "ROLE_QA_ID",
        team_id_var: "GITHUB_QA_TEAMID",
    },
    KnownRole {
        label: "SA",
        default_role_id: RoleId::new(258_880),
        role_id_var: "ROLE_SA_ID",
        team_id_var: "GITHUB_SA_TEAMID",
    },
    KnownRole {
        label: "PM",
        default_role_id: RoleId::new(258_875),
        role_id_var: "ROLE_PM_ID",
        team_id_var: "GITHUB_PM_TEAMID",
    },
];

/// The team a role maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamBinding {
    pub team_id: TeamId,
    /// Human label used in notifications (e.g. "QA").
    pub label: String,
}

/// Result of [`select_team`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMatch {
    pub role_id: RoleId,
    pub team_id: TeamId,
    pub label: String,
}

/// Outcome of scanning a user's roles against the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelection {
    /// The first known role is bound to a team.
    Team(TeamMatch),
    /// The first known role has no team configured. Later roles are not
    /// consulted.
    Unconfigured { role_id: RoleId, label: String },
    /// None of the roles is known.
    NoMatch,
}

/// Static role → team table.
///
/// A known role is either bound to exactly one team or registered without
/// one. Both kinds stop the role scan in [`select_role`].
#[derive(Debug, Clone, Default)]
pub struct RoleTeamMap {
    bindings: HashMap<RoleId, TeamBinding>,
    unbound: HashMap<RoleId, String>,
}

impl RoleTeamMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `role_id` to `team_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateRole`] if the role is already known.
    pub fn insert(
        &mut self,
        role_id: RoleId,
        team_id: TeamId,
        label: impl Into<String>,
    ) -> Result<(), MappingError> {
        let label = label.into();
        self.check_unknown(role_id, &label)?;
        self.bindings.insert(role_id, TeamBinding { team_id, label });
        Ok(())
    }

    /// Register a known role that has no team.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateRole`] if the role is already known.
    pub fn insert_unbound(
        &mut self,
        role_id: RoleId,
        label: impl Into<String>,
    ) -> Result<(), MappingError> {
        let label = label.into();
        self.check_unknown(role_id, &label)?;
        self.unbound.insert(role_id, label);
        Ok(())
    }

    fn check_unknown(&self, role_id: RoleId, requested: &str) -> Result<(), MappingError> {
        let existing = self
            .bindings
            .get(&role_id)
            .map(|b| b.label.as_str())
            .or_else(|| self.unbound.get(&role_id).map(String::as_str));
        match existing {
            Some(existing) => Err(MappingError::DuplicateRole {
                role_id,
                existing: existing.to_string(),
                requested: requested.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Builder-style [`RoleTeamMap::insert`].
    ///
    /// # Errors
    ///
    /// Same as [`RoleTeamMap::insert`].
    pub fn with_role(
        mut self,
        role_id: RoleId,
        team_id: TeamId,
        label: impl Into<String>,
    ) -> Result<Self, MappingError> {
        self.insert(role_id, team_id, label)?;
        Ok(self)
    }

    /// Builder-style [`RoleTeamMap::insert_unbound`].
    ///
    /// # Errors
    ///
    /// Same as [`RoleTeamMap::insert_unbound`].
    pub fn with_unbound_role(
        mut self,
        role_id: RoleId,
        label: impl Into<String>,
    ) -> Result<Self, MappingError> {
        self.insert_unbound(role_id, label)?;
        Ok(self)
    }

    /// The team bound to `role_id`, if any.
    #[must_use]
    pub fn get(&self, role_id: RoleId) -> Option<&TeamBinding> {
        self.bindings.get(&role_id)
    }

    /// Whether `role_id` is known, with or without a team.
    #[must_use]
    pub fn is_known(&self, role_id: RoleId) -> bool {
        self.bindings.contains_key(&role_id) || self.unbound.contains_key(&role_id)
    }

    /// Number of roles bound to a team.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no role is bound to a team.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Scan `role_ids` in order and stop at the first role the map knows.
#[must_use]
pub fn select_role(role_ids: &[RoleId], map: &RoleTeamMap) -> RoleSelection {
    for &role_id in role_ids {
        if let Some(binding) = map.get(role_id) {
            return RoleSelection::Team(TeamMatch {
                role_id,
                team_id: binding.team_id,
                label: binding.label.clone(),
            });
        }
        if let Some(label) = map.unbound.get(&role_id) {
            return RoleSelection::Unconfigured {
                role_id,
                label: label.clone(),
            };
        }
    }
    RoleSelection::NoMatch
}

/// Pick the team for the first role in `role_ids` that the map knows.
///
/// Scanning stops at the first known role; later roles are never consulted,
/// so a user is acted upon for one team per event at most. A first known
/// role without a team selects nothing.
#[must_use]
pub fn select_team(role_ids: &[RoleId], map: &RoleTeamMap) -> Option<TeamMatch> {
    match select_role(role_ids, map) {
        RoleSelection::Team(team) => Some(team),
        RoleSelection::Unconfigured { .. } | RoleSelection::NoMatch => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QA: RoleId = RoleId::new(258_878);
    const PM: RoleId = RoleId::new(258_875);
    const UNMAPPED: RoleId = RoleId::new(1);

    fn qa_pm_map() -> RoleTeamMap {
        RoleTeamMap::new()
            .with_role(QA, TeamId::new(100), "QA")
            .unwrap()
            .with_role(PM, TeamId::new(200), "PM")
            .unwrap()
    }

    #[test]
    fn test_first_mapped_role_wins() {
        let map = qa_pm_map();
        let selected = select_team(&[QA, PM], &map).unwrap();
        assert_eq!(selected.role_id, QA);
        assert_eq!(selected.team_id, TeamId::new(100));
        assert_eq!(selected.label, "QA");

        let selected = select_team(&[PM, QA], &map).unwrap();
        assert_eq!(selected.team_id, TeamId::new(200));
    }

    #[test]
    fn test_unmapped_roles_are_skipped() {
        let map = qa_pm_map();
        let selected = select_team(&[UNMAPPED, PM, QA], &map).unwrap();
        assert_eq!(selected.role_id, PM);
    }

    #[test]
    fn test_no_mapped_role_selects_nothing() {
        let map = qa_pm_map();
        assert_eq!(select_team(&[UNMAPPED], &map), None);
        assert_eq!(select_team(&[], &map), None);
        assert_eq!(select_team(&[QA], &RoleTeamMap::new()), None);
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let mut map = qa_pm_map();
        let err = map.insert(QA, TeamId::new(300), "QA again").unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateRole {
                role_id: QA,
                existing: "QA".to_string(),
                requested: "QA again".to_string(),
            }
        );
        assert!(map.insert_unbound(PM, "PM again").is_err());
        assert_eq!(map.get(QA).unwrap().team_id, TeamId::new(100));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_unbound_role_stops_the_scan() {
        let map = RoleTeamMap::new()
            .with_unbound_role(QA, "QA")
            .unwrap()
            .with_role(PM, TeamId::new(200), "PM")
            .unwrap();

        assert_eq!(select_team(&[QA, PM], &map), None);
        assert_eq!(
            select_role(&[UNMAPPED, QA, PM], &map),
            RoleSelection::Unconfigured {
                role_id: QA,
                label: "QA".to_string(),
            }
        );
        assert_eq!(select_team(&[PM, QA], &map).unwrap().team_id, TeamId::new(200));
        assert_eq!(select_role(&[UNMAPPED], &map), RoleSelection::NoMatch);

        assert!(map.is_known(QA));
        assert!(!map.is_known(UNMAPPED));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_known_roles_have_distinct_ids() {
        for (i, a) in KNOWN_ROLES.iter().enumerate() {
            for b in &KNOWN_ROLES[i + 1..] {
                assert_ne!(a.default_role_id, b.default_role_id);
                assert_ne!(a.team_id_var, b.team_id_var);
            }
        }
    }
}
