//! Access reconciliation for a single lifecycle event.
//!
//! Resolve the user, pick a team, apply the membership change, notify.
//! Every collaborator failure is logged and contained here; nothing is
//! returned to the dispatcher except a descriptive outcome.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use onoffboard_core::{
    select_role, Direction, IdentityResolver, MembershipAction, MembershipMutator, Notifier,
    RoleSelection, RoleTeamMap, TeamId, UserId, UserRecord,
};

/// What happened to one reconciled event. Used for logs and tests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The identity provider lookup failed; nothing else was attempted.
    ResolutionFailed,
    /// The user has no platform handle.
    NoHandle,
    /// The user's first known role has no team, or no role is known.
    NoTeam,
    /// The mutation succeeded.
    Applied { team_id: TeamId },
    /// The mutation failed; the notification was still attempted.
    MutationFailed { team_id: TeamId },
}

impl ReconcileOutcome {
    /// Whether a collaborator call failed while handling the event.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ResolutionFailed | Self::MutationFailed { .. })
    }
}

/// Turns a (user, direction) pair into at most one membership change and
/// exactly one notification per change attempted.
#[derive(Clone)]
pub struct AccessReconciler {
    resolver: Arc<dyn IdentityResolver>,
    mutator: Arc<dyn MembershipMutator>,
    notifier: Arc<dyn Notifier>,
    role_map: Arc<RoleTeamMap>,
}

impl AccessReconciler {
    pub fn new(
        resolver: Arc<dyn IdentityResolver>,
        mutator: Arc<dyn MembershipMutator>,
        notifier: Arc<dyn Notifier>,
        role_map: Arc<RoleTeamMap>,
    ) -> Self {
        Self {
            resolver,
            mutator,
            notifier,
            role_map,
        }
    }

    #[must_use]
    pub fn role_map(&self) -> &RoleTeamMap {
        &self.role_map
    }

    /// Resolve `user_id` and reconcile it. A resolution failure ends the
    /// event here.
    #[instrument(skip_all, fields(user_id = %user_id, direction = %direction))]
    pub async fn handle(&self, user_id: UserId, direction: Direction) -> ReconcileOutcome {
        let user = match self.resolver.resolve(user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Failed to resolve user from identity provider, skipping event");
                return ReconcileOutcome::ResolutionFailed;
            }
        };
        self.reconcile(&user, direction).await
    }

    /// Apply `direction` for an already resolved user.
    pub async fn reconcile(&self, user: &UserRecord, direction: Direction) -> ReconcileOutcome {
        let Some(handle) = user.handle() else {
            info!(user_id = %user.user_id, "No GitHub handle for this user, nothing to do");
            return ReconcileOutcome::NoHandle;
        };

        let team = match select_role(&user.role_ids, &self.role_map) {
            RoleSelection::Team(team) => team,
            RoleSelection::Unconfigured { role_id, label } => {
                warn!(
                    user_id = %user.user_id,
                    role_id = %role_id,
                    role = %label,
                    "No GitHub team configured for the user's role, nothing to do"
                );
                return ReconcileOutcome::NoTeam;
            }
            RoleSelection::NoMatch => {
                info!(
                    user_id = %user.user_id,
                    roles = ?user.role_ids,
                    "No role matches a configured team, nothing to do"
                );
                return ReconcileOutcome::NoTeam;
            }
        };

        let action = MembershipAction::new(direction, team, handle, user.display_name.as_str());
        info!(
            handle = %action.handle,
            team_id = %action.team_id,
            team = %action.team_label,
            direction = %action.direction,
            "Applying team membership change"
        );

        let outcome = match self
            .mutator
            .apply(action.direction, action.team_id, &action.handle)
            .await
        {
            Ok(()) => {
                debug!(team_id = %action.team_id, "Membership change applied");
                ReconcileOutcome::Applied {
                    team_id: action.team_id,
                }
            }
            Err(e) => {
                error!(
                    error = %e,
                    handle = %action.handle,
                    team_id = %action.team_id,
                    direction = %action.direction,
                    "Membership change failed"
                );
                ReconcileOutcome::MutationFailed {
                    team_id: action.team_id,
                }
            }
        };

        // Sent regardless of the mutation result.
        if let Err(e) = self.notifier.notify(&action.notification_text()).await {
            warn!(error = %e, handle = %action.handle, "Failed to deliver notification");
        }

        outcome
    }
}
