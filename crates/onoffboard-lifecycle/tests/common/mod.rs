//! Common test utilities for onoffboard-lifecycle integration tests.
//!
//! In-memory collaborators that record every call, so pipeline properties
//! can be checked without any network.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use onoffboard_core::{
    Direction, IdentityResolver, MembershipMutator, MutationError, NotificationError, Notifier,
    ResolutionError, RoleId, RoleTeamMap, TeamId, UserId, UserRecord,
};
use onoffboard_lifecycle::{AccessReconciler, EventDispatcher};

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

pub const ROLE_DEV: RoleId = RoleId::new(258_872);
pub const ROLE_QA: RoleId = RoleId::new(258_878);
pub const ROLE_PM: RoleId = RoleId::new(258_875);
pub const ROLE_UNMAPPED: RoleId = RoleId::new(999);

pub const TEAM_DEV: TeamId = TeamId::new(200);
pub const TEAM_QA: TeamId = TeamId::new(100);
pub const TEAM_PM: TeamId = TeamId::new(400);

pub fn role_map() -> RoleTeamMap {
    RoleTeamMap::new()
        .with_role(ROLE_DEV, TEAM_DEV, "Dev")
        .and_then(|m| m.with_role(ROLE_QA, TEAM_QA, "QA"))
        .and_then(|m| m.with_role(ROLE_PM, TEAM_PM, "PM"))
        .unwrap()
}

pub fn user(id: i64, name: &str, handle: Option<&str>, roles: &[RoleId]) -> UserRecord {
    UserRecord {
        user_id: UserId::new(id),
        display_name: name.to_string(),
        external_handle: handle.map(str::to_string),
        role_ids: roles.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// FakeResolver
// ---------------------------------------------------------------------------

/// Resolver backed by a fixed user table.
#[derive(Default)]
pub struct FakeResolver {
    users: Mutex<HashMap<UserId, UserRecord>>,
    failing: Mutex<HashSet<UserId>>,
    calls: Mutex<Vec<UserId>>,
}

impl FakeResolver {
    pub fn with_user(self, record: UserRecord) -> Self {
        self.users.lock().unwrap().insert(record.user_id, record);
        self
    }

    /// Make lookups of `user_id` fail with a transport error.
    pub fn failing_for(self, user_id: i64) -> Self {
        self.failing.lock().unwrap().insert(UserId::new(user_id));
        self
    }

    pub fn calls(&self) -> Vec<UserId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityResolver for FakeResolver {
    async fn resolve(&self, user_id: UserId) -> Result<UserRecord, ResolutionError> {
        self.calls.lock().unwrap().push(user_id);
        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(ResolutionError::Http("connection reset".to_string()));
        }
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(ResolutionError::NotFound(user_id))
    }
}

// ---------------------------------------------------------------------------
// RecordingMutator
// ---------------------------------------------------------------------------

/// A membership call as seen by the mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationCall {
    pub direction: Direction,
    pub team_id: TeamId,
    pub handle: String,
}

#[derive(Default)]
pub struct RecordingMutator {
    calls: Mutex<Vec<MutationCall>>,
    should_fail: AtomicBool,
}

impl RecordingMutator {
    pub fn failing() -> Self {
        let mutator = Self::default();
        mutator.should_fail.store(true, Ordering::SeqCst);
        mutator
    }

    pub fn calls(&self) -> Vec<MutationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MembershipMutator for RecordingMutator {
    async fn apply(
        &self,
        direction: Direction,
        team_id: TeamId,
        handle: &str,
    ) -> Result<(), MutationError> {
        self.calls.lock().unwrap().push(MutationCall {
            direction,
            team_id,
            handle: handle.to_string(),
        });
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(MutationError::Status {
                status: 422,
                body: "Validation Failed".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.should_fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Http("hook unreachable".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Fakes wired into a reconciler, with handles kept for assertions.
pub struct Harness {
    pub resolver: Arc<FakeResolver>,
    pub mutator: Arc<RecordingMutator>,
    pub notifier: Arc<RecordingNotifier>,
    pub role_map: RoleTeamMap,
}

impl Harness {
    pub fn new(resolver: FakeResolver) -> Self {
        Self::with(resolver, RecordingMutator::default(), RecordingNotifier::default())
    }

    pub fn with(
        resolver: FakeResolver,
        mutator: RecordingMutator,
        notifier: RecordingNotifier,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            mutator: Arc::new(mutator),
            notifier: Arc::new(notifier),
            role_map: role_map(),
        }
    }

    pub fn with_role_map(mut self, role_map: RoleTeamMap) -> Self {
        self.role_map = role_map;
        self
    }

    pub fn reconciler(&self) -> AccessReconciler {
        AccessReconciler::new(
            self.resolver.clone(),
            self.mutator.clone(),
            self.notifier.clone(),
            Arc::new(self.role_map.clone()),
        )
    }

    pub fn dispatcher(&self) -> EventDispatcher {
        EventDispatcher::new(self.reconciler())
    }

    /// True when no collaborator was called at all.
    pub fn untouched(&self) -> bool {
        self.resolver.calls().is_empty()
            && self.mutator.calls().is_empty()
            && self.notifier.messages().is_empty()
    }
}
