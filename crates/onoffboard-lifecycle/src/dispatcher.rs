//! Batch dispatch
//!
//! Walks a parsed batch in arrival order, classifies each event and hands
//! onboard/offboard events to the [`AccessReconciler`]. One event's outcome
//! never gates another.

use tracing::{info, Instrument};
use uuid::Uuid;

use onoffboard_core::{EventClass, LifecycleEvent};

use crate::reconciler::{AccessReconciler, ReconcileOutcome};

/// Per-event result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Type code is neither onboard nor offboard.
    Ignored { event_type_id: i64 },
    /// Recognized type code but no user id.
    MissingUser,
    Reconciled(ReconcileOutcome),
}

/// Counters for one batch, logged when the batch completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub ignored: usize,
    pub skipped: usize,
    pub applied: usize,
    pub failed: usize,
    pub outcomes: Vec<EventOutcome>,
}

impl BatchSummary {
    fn record(&mut self, outcome: EventOutcome) {
        self.total += 1;
        match &outcome {
            EventOutcome::Ignored { .. } => self.ignored += 1,
            EventOutcome::MissingUser => self.skipped += 1,
            EventOutcome::Reconciled(r) if r.is_failure() => self.failed += 1,
            EventOutcome::Reconciled(ReconcileOutcome::Applied { .. }) => self.applied += 1,
            EventOutcome::Reconciled(_) => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Root of the pipeline.
#[derive(Clone)]
pub struct EventDispatcher {
    reconciler: AccessReconciler,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(reconciler: AccessReconciler) -> Self {
        Self { reconciler }
    }

    /// Process every event sequentially, in batch order.
    pub async fn dispatch(&self, events: &[LifecycleEvent]) -> BatchSummary {
        let span = tracing::info_span!(
            "lifecycle_batch",
            batch_id = %Uuid::new_v4(),
            events = events.len()
        );

        async {
            let mut summary = BatchSummary::default();
            for event in events {
                summary.record(self.dispatch_one(event).await);
            }
            info!(
                total = summary.total,
                applied = summary.applied,
                failed = summary.failed,
                ignored = summary.ignored,
                skipped = summary.skipped,
                "Lifecycle batch processed"
            );
            summary
        }
        .instrument(span)
        .await
    }

    async fn dispatch_one(&self, event: &LifecycleEvent) -> EventOutcome {
        let class = event.class();
        let Some(direction) = class.direction() else {
            info!(event_type_id = event.event_type_id, "Event not needed, ignoring");
            return EventOutcome::Ignored {
                event_type_id: event.event_type_id,
            };
        };

        if event.user_id.is_zero() {
            info!(
                event_type_id = event.event_type_id,
                "Lifecycle event carries no user id, skipping"
            );
            return EventOutcome::MissingUser;
        }

        match class {
            EventClass::Onboard => {
                info!(user_id = %event.user_id, "User created, starting onboarding");
            }
            _ => info!(
                user_id = %event.user_id,
                event_type_id = event.event_type_id,
                "User deactivated, starting offboarding"
            ),
        }

        EventOutcome::Reconciled(self.reconciler.handle(event.user_id, direction).await)
    }
}
