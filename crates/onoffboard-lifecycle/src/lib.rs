//! Lifecycle pipeline for onoffboard.
//!
//! [`EventDispatcher`] walks a batch of identity-provider events and hands
//! each onboard/offboard event to the [`AccessReconciler`]. The router
//! exposes the pipeline as `POST /events`.

pub mod dispatcher;
pub mod error;
pub mod reconciler;
pub mod router;

pub use dispatcher::{BatchSummary, EventDispatcher, EventOutcome};
pub use error::{ApiResult, ErrorResponse, ServiceError};
pub use reconciler::{AccessReconciler, ReconcileOutcome};
pub use router::{lifecycle_router, LifecycleState};
