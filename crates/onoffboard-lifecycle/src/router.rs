//! Axum router for the lifecycle batch endpoint.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use onoffboard_core::{parse_batch, LifecycleEvent};

use crate::dispatcher::EventDispatcher;
use crate::error::{ApiResult, ServiceError};

/// Shared state for the batch handler.
#[derive(Clone)]
pub struct LifecycleState {
    dispatcher: Option<Arc<EventDispatcher>>,
    missing: Arc<Vec<String>>,
}

impl LifecycleState {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self {
            dispatcher: Some(Arc::new(dispatcher)),
            missing: Arc::new(Vec::new()),
        }
    }

    /// State for a service started without the credentials named in
    /// `missing`. Batches with an actionable event are rejected after they
    /// have been parsed; the rest are acknowledged.
    pub fn unconfigured(missing: Vec<String>) -> Self {
        Self {
            dispatcher: None,
            missing: Arc::new(missing),
        }
    }

    fn missing_credentials(&self) -> ServiceError {
        ServiceError::MissingCredentials(self.missing.to_vec())
    }
}

/// Creates the lifecycle router.
pub fn lifecycle_router(state: LifecycleState) -> Router {
    Router::new()
        .route("/events", post(receive_events_handler))
        .with_state(state)
}

/// Accepts a batch of lifecycle events and processes it before answering.
async fn receive_events_handler(
    State(state): State<LifecycleState>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let events = parse_batch(&body)?;

    match state.dispatcher.as_deref() {
        Some(dispatcher) => {
            dispatcher.dispatch(&events).await;
        }
        None if events.iter().any(LifecycleEvent::is_actionable) => {
            return Err(state.missing_credentials());
        }
        None => {
            info!(events = events.len(), "Batch has no actionable events, ignoring");
        }
    }

    Ok(Json(json!({ "status": "ok" })))
}
