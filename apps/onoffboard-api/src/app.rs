//! Wiring of adapters, pipeline and routes.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use onoffboard_core::NotificationError;
use onoffboard_github::{GitHubClient, GitHubError};
use onoffboard_lifecycle::{lifecycle_router, AccessReconciler, EventDispatcher, LifecycleState};
use onoffboard_notify::MattermostNotifier;
use onoffboard_onelogin::{OneLoginClient, OneLoginError};

use crate::config::AppConfig;

/// Adapter construction failed at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("identity provider client: {0}")]
    Identity(#[from] OneLoginError),

    #[error("GitHub client: {0}")]
    Platform(#[from] GitHubError),

    #[error("notifier: {0}")]
    Notifier(#[from] NotificationError),
}

/// Build the pipeline state from configuration.
///
/// With credentials missing the service still starts, but every batch is
/// answered with a server error.
pub fn build_state(config: &AppConfig) -> Result<LifecycleState, StartupError> {
    let (Some(onelogin), Some(github), Some(hook)) =
        (&config.onelogin, &config.github, &config.mattermost_hook)
    else {
        warn!(
            missing = ?config.missing_credentials,
            "Credentials missing, lifecycle events will be rejected"
        );
        return Ok(LifecycleState::unconfigured(
            config.missing_credentials.clone(),
        ));
    };

    if config.role_map.is_empty() {
        warn!("No role is mapped to a GitHub team, every event will be a no-op");
    }

    let resolver = OneLoginClient::new(onelogin.clone())?;
    let mutator = GitHubClient::new(github.clone())?;
    let notifier = MattermostNotifier::new(hook.as_str(), config.http_timeout)?;

    info!(
        onelogin = %resolver.base_url(),
        mapped_roles = config.role_map.len(),
        "Lifecycle pipeline configured"
    );

    let reconciler = AccessReconciler::new(
        Arc::new(resolver),
        Arc::new(mutator),
        Arc::new(notifier),
        Arc::new(config.role_map.clone()),
    );
    Ok(LifecycleState::new(EventDispatcher::new(reconciler)))
}

/// Full application router.
pub fn build_router(state: LifecycleState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(lifecycle_router(state))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
