//! Mattermost incoming-webhook notifier for onoffboard.
//!
//! Posts `{"text": ..., "username": ...}` to the hook URL. Delivery errors
//! are returned to the caller, which logs and drops them.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use onoffboard_core::{NotificationError, Notifier};

/// Bot identity shown in the channel.
pub const DEFAULT_BOT_USERNAME: &str = "OnOffBoardBot";

/// Incoming-webhook payload.
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
    username: &'a str,
}

/// Notifier posting to a Mattermost incoming webhook.
#[derive(Debug, Clone)]
pub struct MattermostNotifier {
    hook_url: Url,
    username: String,
    http_client: reqwest::Client,
}

impl MattermostNotifier {
    /// # Errors
    ///
    /// Returns [`NotificationError::Config`] if the hook URL or HTTP client is
    /// unusable.
    pub fn new(hook_url: &str, timeout: Duration) -> Result<Self, NotificationError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("onoffboard/1.0")
            .build()
            .map_err(|e| NotificationError::Config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_http_client(hook_url, http_client)
    }

    /// Create a notifier with a pre-built `reqwest::Client` (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Config`] if `hook_url` is not an absolute URL.
    pub fn with_http_client(
        hook_url: &str,
        http_client: reqwest::Client,
    ) -> Result<Self, NotificationError> {
        let hook_url = Url::parse(hook_url).map_err(|e| {
            NotificationError::Config(format!("invalid webhook URL {hook_url}: {e}"))
        })?;
        Ok(Self {
            hook_url,
            username: DEFAULT_BOT_USERNAME.to_string(),
            http_client,
        })
    }

    /// Override the bot identity.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }
}

#[async_trait]
impl Notifier for MattermostNotifier {
    #[instrument(skip(self, message), fields(host = self.hook_url.host_str().unwrap_or_default()))]
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        debug!("Posting notification");

        let payload = WebhookMessage {
            text: message,
            username: &self.username,
        };
        let response = self
            .http_client
            .post(self.hook_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        Err(NotificationError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
