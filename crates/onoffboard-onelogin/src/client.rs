//! OneLogin users API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use onoffboard_core::{IdentityResolver, ResolutionError, RoleId, UserId, UserRecord};

use crate::auth::TokenCache;
use crate::config::OneLoginConfig;
use crate::error::{OneLoginError, OneLoginResult};

/// User object returned by `GET /api/2/users/{id}` (subset).
#[derive(Debug, Default, Deserialize)]
pub struct OneLoginUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default, alias = "role_id")]
    pub role_ids: Option<Vec<i64>>,
    /// Values are kept raw; only the handle attribute is read, as a string.
    #[serde(default)]
    pub custom_attributes: Option<HashMap<String, Value>>,
}

impl OneLoginUser {
    /// Normalize into the pipeline's [`UserRecord`].
    #[must_use]
    pub fn into_record(self, user_id: UserId, handle_attribute: &str) -> UserRecord {
        let display_name = UserRecord::display_name_from(
            self.firstname.as_deref().unwrap_or_default(),
            self.lastname.as_deref().unwrap_or_default(),
        );
        let external_handle = self
            .custom_attributes
            .and_then(|mut attrs| attrs.remove(handle_attribute))
            .and_then(|value| match value {
                Value::String(handle) => Some(handle),
                _ => None,
            })
            .filter(|h| !h.trim().is_empty());
        let role_ids = self
            .role_ids
            .unwrap_or_default()
            .into_iter()
            .map(RoleId::new)
            .collect();

        UserRecord {
            user_id,
            display_name,
            external_handle,
            role_ids,
        }
    }
}

/// Identity resolver backed by the OneLogin API.
#[derive(Debug, Clone)]
pub struct OneLoginClient {
    base_url: String,
    handle_attribute: String,
    http_client: reqwest::Client,
    token_cache: TokenCache,
}

impl OneLoginClient {
    /// Create a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`OneLoginError::Config`] if the settings are invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: OneLoginConfig) -> OneLoginResult<Self> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("onoffboard/1.0")
            .build()
            .map_err(|e| OneLoginError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(config: OneLoginConfig, http_client: reqwest::Client) -> Self {
        let token_cache =
            TokenCache::new(&config.base_url, config.credentials, http_client.clone());
        Self {
            base_url: config.base_url,
            handle_attribute: config.handle_attribute,
            http_client,
            token_cache,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a user by numeric id.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> OneLoginResult<OneLoginUser> {
        let url = format!("{}/api/2/users/{}", self.base_url, user_id);
        debug!("OneLogin GET {}", url);

        let token = self.token_cache.get_token().await?;
        let response = self.http_client.get(&url).bearer_auth(token).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(OneLoginError::NotFound(user_id)),
            StatusCode::UNAUTHORIZED => {
                warn!("OneLogin rejected access token, clearing cache");
                self.token_cache.invalidate().await;
                Err(OneLoginError::Auth(format!(
                    "Authentication failed (401): {body}"
                )))
            }
            _ => Err(OneLoginError::Api {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

#[async_trait]
impl IdentityResolver for OneLoginClient {
    async fn resolve(&self, user_id: UserId) -> Result<UserRecord, ResolutionError> {
        let user = self.get_user(user_id).await?;
        Ok(user.into_record(user_id, &self.handle_attribute))
    }
}
