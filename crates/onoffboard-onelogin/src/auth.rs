//! OAuth2 client-credentials authentication for the OneLogin API.

use secrecy::ExposeSecret;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::config::OneLoginCredentials;
use crate::error::{OneLoginError, OneLoginResult};

/// Tokens are refreshed this long before OneLogin says they expire.
const EXPIRY_GRACE: Duration = Duration::from_secs(30);

/// Token response from `/auth/oauth2/v2/token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Cached access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => Instant::now() >= exp,
            None => false,
        }
    }
}

/// When a token with `expires_in` seconds left must be refreshed. `None`
/// when the deadline is too far out to represent; such a token is cached
/// until a `401` invalidates it.
fn expiry_deadline(expires_in: u64) -> Option<Instant> {
    Instant::now().checked_add(Duration::from_secs(expires_in).saturating_sub(EXPIRY_GRACE))
}

/// Access-token cache shared across clones of the client.
#[derive(Debug, Clone)]
pub struct TokenCache {
    token_url: String,
    credentials: OneLoginCredentials,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    #[must_use]
    pub fn new(
        base_url: &str,
        credentials: OneLoginCredentials,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            token_url: format!("{base_url}/auth/oauth2/v2/token"),
            credentials,
            http_client,
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets a valid access token, fetching a new one if needed.
    pub async fn get_token(&self) -> OneLoginResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(cached) = cache.as_ref() {
                if !cached.is_expired() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let fresh = self.acquire_token().await?;
        let access_token = fresh.access_token.clone();
        *self.cached_token.write().await = Some(fresh);
        Ok(access_token)
    }

    /// Drop the cached token (e.g. after a 401).
    pub async fn invalidate(&self) {
        *self.cached_token.write().await = None;
    }

    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn acquire_token(&self) -> OneLoginResult<CachedToken> {
        debug!("Requesting OneLogin access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose_secret()),
            )
            .json(&serde_json::json!({ "grant_type": "client_credentials" }))
            .send()
            .await
            .map_err(|e| OneLoginError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(OneLoginError::Auth(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OneLoginError::Auth(format!("Failed to parse token response: {e}")))?;

        let expires_at = token.expires_in.and_then(expiry_deadline);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}
