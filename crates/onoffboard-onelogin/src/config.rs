//! OneLogin connection settings.

use secrecy::SecretString;
use std::time::Duration;

use crate::error::OneLoginError;

/// Custom attribute that holds the user's GitHub handle.
pub const DEFAULT_HANDLE_ATTRIBUTE: &str = "GH";

/// API client credentials.
///
/// The [`Debug`] impl comes from [`SecretString`], which redacts the secret.
#[derive(Debug, Clone)]
pub struct OneLoginCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Settings for [`crate::OneLoginClient`].
#[derive(Debug, Clone)]
pub struct OneLoginConfig {
    /// Tenant base URL, e.g. `https://acme.onelogin.com`.
    pub base_url: String,
    pub credentials: OneLoginCredentials,
    /// Name of the custom attribute carrying the platform handle.
    pub handle_attribute: String,
    pub timeout: Duration,
}

impl OneLoginConfig {
    /// Settings for a tenant subdomain with default attribute and timeout.
    #[must_use]
    pub fn for_subdomain(subdomain: &str, credentials: OneLoginCredentials) -> Self {
        Self::with_base_url(format!("https://{subdomain}.onelogin.com"), credentials)
    }

    /// Settings for an explicit base URL (used by tests and proxies).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, credentials: OneLoginCredentials) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            handle_attribute: DEFAULT_HANDLE_ATTRIBUTE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn handle_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.handle_attribute = attribute.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the base URL parses before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`OneLoginError::Config`] for an unusable URL or empty client id.
    pub fn validate(&self) -> Result<(), OneLoginError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| OneLoginError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;
        if self.credentials.client_id.trim().is_empty() {
            return Err(OneLoginError::Config("client id is empty".to_string()));
        }
        Ok(())
    }
}
