//! GitHub REST client for team memberships.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use onoffboard_core::{Direction, MembershipMutator, MutationError, TeamId};

use crate::error::{GitHubError, GitHubResult};

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: SecretString,
    pub timeout: Duration,
}

impl GitHubConfig {
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token,
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Adds and removes team members through
/// `/teams/{team_id}/memberships/{username}`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_url: Url,
    token: SecretString,
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// # Errors
    ///
    /// Returns [`GitHubError::Config`] for an unusable API URL or if the HTTP
    /// client cannot be built.
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_http_client(config, http_client)
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Config`] for an unusable API URL.
    pub fn with_http_client(
        config: GitHubConfig,
        http_client: reqwest::Client,
    ) -> GitHubResult<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            GitHubError::Config(format!("invalid API URL {}: {e}", config.api_url))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::Config(format!(
                "API URL {} cannot be a base",
                config.api_url
            )));
        }
        Ok(Self {
            api_url,
            token: config.token,
            http_client,
        })
    }

    /// URL of one team membership.
    fn membership_url(&self, team_id: TeamId, handle: &str) -> GitHubResult<Url> {
        let handle = handle.trim();
        if !is_valid_login(handle) {
            return Err(GitHubError::InvalidHandle(handle.to_string()));
        }

        let team = team_id.to_string();
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::Config("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["teams", team.as_str(), "memberships", handle]);
        Ok(url)
    }

    /// Add `handle` to the team (invites if not yet an org member).
    #[instrument(skip(self))]
    pub async fn add_team_membership(&self, team_id: TeamId, handle: &str) -> GitHubResult<()> {
        let url = self.membership_url(team_id, handle)?;
        debug!("GitHub PUT {}", url);
        let request = self
            .http_client
            .put(url)
            .json(&serde_json::json!({ "role": "member" }));
        self.send(request).await
    }

    /// Remove `handle` from the team.
    #[instrument(skip(self))]
    pub async fn remove_team_membership(
        &self,
        team_id: TeamId,
        handle: &str,
    ) -> GitHubResult<()> {
        let url = self.membership_url(team_id, handle)?;
        debug!("GitHub DELETE {}", url);
        self.send(self.http_client.delete(url)).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> GitHubResult<()> {
        let response = request
            .bearer_auth(self.token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, "onoffboard/1.0")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        Err(GitHubError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// GitHub logins are ASCII alphanumerics and hyphens; managed-user logins
/// add an underscore suffix.
fn is_valid_login(handle: &str) -> bool {
    !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl MembershipMutator for GitHubClient {
    async fn apply(
        &self,
        direction: Direction,
        team_id: TeamId,
        handle: &str,
    ) -> Result<(), MutationError> {
        match direction {
            Direction::Grant => self.add_team_membership(team_id, handle).await?,
            Direction::Revoke => self.remove_team_membership(team_id, handle).await?,
        }
        Ok(())
    }
}
