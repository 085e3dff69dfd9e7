//! Service configuration loaded from environment variables.
//!
//! Malformed values fail startup. Absent credentials do not: they are
//! collected in [`AppConfig::missing_credentials`] and reported when the
//! first batch arrives.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use onoffboard_core::{MappingError, RoleId, RoleTeamMap, TeamId, KNOWN_ROLES};
use onoffboard_github::{GitHubConfig, DEFAULT_API_URL};
use onoffboard_onelogin::{OneLoginConfig, OneLoginCredentials, DEFAULT_HANDLE_ATTRIBUTE};

/// Configuration for the onoffboard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address for the HTTP server.
    pub listen_addr: SocketAddr,

    /// Timeout applied to every outbound request.
    pub http_timeout: Duration,

    /// `None` when any OneLogin credential is missing.
    pub onelogin: Option<OneLoginConfig>,

    /// `None` when `GITHUB_TOKEN` is missing.
    pub github: Option<GitHubConfig>,

    /// Mattermost incoming webhook.
    pub mattermost_hook: Option<Url>,

    /// Every known role, with its team when one is configured.
    pub role_map: RoleTeamMap,

    /// Names of the credential variables that were not set.
    pub missing_credentials: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating process-global
    /// environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let optional = |key: &str| {
            reader(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut missing = Vec::new();

        let listen_addr = optional("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("LISTEN_ADDR".into(), e.to_string()))?;

        let timeout_secs = optional("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".into(), e.to_string()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "HTTP_TIMEOUT_SECS".into(),
                "must be greater than zero".into(),
            ));
        }
        let http_timeout = Duration::from_secs(timeout_secs);

        // OneLogin
        let client_id = optional("ONELOGIN_CLIENT");
        let client_secret = optional("ONELOGIN_CLIENTSECRET");
        let base_url = match optional("ONELOGIN_BASE_URL") {
            Some(url) => Some(parse_url("ONELOGIN_BASE_URL", &url)?.to_string()),
            None => optional("ONELOGIN_SUBDOMAIN")
                .map(|subdomain| format!("https://{subdomain}.onelogin.com")),
        };
        if client_id.is_none() {
            missing.push("ONELOGIN_CLIENT".to_string());
        }
        if client_secret.is_none() {
            missing.push("ONELOGIN_CLIENTSECRET".to_string());
        }
        if base_url.is_none() {
            missing.push("ONELOGIN_SUBDOMAIN".to_string());
        }
        let handle_attribute = optional("ONELOGIN_HANDLE_ATTRIBUTE")
            .unwrap_or_else(|| DEFAULT_HANDLE_ATTRIBUTE.to_string());
        let onelogin = match (client_id, client_secret, base_url) {
            (Some(client_id), Some(client_secret), Some(base_url)) => {
                let credentials = OneLoginCredentials {
                    client_id,
                    client_secret: SecretString::from(client_secret),
                };
                Some(
                    OneLoginConfig::with_base_url(base_url, credentials)
                        .handle_attribute(handle_attribute)
                        .timeout(http_timeout),
                )
            }
            _ => None,
        };

        // GitHub
        let api_url = optional("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        parse_url("GITHUB_API_URL", &api_url)?;
        let github = match optional("GITHUB_TOKEN") {
            Some(token) => Some(
                GitHubConfig::new(SecretString::from(token))
                    .api_url(api_url)
                    .timeout(http_timeout),
            ),
            None => {
                missing.push("GITHUB_TOKEN".to_string());
                None
            }
        };

        // Mattermost
        let mattermost_hook = match optional("MATTERMOST_HOOK") {
            Some(hook) => Some(parse_url("MATTERMOST_HOOK", &hook)?),
            None => {
                missing.push("MATTERMOST_HOOK".to_string());
                None
            }
        };

        let role_map = Self::build_role_map(&optional)?;

        Ok(Self {
            listen_addr,
            http_timeout,
            onelogin,
            github,
            mattermost_hook,
            role_map,
            missing_credentials: missing,
        })
    }

    /// Register every known role. Roles whose team variable is unset are
    /// kept without a team so they still stop the role scan.
    fn build_role_map<F>(optional: &F) -> Result<RoleTeamMap, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut map = RoleTeamMap::new();
        for role in &KNOWN_ROLES {
            let role_id = match optional(role.role_id_var) {
                Some(raw) => raw.parse::<RoleId>().map_err(|e| {
                    ConfigError::InvalidValue(role.role_id_var.into(), e.to_string())
                })?,
                None => role.default_role_id,
            };

            let Some(raw_team) = optional(role.team_id_var) else {
                map.insert_unbound(role_id, role.label)?;
                continue;
            };
            let team_id = raw_team.parse::<TeamId>().map_err(|e| {
                ConfigError::InvalidValue(role.team_id_var.into(), e.to_string())
            })?;
            if team_id.get() <= 0 {
                return Err(ConfigError::InvalidValue(
                    role.team_id_var.into(),
                    "team id must be positive".into(),
                ));
            }

            map.insert(role_id, team_id, role.label)?;
        }
        Ok(map)
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue(var.into(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue(
            var.into(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("invalid role mapping: {0}")]
    Mapping(#[from] MappingError),
}
