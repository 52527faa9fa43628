//! Client configuration
//!
//! Replaces process-wide credential initialization with an explicit value
//! that is handed to [`RestClient`](crate::http::RestClient). Configs can be
//! built in code, read from the environment, or loaded from YAML/JSON files.

use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::types::Domain;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the account SID
pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the auth token
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable overriding the base URL of every domain
pub const ENV_BASE_URL: &str = "TWILIO_BASE_URL";

/// Client configuration: account context, credentials and transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Account SID; scopes resource paths and is the default Basic-auth user
    pub account_sid: String,

    /// Auth token; the default Basic-auth password
    pub auth_token: String,

    /// URL scheme for domain hosts
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Base domain each service domain is prefixed onto
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    /// Fixed base URL used for every domain (proxies, mock servers)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size requested by list readers unless overridden
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Optional client-side request throttling
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_base_domain() -> String {
    "twilio.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("restline/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> u32 {
    50
}

impl ClientConfig {
    /// Create a config with default transport settings
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            scheme: default_scheme(),
            base_domain: default_base_domain(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            rate_limit: None,
        }
    }

    /// Create a new config builder
    pub fn builder(account_sid: impl Into<String>, auth_token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(account_sid, auth_token),
        }
    }

    /// Read the config from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account_sid = lookup(ENV_ACCOUNT_SID)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::missing_field(ENV_ACCOUNT_SID))?;
        let auth_token = lookup(ENV_AUTH_TOKEN)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::missing_field(ENV_AUTH_TOKEN))?;

        let mut config = Self::new(account_sid, auth_token);
        config.base_url = lookup(ENV_BASE_URL).filter(|v| !v.is_empty());
        Ok(config)
    }

    /// Parse a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` files are parsed as JSON, anything else as YAML.
    ///
    /// Errors name the file they came from.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        config.with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.account_sid.is_empty() {
            return Err(Error::missing_field("account_sid"));
        }
        if self.auth_token.is_empty() {
            return Err(Error::missing_field("auth_token"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be positive"));
        }
        Ok(())
    }

    /// Scheme and host for a domain, without a trailing slash
    pub fn base_url_for(&self, domain: Domain) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("{}://{}.{}", self.scheme, domain.as_str(), self.base_domain),
        }
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base domain
    #[must_use]
    pub fn base_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.base_domain = domain.into();
        self
    }

    /// Route every domain to one base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Enable client-side throttling
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
