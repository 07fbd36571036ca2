// crates/pulumi-cloud-config/src/config.rs
// ============================================================================
// Module: Pulumi Cloud Connector Configuration
// Description: Configuration loading and validation for the connector.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: pulumi-cloud-client, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The access token and organization name may instead be supplied through
//! `BATON_ACCESS_TOKEN` and `BATON_ORG_NAME`; non-empty environment values
//! win over the file. Missing or invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use pulumi_cloud_client::DEFAULT_BASE_URL;
use pulumi_cloud_client::PulumiClientConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "pulumi-cloud.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PULUMI_CLOUD_CONFIG";
/// Environment variable overriding the access token.
pub const ACCESS_TOKEN_ENV_VAR: &str = "BATON_ACCESS_TOKEN";
/// Environment variable overriding the organization name.
pub const ORG_NAME_ENV_VAR: &str = "BATON_ORG_NAME";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum access token length in bytes.
pub(crate) const MAX_ACCESS_TOKEN_LENGTH: usize = 4096;
/// Maximum organization name length in bytes.
pub(crate) const MAX_ORG_NAME_LENGTH: usize = 255;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Minimum response size limit in bytes.
pub(crate) const MIN_RESPONSE_BYTES: usize = 1024;
/// Maximum response size limit in bytes.
pub(crate) const MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Connector Config
// ============================================================================

/// Top-level connector configuration.
///
/// # Invariants
/// - After [`ConnectorConfig::validate`] succeeds, `access_token` and
///   `org_name` are non-empty and `api` is within its limits.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorConfig {
    /// Pulumi Cloud access token.
    #[serde(default)]
    pub access_token: String,
    /// Pulumi organization to govern.
    #[serde(default)]
    pub org_name: String,
    /// API transport settings.
    #[serde(default)]
    pub api: ApiConfig,
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("access_token", &"<redacted>")
            .field("org_name", &self.org_name)
            .field("api", &self.api)
            .finish()
    }
}

impl ConnectorConfig {
    /// Loads configuration using the process environment for overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |name| env::var(name).ok())
    }

    /// Loads configuration resolving environment variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolved = resolve_path(path, &lookup)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML content without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the content is not valid config TOML.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Replaces credentials with non-empty values from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ACCESS_TOKEN_ENV_VAR).filter(|value| !value.is_empty()) {
            self.access_token = token;
        }
        if let Some(org_name) = lookup(ORG_NAME_ENV_VAR).filter(|value| !value.is_empty()) {
            self.org_name = org_name;
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_access_token(&self.access_token)?;
        validate_org_name(&self.org_name)?;
        self.api.validate()
    }

    /// Returns the client transport settings.
    #[must_use]
    pub fn client_config(&self) -> PulumiClientConfig {
        PulumiClientConfig {
            base_url: self.api.base_url.clone(),
            timeout_ms: self.api.timeout_ms,
            max_response_bytes: self.api.max_response_bytes,
            user_agent: self.api.user_agent.clone(),
        }
    }
}

// ============================================================================
// SECTION: API Config
// ============================================================================

/// Pulumi Cloud API transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Allow cleartext HTTP endpoints (local testing only).
    #[serde(default)]
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            allow_http: false,
            timeout_ms: default_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Validates API transport settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("api.base_url is invalid: {err}")))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "api.base_url must use https unless api.allow_http is set".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "api.base_url has unsupported scheme: {other}"
                )));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("api.base_url must include a host".to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(ConfigError::Invalid(
                "api.base_url must not include credentials".to_string(),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::Invalid(
                "api.base_url must not include a query or fragment".to_string(),
            ));
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "api.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if !(MIN_RESPONSE_BYTES ..= MAX_RESPONSE_BYTES).contains(&self.max_response_bytes) {
            return Err(ConfigError::Invalid(format!(
                "api.max_response_bytes must be between {MIN_RESPONSE_BYTES} and \
                 {MAX_RESPONSE_BYTES}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("api.user_agent must be non-empty".to_string()));
        }
        Ok(())
    }
}

/// Default API endpoint.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    30_000
}

/// Default response size limit.
const fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024
}

/// Default user agent.
fn default_user_agent() -> String {
    "pulumi-cloud-connector/0.1".to_string()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path<F>(path: Option<&Path>, lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = lookup(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates the access token.
fn validate_access_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "access_token must be set (or provide {ACCESS_TOKEN_ENV_VAR})"
        )));
    }
    if token.len() > MAX_ACCESS_TOKEN_LENGTH {
        return Err(ConfigError::Invalid("access_token exceeds max length".to_string()));
    }
    if token.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(ConfigError::Invalid(
            "access_token must not contain whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates the organization name.
fn validate_org_name(org_name: &str) -> Result<(), ConfigError> {
    if org_name.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "org_name must be set (or provide {ORG_NAME_ENV_VAR})"
        )));
    }
    if org_name.len() > MAX_ORG_NAME_LENGTH {
        return Err(ConfigError::Invalid("org_name exceeds max length".to_string()));
    }
    if org_name
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control() || matches!(ch, '/' | '?' | '#'))
    {
        return Err(ConfigError::Invalid(
            "org_name must not contain whitespace, control characters, '/', '?', or '#'"
                .to_string(),
        ));
    }
    Ok(())
}
