//! SmartyStreets client configuration.
//!
//! Defaults point at the production US Street API. Override via environment
//! variables or explicit construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of the US Street Address API.
pub const DEFAULT_STREET_API_URL: &str = "https://us-street.api.smarty.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound the API accepts for the `candidates` parameter.
pub const MAX_CANDIDATES_LIMIT: u8 = 10;

/// Configuration for connecting to the US Street Address API.
///
/// Custom `Debug` implementation redacts the `auth_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct SmartyConfig {
    /// Base URL of the US Street API.
    /// Default: <https://us-street.api.smarty.com>
    pub base_url: Url,
    /// Secret key id (`auth-id` query parameter).
    pub auth_id: String,
    /// Secret key token (`auth-token` query parameter).
    pub auth_token: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum candidates requested per address (1..=10).
    pub max_candidates: u8,
}

impl std::fmt::Debug for SmartyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartyConfig")
            .field("base_url", &self.base_url)
            .field("auth_id", &self.auth_id)
            .field("auth_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_candidates", &self.max_candidates)
            .finish()
    }
}

impl SmartyConfig {
    /// Create a configuration for the production endpoint.
    pub fn new(auth_id: impl Into<String>, auth_token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("default", DEFAULT_STREET_API_URL)?,
            auth_id: auth_id.into(),
            auth_token: Zeroizing::new(auth_token.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_candidates: 1,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SMARTY_AUTH_ID` (required)
    /// - `SMARTY_AUTH_TOKEN` (required)
    /// - `SMARTY_STREET_API_URL` (default: `https://us-street.api.smarty.com`)
    /// - `SMARTY_TIMEOUT_SECS` (default: 30)
    /// - `SMARTY_MAX_CANDIDATES` (default: 1, clamped to 1..=10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_id = std::env::var("SMARTY_AUTH_ID")
            .map_err(|_| ConfigError::MissingCredential("SMARTY_AUTH_ID"))?;
        let auth_token = std::env::var("SMARTY_AUTH_TOKEN")
            .map_err(|_| ConfigError::MissingCredential("SMARTY_AUTH_TOKEN"))?;

        Ok(Self {
            base_url: env_url("SMARTY_STREET_API_URL", DEFAULT_STREET_API_URL)?,
            auth_id,
            auth_token: Zeroizing::new(auth_token),
            timeout_secs: std::env::var("SMARTY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_candidates: parse_max_candidates(
                std::env::var("SMARTY_MAX_CANDIDATES").ok().as_deref(),
            ),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str, auth_id: &str, auth_token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("local_mock", base_url)?,
            auth_id: auth_id.to_string(),
            auth_token: Zeroizing::new(auth_token.to_string()),
            timeout_secs: 5,
            max_candidates: 1,
        })
    }

    /// Override the number of candidates requested per address.
    pub fn with_max_candidates(mut self, max_candidates: u8) -> Self {
        self.max_candidates = clamp_candidates(max_candidates);
        self
    }
}

fn clamp_candidates(requested: u8) -> u8 {
    requested.clamp(1, MAX_CANDIDATES_LIMIT)
}

/// Candidate count from its environment form. Unparseable or absent values
/// fall back to 1; out-of-range values are clamped.
fn parse_max_candidates(raw: Option<&str>) -> u8 {
    let requested = raw
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .clamp(1, u32::from(MAX_CANDIDATES_LIMIT));
    u8::try_from(requested).unwrap_or(MAX_CANDIDATES_LIMIT)
}

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingCredential(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("{0} must not be empty")]
    EmptyCredential(&'static str),
}
