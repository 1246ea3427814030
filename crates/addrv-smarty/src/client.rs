//! Typed async client for the US Street Address API.
//!
//! Base URL: `us-street.api.smarty.com`
//!
//! Credentials travel as `auth-id`/`auth-token` query parameters, so request
//! URLs are never logged. No retries are attempted: a failed call surfaces
//! immediately and the caller decides what it means.

use std::time::Duration;

use zeroize::Zeroizing;

use crate::config::{ConfigError, SmartyConfig};
use crate::error::StreetApiError;
use crate::street::{Candidate, StreetAddressRequest};

const STREET_ADDRESS_ENDPOINT: &str = "GET /street-address";

/// Client for the US Street Address API.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone)]
pub struct SmartyClient {
    http: reqwest::Client,
    endpoint_url: String,
    auth_id: String,
    auth_token: Zeroizing<String>,
    max_candidates: u8,
}

impl std::fmt::Debug for SmartyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartyClient")
            .field("endpoint_url", &self.endpoint_url)
            .field("auth_id", &self.auth_id)
            .field("auth_token", &"[REDACTED]")
            .field("max_candidates", &self.max_candidates)
            .finish()
    }
}

impl SmartyClient {
    /// Create a new client from configuration.
    pub fn new(config: SmartyConfig) -> Result<Self, StreetApiError> {
        if config.auth_id.trim().is_empty() {
            return Err(ConfigError::EmptyCredential("auth_id").into());
        }
        if config.auth_token.trim().is_empty() {
            return Err(ConfigError::EmptyCredential("auth_token").into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StreetApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let endpoint_url = format!(
            "{}/street-address",
            config.base_url.as_str().trim_end_matches('/')
        );

        Ok(Self {
            http,
            endpoint_url,
            auth_id: config.auth_id,
            auth_token: config.auth_token,
            max_candidates: config.max_candidates,
        })
    }

    /// Verify one address.
    ///
    /// Calls `GET {base_url}/street-address`. An empty list means the API
    /// found no deliverable match.
    pub async fn street_address(
        &self,
        req: &StreetAddressRequest,
    ) -> Result<Vec<Candidate>, StreetApiError> {
        let candidates = self.max_candidates.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("auth-id", self.auth_id.as_str()),
            ("auth-token", self.auth_token.as_str()),
            ("candidates", candidates.as_str()),
        ];
        query.extend(req.query_pairs());

        tracing::debug!(
            endpoint = STREET_ADDRESS_ENDPOINT,
            city = %req.city,
            state = %req.state,
            zipcode = %req.zipcode,
            "requesting US street address verification"
        );

        let resp = self
            .http
            .get(&self.endpoint_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| StreetApiError::Http {
                endpoint: STREET_ADDRESS_ENDPOINT.into(),
                // The URL carries credentials.
                source: e.without_url(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(endpoint = STREET_ADDRESS_ENDPOINT, status, "US Street API error");
            return Err(StreetApiError::api(STREET_ADDRESS_ENDPOINT, status, body));
        }

        let candidates: Vec<Candidate> =
            resp.json().await.map_err(|e| StreetApiError::Deserialization {
                endpoint: STREET_ADDRESS_ENDPOINT.into(),
                source: e.without_url(),
            })?;

        tracing::debug!(
            endpoint = STREET_ADDRESS_ENDPOINT,
            candidates = candidates.len(),
            "US Street API responded"
        );
        Ok(candidates)
    }
}
