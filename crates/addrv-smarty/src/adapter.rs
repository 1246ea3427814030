//! # Street Address Adapter Interface
//!
//! Defines the synchronous seam that address verification depends on.
//! Record validation runs inside the host's blocking save path, so the
//! trait is blocking; the HTTP implementation drives [`SmartyClient`] on a
//! Tokio runtime.
//!
//! ## Implementations
//!
//! - [`HttpStreetAddressApi`]: live API. Built with [`HttpStreetAddressApi::new`]
//!   it borrows the ambient runtime (`Handle::try_current`) and must be
//!   called from a blocking context such as `spawn_blocking`. Built with
//!   [`HttpStreetAddressApi::with_runtime`] it owns a current-thread runtime
//!   and can be called from plain threads.
//! - [`MockStreetAddressApi`]: canned responses for tests and development.
//!   Records every request it receives.

use parking_lot::Mutex;

use crate::client::SmartyClient;
use crate::config::SmartyConfig;
use crate::error::StreetApiError;
use crate::street::{Candidate, StreetAddressRequest};

/// Adapter trait for US street address verification.
///
/// Implementations must be `Send + Sync` so they can be shared behind an
/// `Arc`. The trait is object-safe to support runtime adapter selection
/// (mock vs. live).
pub trait StreetAddressApi: Send + Sync {
    /// Verify one address, returning the normalized candidates in API order.
    fn verify(&self, request: &StreetAddressRequest) -> Result<Vec<Candidate>, StreetApiError>;

    /// Return the human-readable name of this adapter implementation.
    fn adapter_name(&self) -> &str;
}

// ─── Live HTTP adapter ──────────────────────────────────────────────────

/// Blocking adapter over the live US Street API.
#[derive(Debug)]
pub struct HttpStreetAddressApi {
    client: SmartyClient,
    runtime: Option<tokio::runtime::Runtime>,
}

impl HttpStreetAddressApi {
    /// Create an adapter that runs on the caller's Tokio runtime.
    ///
    /// # Panics
    ///
    /// [`StreetAddressApi::verify`] on this adapter panics when called
    /// directly on a runtime worker thread, since it blocks on the ambient
    /// handle. Call it from `spawn_blocking` or another blocking context.
    /// Outside any runtime it returns [`StreetApiError::Runtime`] instead.
    pub fn new(config: SmartyConfig) -> Result<Self, StreetApiError> {
        Ok(Self {
            client: SmartyClient::new(config)?,
            runtime: None,
        })
    }

    /// Create an adapter that owns a dedicated current-thread runtime.
    ///
    /// Calling [`StreetAddressApi::verify`] on it from inside an async task
    /// panics; use it from threads that are not driving a runtime.
    pub fn with_runtime(config: SmartyConfig) -> Result<Self, StreetApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StreetApiError::Runtime {
                reason: format!("failed to build runtime: {e}"),
            })?;
        Ok(Self {
            client: SmartyClient::new(config)?,
            runtime: Some(runtime),
        })
    }

    /// Access the underlying async client.
    pub fn client(&self) -> &SmartyClient {
        &self.client
    }
}

impl StreetAddressApi for HttpStreetAddressApi {
    fn verify(&self, request: &StreetAddressRequest) -> Result<Vec<Candidate>, StreetApiError> {
        let call = self.client.street_address(request);
        match &self.runtime {
            Some(runtime) => runtime.block_on(call),
            None => {
                let handle = tokio::runtime::Handle::try_current().map_err(|_| {
                    StreetApiError::Runtime {
                        reason: "no async runtime available for HTTP request".into(),
                    }
                })?;
                handle.block_on(call)
            }
        }
    }

    fn adapter_name(&self) -> &str {
        "HttpStreetAddressApi"
    }
}

// ─── Mock adapter ───────────────────────────────────────────────────────

/// Canned outcome returned by [`MockStreetAddressApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Answer with these candidates (possibly none).
    Candidates(Vec<Candidate>),
    /// Answer with an API error status.
    Error {
        /// HTTP status to report.
        status: u16,
        /// Response body to report.
        body: String,
    },
}

/// Mock street address adapter for testing and development.
///
/// Returns the same response for every request and keeps a log of the
/// requests it served.
#[derive(Debug)]
pub struct MockStreetAddressApi {
    response: MockResponse,
    requests: Mutex<Vec<StreetAddressRequest>>,
}

impl MockStreetAddressApi {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that returns `candidates` for every request.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self::new(MockResponse::Candidates(candidates))
    }

    /// Mock that finds no match for any request.
    pub fn no_match() -> Self {
        Self::with_candidates(Vec::new())
    }

    /// Mock that fails every request with the given API status.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockResponse::Error {
            status,
            body: body.into(),
        })
    }

    /// Requests served so far, oldest first.
    pub fn requests(&self) -> Vec<StreetAddressRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl StreetAddressApi for MockStreetAddressApi {
    fn verify(&self, request: &StreetAddressRequest) -> Result<Vec<Candidate>, StreetApiError> {
        self.requests.lock().push(request.clone());
        match &self.response {
            MockResponse::Candidates(candidates) => Ok(candidates.clone()),
            MockResponse::Error { status, body } => {
                Err(StreetApiError::api("mock /street-address", *status, body.clone()))
            }
        }
    }

    fn adapter_name(&self) -> &str {
        "MockStreetAddressApi"
    }
}
