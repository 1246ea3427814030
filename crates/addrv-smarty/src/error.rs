//! US Street API error types.

/// Error codes the US Street API signals through HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// 400: required fields missing or malformed input.
    BadInput,
    /// 401: credentials were rejected.
    InvalidCredentials,
    /// 402: no active subscription for the account.
    PaymentRequired,
    /// 413: request body or query too large.
    RequestTooLarge,
    /// 429: rate limit exceeded.
    TooManyRequests,
    /// Any other non-success status.
    Other(u16),
}

impl ApiErrorCode {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadInput,
            401 => Self::InvalidCredentials,
            402 => Self::PaymentRequired,
            413 => Self::RequestTooLarge,
            429 => Self::TooManyRequests,
            other => Self::Other(other),
        }
    }

    /// The HTTP status this code corresponds to.
    pub fn status(self) -> u16 {
        match self {
            Self::BadInput => 400,
            Self::InvalidCredentials => 401,
            Self::PaymentRequired => 402,
            Self::RequestTooLarge => 413,
            Self::TooManyRequests => 429,
            Self::Other(status) => status,
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadInput => write!(f, "bad input"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::PaymentRequired => write!(f, "payment required"),
            Self::RequestTooLarge => write!(f, "request too large"),
            Self::TooManyRequests => write!(f, "too many requests"),
            Self::Other(status) => write!(f, "HTTP {status}"),
        }
    }
}

/// Errors from US Street API calls.
#[derive(Debug, thiserror::Error)]
pub enum StreetApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("US Street API {endpoint} returned {status} ({code}): {body}")]
    Api {
        endpoint: String,
        status: u16,
        code: ApiErrorCode,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
    /// No async runtime was available to drive a blocking call.
    #[error("no async runtime available: {reason}")]
    Runtime { reason: String },
}

impl StreetApiError {
    /// Build an API error from a status and response body.
    pub fn api(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status,
            code: ApiErrorCode::from_status(status),
            body: body.into(),
        }
    }

    /// The API error code, if the service answered with an error status.
    pub fn code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the API rejected the request as malformed or incomplete.
    pub fn is_bad_input(&self) -> bool {
        self.code() == Some(ApiErrorCode::BadInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_round_trips() {
        for status in [400, 401, 402, 413, 429, 500, 503] {
            assert_eq!(ApiErrorCode::from_status(status).status(), status);
        }
        assert_eq!(ApiErrorCode::from_status(400), ApiErrorCode::BadInput);
        assert_eq!(ApiErrorCode::from_status(503), ApiErrorCode::Other(503));
    }

    #[test]
    fn only_400_is_bad_input() {
        assert!(StreetApiError::api("GET /street-address", 400, "").is_bad_input());
        for status in [401, 402, 413, 429, 500] {
            let err = StreetApiError::api("GET /street-address", status, "");
            assert!(!err.is_bad_input(), "status {status} must not be bad input");
        }
        let runtime = StreetApiError::Runtime {
            reason: "none".into(),
        };
        assert!(!runtime.is_bad_input());
        assert!(runtime.code().is_none());
    }

    #[test]
    fn api_error_display_includes_status_code_and_body() {
        let err = StreetApiError::api("GET /street-address", 401, "Unauthorized");
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("invalid credentials"));
        assert!(msg.contains("Unauthorized"));
    }
}
