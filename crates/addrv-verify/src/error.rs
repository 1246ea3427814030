//! # Error Types: Verification Failure Taxonomy
//!
//! Verification distinguishes three kinds of failure:
//!
//! - **Unsupported region**: verification was asked for a non-US address.
//!   A programming or configuration error; always returned as `Err`.
//! - **Malformed input**: the API refused the address as incomplete. An
//!   expected user error; reported as
//!   [`Deliverability::NotDeliverable`](crate::Deliverability), never `Err`.
//! - **Operational failure**: credentials, quota, service availability or
//!   the reference store. Always returned as `Err` so operators hear about it.

use addrv_core::StateLookupError;
use addrv_smarty::StreetApiError;
use thiserror::Error;

/// Errors that abort a verification attempt.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Verification only supports United States addresses.
    #[error("cannot validate internationally: address country is {country}")]
    UnsupportedRegion {
        /// ISO name of the offending country, or "none".
        country: String,
    },

    /// The verification API failed for a reason other than bad input.
    #[error("address verification service failure: {0}")]
    Operational(#[from] StreetApiError),

    /// The state reference store could not be consulted.
    #[error("state lookup failed: {0}")]
    StateLookup(#[from] StateLookupError),
}

impl VerificationError {
    /// Whether the failure is operational (service or store), as opposed to
    /// a misuse of the verifier.
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Operational(_) | Self::StateLookup(_))
    }
}

/// Errors loading [`VerificationSettings`](crate::VerificationSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A boolean environment variable held an unrecognized value.
    #[error("invalid boolean for {var}: {value:?}")]
    InvalidFlag {
        /// Variable name.
        var: String,
        /// Value found.
        value: String,
    },
}
