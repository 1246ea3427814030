//! # Error Types
//!
//! Errors raised by reference data collaborators. Lookups that simply find
//! nothing are not errors; they return `Ok(None)`.

use thiserror::Error;

/// Failure to consult the state/region reference store.
#[derive(Error, Debug)]
pub enum StateLookupError {
    /// The backing store could not be reached or queried.
    #[error("state reference store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the failure.
        reason: String,
    },
}
