//! # Verification Policy
//!
//! Decides whether automatic verification is enabled for a given record.
//! Hosts inject the policy when they build an
//! [`AddressValidator`](crate::AddressValidator); there is no global switch.
//!
//! Any `Fn(&Address) -> bool` is a policy, so per-record rules (skip
//! addresses of a wholesale store, skip admin-entered addresses, ...) need
//! no new type.

use addrv_core::Address;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Message attached to a record whose address is not deliverable.
pub const DEFAULT_INVALID_ADDRESS_MESSAGE: &str = "Invalid address";

/// Whether automatic verification applies to a record.
pub trait VerificationPolicy: Send + Sync {
    /// Return `true` to allow verification of `address`.
    fn is_enabled(&self, address: &Address) -> bool;
}

/// Policy that enables verification for every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEnabled;

impl VerificationPolicy for AlwaysEnabled {
    fn is_enabled(&self, _address: &Address) -> bool {
        true
    }
}

/// Policy that disables verification for every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl VerificationPolicy for Disabled {
    fn is_enabled(&self, _address: &Address) -> bool {
        false
    }
}

impl<F> VerificationPolicy for F
where
    F: Fn(&Address) -> bool + Send + Sync,
{
    fn is_enabled(&self, address: &Address) -> bool {
        self(address)
    }
}

/// Deployment settings for automatic verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    /// Master switch.
    pub enabled: bool,
    /// User-facing message for undeliverable addresses.
    pub invalid_address_message: String,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            invalid_address_message: DEFAULT_INVALID_ADDRESS_MESSAGE.to_string(),
        }
    }
}

impl VerificationSettings {
    /// Load settings from environment variables.
    ///
    /// Variables:
    /// - `ADDRV_VERIFICATION_ENABLED` (default: `true`; accepts
    ///   `true/false/1/0/yes/no/on/off`)
    /// - `ADDRV_INVALID_ADDRESS_MESSAGE` (default: `Invalid address`)
    pub fn from_env() -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let enabled = match std::env::var("ADDRV_VERIFICATION_ENABLED") {
            Ok(raw) => parse_flag("ADDRV_VERIFICATION_ENABLED", &raw)?,
            Err(_) => defaults.enabled,
        };
        let invalid_address_message = std::env::var("ADDRV_INVALID_ADDRESS_MESSAGE")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.invalid_address_message);
        Ok(Self {
            enabled,
            invalid_address_message,
        })
    }
}

impl VerificationPolicy for VerificationSettings {
    fn is_enabled(&self, _address: &Address) -> bool {
        self.enabled
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}
