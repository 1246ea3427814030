//! # addrv-verify -- Automatic US Address Verification
//!
//! Verifies address records against the US Street API before they are
//! saved, and rewrites verified records into their normalized form.
//!
//! ## Flow
//!
//! 1. [`should_auto_validate`] decides whether this save needs verification
//!    (US only, policy enabled, tracked fields changed or never validated).
//! 2. [`StreetDeliverabilityChecker`] asks the API about the address and, on
//!    a match, overwrites the record's fields from the first candidate.
//! 3. [`AddressValidator`] stores the result in `validated` and attaches the
//!    "invalid address" error to records that are not deliverable.
//!
//! Hosts wire the validator into a [`ValidationChain`] and refuse to persist
//! any record for which [`ValidationChain::run`] returns `Ok(false)`.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use addrv_core::{CountryId, InMemoryStateDirectory};
//! use addrv_smarty::{HttpStreetAddressApi, SmartyConfig};
//! use addrv_verify::{AddressValidator, ValidationChain, VerificationSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpStreetAddressApi::with_runtime(SmartyConfig::from_env()?)?;
//! let states = InMemoryStateDirectory::with_us_states(CountryId(232), 1);
//! let validator = AddressValidator::from_settings(
//!     Arc::new(api),
//!     Arc::new(states),
//!     VerificationSettings::from_env()?,
//! );
//!
//! let mut chain = ValidationChain::new();
//! chain.register(validator);
//! # Ok(())
//! # }
//! ```

pub mod deliverability;
pub mod eligibility;
pub mod error;
pub mod hook;
pub mod normalize;
pub mod policy;

pub use deliverability::{
    street_request, Deliverability, DeliverabilityCheck, NotDeliverableReason,
    StreetDeliverabilityChecker,
};
pub use eligibility::{should_auto_validate, validation_fields_changed};
pub use error::{SettingsError, VerificationError};
pub use hook::{AddressValidator, RecordValidator, ValidationChain, ValidationOutcome};
pub use normalize::{combine, NormalizedAddress};
pub use policy::{
    AlwaysEnabled, Disabled, VerificationPolicy, VerificationSettings,
    DEFAULT_INVALID_ADDRESS_MESSAGE,
};
