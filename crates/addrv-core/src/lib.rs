//! # addrv-core: Foundational Types for Address Verification
//!
//! This crate defines the record that address verification operates on and
//! the reference data it resolves against. It has no knowledge of any
//! verification API; `addrv-smarty` and `addrv-verify` build on top of it.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype foreign keys.** `CountryId` and `StateId` are distinct types,
//!    so a state key can never be compared against a country key.
//!
//! 2. **Change tracking without a framework.** An [`Address`] carries an
//!    optional snapshot of its persisted values. `None` means the record was
//!    never saved. Dirty-field detection is a plain comparison against that
//!    snapshot.
//!
//! 3. **Reference data behind a trait.** State lookups go through
//!    [`StateDirectory`], which the host implements over its own storage.
//!    [`InMemoryStateDirectory`] covers tests and small deployments.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `addrv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod error;
pub mod identity;
pub mod reference;

// Re-export primary types for ergonomic imports.
pub use address::{Address, AddressField, AddressSnapshot, RecordErrors, Validatable};
pub use error::StateLookupError;
pub use identity::{CountryId, StateId};
pub use reference::{
    Country, InMemoryStateDirectory, State, StateDirectory, UNITED_STATES_ISO_NAME, US_STATES,
};
