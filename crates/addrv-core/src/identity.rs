//! # Reference Identifiers
//!
//! Newtype wrappers for the foreign keys an address holds. Keeping them
//! distinct prevents comparing a state key against a country key.

use serde::{Deserialize, Serialize};

/// Primary key of a country reference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryId(pub u64);

/// Primary key of a state/region reference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub u64);

impl CountryId {
    /// Access the raw key.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl StateId {
    /// Access the raw key.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "country:{}", self.0)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "state:{}", self.0)
    }
}
