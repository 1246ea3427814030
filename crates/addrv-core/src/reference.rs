//! # Country and State Reference Data
//!
//! Countries and states are reference records owned by the host platform.
//! An address points at them by key; verification only ever needs to
//! (a) decide whether a country is the United States and (b) resolve a
//! state by its postal abbreviation.
//!
//! ## United States Detection
//!
//! Stores rename countries freely ("United States", "United States of
//! America", ...). The ISO short name is stable, so US membership is decided
//! on `iso_name` alone.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StateLookupError;
use crate::identity::{CountryId, StateId};

/// ISO 3166 short name of the only country verification supports.
pub const UNITED_STATES_ISO_NAME: &str = "UNITED STATES";

/// USPS abbreviations and names for the states, the District of Columbia,
/// territories, and armed forces regions.
pub const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("AS", "American Samoa"),
    ("GU", "Guam"),
    ("MP", "Northern Mariana Islands"),
    ("PR", "Puerto Rico"),
    ("VI", "U.S. Virgin Islands"),
    ("UM", "United States Minor Outlying Islands"),
    ("AA", "Armed Forces Americas"),
    ("AE", "Armed Forces Europe"),
    ("AP", "Armed Forces Pacific"),
];

/// A country reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Primary key.
    pub id: CountryId,
    /// ISO 3166-1 alpha-2 code (e.g. "US").
    pub iso: String,
    /// ISO 3166 short name in upper case (e.g. "UNITED STATES").
    pub iso_name: String,
    /// Store-facing display name.
    pub name: String,
}

impl Country {
    /// The United States with the conventional display name.
    pub fn united_states(id: CountryId) -> Self {
        Self {
            id,
            iso: "US".into(),
            iso_name: UNITED_STATES_ISO_NAME.into(),
            name: "United States".into(),
        }
    }

    /// Whether this country is the United States.
    pub fn is_united_states(&self) -> bool {
        self.iso_name == UNITED_STATES_ISO_NAME
    }
}

/// A state/region reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Primary key.
    pub id: StateId,
    /// Country the state belongs to.
    pub country_id: CountryId,
    /// Postal abbreviation (e.g. "CA").
    pub abbr: String,
    /// Full name (e.g. "California").
    pub name: String,
}

/// Read access to state/region reference data.
///
/// Implementations must be `Send + Sync` so a single directory can be
/// shared behind an `Arc` by every validator instance.
pub trait StateDirectory: Send + Sync {
    /// Find the state of `country` whose abbreviation is `abbr`.
    ///
    /// Returns `Ok(None)` when no such state exists. `Err` is reserved for
    /// failures of the store itself.
    fn find_by_abbr(
        &self,
        country: CountryId,
        abbr: &str,
    ) -> Result<Option<State>, StateLookupError>;
}

/// Thread-safe, cloneable in-memory state directory.
///
/// Clones share the same data. Abbreviation matching ignores ASCII case.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateDirectory {
    states: Arc<RwLock<HashMap<StateId, State>>>,
}

impl InMemoryStateDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory seeded with [`US_STATES`] under `country`.
    ///
    /// Keys are assigned sequentially from `first_id`.
    pub fn with_us_states(country: CountryId, first_id: u64) -> Self {
        let directory = Self::new();
        for (offset, (abbr, name)) in (0u64..).zip(US_STATES.iter()) {
            directory.insert(State {
                id: StateId(first_id + offset),
                country_id: country,
                abbr: (*abbr).to_string(),
                name: (*name).to_string(),
            });
        }
        directory
    }

    /// Insert a state, returning the previous record with the same key.
    pub fn insert(&self, state: State) -> Option<State> {
        self.states.write().insert(state.id, state)
    }

    /// Retrieve a state by key.
    pub fn get(&self, id: StateId) -> Option<State> {
        self.states.read().get(&id).cloned()
    }

    /// Number of states held.
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    /// Whether the directory holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

impl StateDirectory for InMemoryStateDirectory {
    fn find_by_abbr(
        &self,
        country: CountryId,
        abbr: &str,
    ) -> Result<Option<State>, StateLookupError> {
        let abbr = abbr.trim();
        if abbr.is_empty() {
            return Ok(None);
        }
        let guard = self.states.read();
        let mut matches: Vec<&State> = guard
            .values()
            .filter(|s| s.country_id == country && s.abbr.eq_ignore_ascii_case(abbr))
            .collect();
        // Lowest key wins when a store carries duplicate abbreviations.
        matches.sort_by_key(|s| s.id);
        Ok(matches.first().map(|s| (*s).clone()))
    }
}
