//! # Address Record
//!
//! The address record as the host platform persists it, plus the change
//! tracking verification needs to decide whether a record must be
//! re-verified before it is saved.
//!
//! ## Lifecycle
//!
//! The host owns creation, loading, and persistence. It calls
//! [`Address::mark_persisted`] after every load or successful save; that
//! captures an [`AddressSnapshot`]. Until then the record is "new".
//! Verification only reads the snapshot and mutates the live fields during
//! the pre-save validation pass.

use serde::{Deserialize, Serialize};

use crate::identity::{CountryId, StateId};
use crate::reference::{Country, State};

/// Fields whose changes force a new verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressField {
    /// Street line 1.
    Address1,
    /// Street line 2.
    Address2,
    /// City.
    City,
    /// Postal code.
    Zipcode,
    /// Company / addressee.
    Company,
    /// Free-text state name (used when no state reference is set).
    StateName,
    /// State reference key.
    State,
    /// Country reference key.
    Country,
}

impl AddressField {
    /// All tracked fields, in declaration order.
    pub const ALL: [AddressField; 8] = [
        Self::Address1,
        Self::Address2,
        Self::City,
        Self::Zipcode,
        Self::Company,
        Self::StateName,
        Self::State,
        Self::Country,
    ];

    /// Attribute name as the host platform spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Address1 => "address1",
            Self::Address2 => "address2",
            Self::City => "city",
            Self::Zipcode => "zipcode",
            Self::Company => "company",
            Self::StateName => "state_name",
            Self::State => "state_id",
            Self::Country => "country_id",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted values of the tracked fields, captured at load/save time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zipcode: String,
    pub company: String,
    pub state_name: String,
    pub state_id: Option<StateId>,
    pub country_id: Option<CountryId>,
}

/// Record-level validation errors.
///
/// Mirrors the host's error collection: a record with any error is refused
/// by the save operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordErrors {
    base: Vec<String>,
}

impl RecordErrors {
    /// Attach an error to the record as a whole.
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base.push(message.into());
    }

    /// Errors attached to the record as a whole.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Whether no error has been recorded.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Drop every recorded error.
    pub fn clear(&mut self) {
        self.base.clear();
    }
}

/// A record that accumulates validation errors.
pub trait Validatable {
    /// Errors recorded by the current validation pass.
    fn errors(&self) -> &RecordErrors;

    /// Mutable access for validators.
    fn errors_mut(&mut self) -> &mut RecordErrors;
}

/// A postal address record.
///
/// Blank strings stand for absent values. `validated` is `true` only while
/// the fields hold the normalized form returned by the last successful
/// verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zipcode: String,
    pub company: String,
    pub state_name: String,
    pub state: Option<State>,
    pub country: Option<Country>,
    pub validated: bool,
    #[serde(skip)]
    persisted: Option<AddressSnapshot>,
    #[serde(skip)]
    errors: RecordErrors,
}

impl Address {
    /// Create a new, never-persisted, empty address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new address in `country`.
    pub fn in_country(country: Country) -> Self {
        Self {
            country: Some(country),
            ..Self::default()
        }
    }

    /// Whether the record has never been persisted.
    pub fn is_new_record(&self) -> bool {
        self.persisted.is_none()
    }

    /// Persisted values, if the record has been loaded or saved.
    pub fn persisted(&self) -> Option<&AddressSnapshot> {
        self.persisted.as_ref()
    }

    /// Record the current values as persisted. Called by the host after a
    /// load or a successful save.
    pub fn mark_persisted(&mut self) {
        self.persisted = Some(self.snapshot());
    }

    /// Current values of the tracked fields.
    pub fn snapshot(&self) -> AddressSnapshot {
        AddressSnapshot {
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            city: self.city.clone(),
            zipcode: self.zipcode.clone(),
            company: self.company.clone(),
            state_name: self.state_name.clone(),
            state_id: self.state_id(),
            country_id: self.country_id(),
        }
    }

    /// Key of the referenced state.
    pub fn state_id(&self) -> Option<StateId> {
        self.state.as_ref().map(|s| s.id)
    }

    /// Key of the referenced country.
    pub fn country_id(&self) -> Option<CountryId> {
        self.country.as_ref().map(|c| c.id)
    }

    /// Tracked fields whose value differs from the persisted one.
    ///
    /// For a new record every field holding a non-blank value (or a set
    /// reference) counts as changed.
    pub fn changed_fields(&self) -> Vec<AddressField> {
        let baseline = self.persisted.clone().unwrap_or_default();
        let current = self.snapshot();
        AddressField::ALL
            .into_iter()
            .filter(|field| match field {
                AddressField::Address1 => current.address1 != baseline.address1,
                AddressField::Address2 => current.address2 != baseline.address2,
                AddressField::City => current.city != baseline.city,
                AddressField::Zipcode => current.zipcode != baseline.zipcode,
                AddressField::Company => current.company != baseline.company,
                AddressField::StateName => current.state_name != baseline.state_name,
                AddressField::State => current.state_id != baseline.state_id,
                AddressField::Country => current.country_id != baseline.country_id,
            })
            .collect()
    }

    /// Whether a specific tracked field changed since the last load.
    pub fn field_changed(&self, field: AddressField) -> bool {
        self.changed_fields().contains(&field)
    }

    /// Whether the address is in the United States.
    pub fn in_united_states(&self) -> bool {
        self.country.as_ref().is_some_and(Country::is_united_states)
    }

    /// Text describing the state: the referenced state's abbreviation,
    /// falling back to its name, then to the free-text `state_name`.
    pub fn state_text(&self) -> &str {
        match &self.state {
            Some(state) if !state.abbr.trim().is_empty() => &state.abbr,
            Some(state) if !state.name.trim().is_empty() => &state.name,
            _ => &self.state_name,
        }
    }
}

impl Validatable for Address {
    fn errors(&self) -> &RecordErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut RecordErrors {
        &mut self.errors
    }
}
