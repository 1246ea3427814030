//! # Candidate Normalization
//!
//! Turns the decomposed components of an API candidate back into the flat
//! fields an address record stores. Blank components are dropped before
//! joining, so no result ever carries a leading, trailing, or doubled
//! separator.

use addrv_smarty::{Candidate, Components};

/// Join the non-blank `parts` with `sep`.
pub fn combine<'a, I>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Street line 1: number, pre-direction, name, suffix, post-direction.
pub fn street_line1(components: &Components) -> String {
    combine(
        [
            components.primary_number.as_deref(),
            components.street_predirection.as_deref(),
            components.street_name.as_deref(),
            components.street_suffix.as_deref(),
            components.street_postdirection.as_deref(),
        ],
        " ",
    )
}

/// Street line 2: secondary designator and number (e.g. "Apt 4").
pub fn street_line2(components: &Components) -> String {
    combine(
        [
            components.secondary_designator.as_deref(),
            components.secondary_number.as_deref(),
        ],
        " ",
    )
}

/// ZIP+4 postal code (e.g. "90210-1234"), or the bare ZIP when plus4 is absent.
pub fn full_zipcode(components: &Components) -> String {
    combine(
        [components.zipcode.as_deref(), components.plus4_code.as_deref()],
        "-",
    )
}

/// Flat field values derived from one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state_abbreviation: String,
    pub zipcode: String,
}

impl NormalizedAddress {
    /// Derive the flat fields of `candidate`.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let components = &candidate.components;
        Self {
            company: candidate.addressee.clone().unwrap_or_default(),
            address1: street_line1(components),
            address2: street_line2(components),
            city: components.city_name.clone().unwrap_or_default(),
            state_abbreviation: components.state_abbreviation.clone().unwrap_or_default(),
            zipcode: full_zipcode(components),
        }
    }
}
