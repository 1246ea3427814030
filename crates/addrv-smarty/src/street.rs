//! Request and response types for the US Street Address API.
//!
//! Only the fields verification reads are modelled; unknown response
//! fields (metadata, analysis, ...) are ignored on deserialization.

use serde::{Deserialize, Serialize};

// -- Request ------------------------------------------------------------------

/// One free-text address to verify.
///
/// Empty fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAddressRequest {
    pub street: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub addressee: String,
}

impl StreetAddressRequest {
    /// Query parameters for the non-empty fields, in API spelling.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("street", self.street.as_str()),
            ("street2", self.street2.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zipcode", self.zipcode.as_str()),
            ("addressee", self.addressee.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

// -- Response -----------------------------------------------------------------

/// A normalized address candidate returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub input_index: u32,
    pub candidate_index: u32,
    pub addressee: Option<String>,
    pub delivery_line_1: Option<String>,
    pub delivery_line_2: Option<String>,
    pub last_line: Option<String>,
    pub delivery_point_barcode: Option<String>,
    pub components: Components,
}

/// Decomposed parts of a candidate address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    pub urbanization: Option<String>,
    pub primary_number: Option<String>,
    pub street_name: Option<String>,
    pub street_predirection: Option<String>,
    pub street_postdirection: Option<String>,
    pub street_suffix: Option<String>,
    pub secondary_number: Option<String>,
    pub secondary_designator: Option<String>,
    pub extra_secondary_number: Option<String>,
    pub extra_secondary_designator: Option<String>,
    pub pmb_designator: Option<String>,
    pub pmb_number: Option<String>,
    pub city_name: Option<String>,
    pub default_city_name: Option<String>,
    pub state_abbreviation: Option<String>,
    pub zipcode: Option<String>,
    pub plus4_code: Option<String>,
    pub delivery_point: Option<String>,
    pub delivery_point_check_digit: Option<String>,
}
