//! # Deliverability Check
//!
//! Sends an address to the street address API and, when the API confirms
//! it, rewrites the record's fields with the first candidate's normalized
//! form.
//!
//! ## Outcomes
//!
//! | API answer | Result | Record |
//! |------------|--------|--------|
//! | non-US country (no call made) | `Err(UnsupportedRegion)` | untouched |
//! | empty list | `Ok(NotDeliverable(NoCandidates))` | untouched |
//! | one or more candidates | `Ok(Deliverable)` | normalized from the first |
//! | bad input (400) | `Ok(NotDeliverable(MalformedInput))` | untouched |
//! | any other failure | `Err(Operational)` | untouched |
//!
//! The state lookup happens before any field is written, so a failing
//! reference store also leaves the record untouched.

use std::sync::Arc;

use addrv_core::{Address, StateDirectory};
use addrv_smarty::{StreetAddressApi, StreetAddressRequest};

use crate::error::VerificationError;
use crate::normalize::NormalizedAddress;

/// Why an address was judged not deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotDeliverableReason {
    /// The API found no matching delivery point.
    NoCandidates,
    /// The API rejected the address as incomplete or malformed.
    MalformedInput {
        /// Response body returned with the rejection.
        message: String,
    },
}

/// Result of a completed deliverability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverability {
    /// The address is deliverable and the record now holds its normalized form.
    Deliverable,
    /// The address is not deliverable; the record was not modified.
    NotDeliverable(NotDeliverableReason),
}

impl Deliverability {
    /// Whether the address is deliverable.
    pub fn is_deliverable(&self) -> bool {
        matches!(self, Self::Deliverable)
    }
}

/// Capability to check, and normalize, a record's address.
///
/// Object-safe so validators can hold an `Arc<dyn DeliverabilityCheck>`.
pub trait DeliverabilityCheck: Send + Sync {
    /// Check `address`, normalizing its fields in place when deliverable.
    fn check_deliverability(
        &self,
        address: &mut Address,
    ) -> Result<Deliverability, VerificationError>;
}

/// Build the API request for `address`.
pub fn street_request(address: &Address) -> StreetAddressRequest {
    StreetAddressRequest {
        street: address.address1.clone(),
        street2: address.address2.clone(),
        city: address.city.clone(),
        state: address.state_text().to_string(),
        zipcode: address.zipcode.clone(),
        addressee: address.company.clone(),
    }
}

/// Deliverability check backed by a street address API and a state directory.
#[derive(Clone)]
pub struct StreetDeliverabilityChecker {
    api: Arc<dyn StreetAddressApi>,
    states: Arc<dyn StateDirectory>,
}

impl std::fmt::Debug for StreetDeliverabilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreetDeliverabilityChecker")
            .field("api", &self.api.adapter_name())
            .finish_non_exhaustive()
    }
}

impl StreetDeliverabilityChecker {
    /// Create a checker.
    pub fn new(api: Arc<dyn StreetAddressApi>, states: Arc<dyn StateDirectory>) -> Self {
        Self { api, states }
    }
}

impl DeliverabilityCheck for StreetDeliverabilityChecker {
    fn check_deliverability(
        &self,
        address: &mut Address,
    ) -> Result<Deliverability, VerificationError> {
        let country = match &address.country {
            Some(country) if country.is_united_states() => country.clone(),
            other => {
                return Err(VerificationError::UnsupportedRegion {
                    country: other
                        .as_ref()
                        .map_or_else(|| "none".to_string(), |c| c.iso_name.clone()),
                })
            }
        };

        let request = street_request(address);
        let candidates = match self.api.verify(&request) {
            Ok(candidates) => candidates,
            Err(e) if e.is_bad_input() => {
                tracing::warn!(
                    adapter = self.api.adapter_name(),
                    "address rejected as malformed input; treating as not deliverable"
                );
                let message = match e {
                    addrv_smarty::StreetApiError::Api { body, .. } => body,
                    other => other.to_string(),
                };
                return Ok(Deliverability::NotDeliverable(
                    NotDeliverableReason::MalformedInput { message },
                ));
            }
            Err(e) => return Err(VerificationError::Operational(e)),
        };

        let Some(candidate) = candidates.first() else {
            tracing::debug!(adapter = self.api.adapter_name(), "no candidates returned");
            return Ok(Deliverability::NotDeliverable(NotDeliverableReason::NoCandidates));
        };
        if candidates.len() > 1 {
            tracing::debug!(
                candidates = candidates.len(),
                "multiple candidates returned; using the first"
            );
        }

        let normalized = NormalizedAddress::from_candidate(candidate);
        let state = self
            .states
            .find_by_abbr(country.id, &normalized.state_abbreviation)?;
        if state.is_none() {
            tracing::warn!(
                state_abbreviation = %normalized.state_abbreviation,
                country = %country.id,
                "verified state abbreviation not found in reference data"
            );
        }

        address.company = normalized.company;
        address.address1 = normalized.address1;
        address.address2 = normalized.address2;
        address.city = normalized.city;
        address.state = state;
        address.zipcode = normalized.zipcode;

        tracing::info!(
            city = %address.city,
            zipcode = %address.zipcode,
            "address verified and normalized"
        );
        Ok(Deliverability::Deliverable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrv_core::{Country, CountryId, InMemoryStateDirectory, StateLookupError};
    use addrv_smarty::{ApiErrorCode, Candidate, Components, MockStreetAddressApi};

    const US: CountryId = CountryId(232);

    fn directory() -> Arc<InMemoryStateDirectory> {
        Arc::new(InMemoryStateDirectory::with_us_states(US, 1))
    }

    fn address() -> Address {
        let mut address = Address::in_country(Country::united_states(US));
        address.address1 = "123 Main".into();
        address.city = "Anytown".into();
        address.zipcode = "90210".into();
        address.state = directory().find_by_abbr(US, "CA").expect("lookup");
        address
    }

    fn main_street_candidate() -> Candidate {
        Candidate {
            components: Components {
                primary_number: Some("123".into()),
                street_name: Some("Main".into()),
                street_suffix: Some("St".into()),
                city_name: Some("Anytown".into()),
                state_abbreviation: Some("CA".into()),
                zipcode: Some("90210".into()),
                plus4_code: Some("1234".into()),
                ..Components::default()
            },
            ..Candidate::default()
        }
    }

    fn checker(api: Arc<MockStreetAddressApi>) -> StreetDeliverabilityChecker {
        StreetDeliverabilityChecker::new(api, directory())
    }

    struct BrokenDirectory;

    impl StateDirectory for BrokenDirectory {
        fn find_by_abbr(
            &self,
            _country: CountryId,
            _abbr: &str,
        ) -> Result<Option<addrv_core::State>, StateLookupError> {
            Err(StateLookupError::Unavailable {
                reason: "db down".into(),
            })
        }
    }

    #[test]
    fn request_uses_state_text_and_company() {
        let mut a = address();
        a.company = "Acme".into();
        a.address2 = "Suite 5".into();
        let req = street_request(&a);
        assert_eq!(req.street, "123 Main");
        assert_eq!(req.street2, "Suite 5");
        assert_eq!(req.state, "CA");
        assert_eq!(req.addressee, "Acme");
    }

    #[test]
    fn non_us_address_is_unsupported_and_api_not_called() {
        let api = Arc::new(MockStreetAddressApi::no_match());
        let mut a = address();
        a.country = Some(Country {
            id: CountryId(35),
            iso: "CA".into(),
            iso_name: "CANADA".into(),
            name: "Canada".into(),
        });
        let err = checker(api.clone()).check_deliverability(&mut a).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::UnsupportedRegion { ref country } if country == "CANADA"
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn missing_country_is_unsupported() {
        let api = Arc::new(MockStreetAddressApi::no_match());
        let mut a = address();
        a.country = None;
        let err = checker(api.clone()).check_deliverability(&mut a).unwrap_err();
        assert!(matches!(err, VerificationError::UnsupportedRegion { ref country } if country == "none"));
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn empty_candidate_list_is_not_deliverable_and_leaves_fields() {
        let api = Arc::new(MockStreetAddressApi::no_match());
        let mut a = address();
        let before = a.clone();
        let result = checker(api.clone()).check_deliverability(&mut a).expect("check");
        assert_eq!(
            result,
            Deliverability::NotDeliverable(NotDeliverableReason::NoCandidates)
        );
        assert!(!result.is_deliverable());
        assert_eq!(a, before);
        assert_eq!(api.call_count(), 1);
    }

    #[test]
    fn single_candidate_normalizes_every_field_group() {
        let api = Arc::new(MockStreetAddressApi::with_candidates(vec![main_street_candidate()]));
        let mut a = address();
        a.address2 = "Apt 9".into();
        a.company = "Old Co".into();

        let result = checker(api).check_deliverability(&mut a).expect("check");
        assert!(result.is_deliverable());
        assert_eq!(a.address1, "123 Main St");
        assert_eq!(a.address2, "");
        assert_eq!(a.city, "Anytown");
        assert_eq!(a.state.as_ref().map(|s| s.abbr.as_str()), Some("CA"));
        assert_eq!(a.zipcode, "90210-1234");
        assert_eq!(a.company, "");
    }

    #[test]
    fn first_of_several_candidates_is_authoritative() {
        let mut second = main_street_candidate();
        second.components.street_suffix = Some("Ave".into());
        second.components.city_name = Some("Elsewhere".into());
        let api = Arc::new(MockStreetAddressApi::with_candidates(vec![
            main_street_candidate(),
            second,
        ]));
        let mut a = address();
        checker(api).check_deliverability(&mut a).expect("check");
        assert_eq!(a.address1, "123 Main St");
        assert_eq!(a.city, "Anytown");
    }

    #[test]
    fn candidate_state_is_resolved_by_abbreviation() {
        let mut candidate = main_street_candidate();
        candidate.components.state_abbreviation = Some("NV".into());
        let api = Arc::new(MockStreetAddressApi::with_candidates(vec![candidate]));
        let mut a = address();
        checker(api).check_deliverability(&mut a).expect("check");
        let state = a.state.expect("state resolved");
        assert_eq!(state.name, "Nevada");
        assert_eq!(state.country_id, US);
    }

    #[test]
    fn unknown_state_abbreviation_clears_state() {
        let mut candidate = main_street_candidate();
        candidate.components.state_abbreviation = Some("ZZ".into());
        let api = Arc::new(MockStreetAddressApi::with_candidates(vec![candidate]));
        let mut a = address();
        let result = checker(api).check_deliverability(&mut a).expect("check");
        assert!(result.is_deliverable());
        assert!(a.state.is_none());
    }

    #[test]
    fn bad_input_is_not_deliverable_without_error() {
        let api = Arc::new(MockStreetAddressApi::failing(400, "missing street"));
        let mut a = address();
        let before = a.clone();
        let result = checker(api).check_deliverability(&mut a).expect("recovered");
        assert_eq!(
            result,
            Deliverability::NotDeliverable(NotDeliverableReason::MalformedInput {
                message: "missing street".into()
            })
        );
        assert_eq!(a, before);
    }

    #[test]
    fn other_api_errors_propagate_unchanged() {
        for status in [401, 402, 413, 429, 500, 503] {
            let api = Arc::new(MockStreetAddressApi::failing(status, "nope"));
            let mut a = address();
            let before = a.clone();
            let err = checker(api).check_deliverability(&mut a).unwrap_err();
            match err {
                VerificationError::Operational(inner) => {
                    assert_eq!(inner.code(), Some(ApiErrorCode::from_status(status)));
                }
                other => panic!("expected Operational, got: {other:?}"),
            }
            assert_eq!(a, before);
        }
    }

    #[test]
    fn state_store_failure_propagates_and_leaves_fields() {
        let api = Arc::new(MockStreetAddressApi::with_candidates(vec![main_street_candidate()]));
        let checker = StreetDeliverabilityChecker::new(api, Arc::new(BrokenDirectory));
        let mut a = address();
        let before = a.clone();
        let err = checker.check_deliverability(&mut a).unwrap_err();
        assert!(matches!(err, VerificationError::StateLookup(_)));
        assert_eq!(a, before);
    }
}
