//! # Eligibility
//!
//! Decides whether a record must be verified before it is persisted.
//! Pure functions of record state plus the injected policy decision.

use addrv_core::Address;

use crate::policy::VerificationPolicy;

/// Whether automatic verification should run for `address` on this save.
///
/// - never for addresses outside the United States;
/// - never when `policy` disables verification for the record;
/// - always when a tracked field or foreign key changed since the last load;
/// - otherwise only when the record has not been validated yet.
pub fn should_auto_validate(address: &Address, policy: &dyn VerificationPolicy) -> bool {
    if !address.in_united_states() {
        return false;
    }
    if !policy.is_enabled(address) {
        return false;
    }
    if validation_fields_changed(address) {
        return true;
    }
    !address.validated
}

/// Whether any field that feeds verification changed since the last load.
///
/// A new record counts as changed, except when it already claims to be
/// validated: such a record was normalized before it was first saved and is
/// left alone.
pub fn validation_fields_changed(address: &Address) -> bool {
    if address.is_new_record() {
        return !address.validated;
    }
    !address.changed_fields().is_empty()
}
