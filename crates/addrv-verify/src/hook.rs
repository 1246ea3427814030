//! # Validation Hook
//!
//! The single integration point with the host's save lifecycle. The host
//! registers an [`AddressValidator`] in a [`ValidationChain`] and runs the
//! chain before persisting a record; a record that leaves the chain with
//! errors is not saved.

use std::sync::Arc;

use addrv_core::{Address, StateDirectory, Validatable};
use addrv_smarty::StreetAddressApi;

use crate::deliverability::{DeliverabilityCheck, StreetDeliverabilityChecker};
use crate::eligibility::should_auto_validate;
use crate::error::VerificationError;
use crate::policy::{VerificationPolicy, VerificationSettings, DEFAULT_INVALID_ADDRESS_MESSAGE};

/// A validator run against a record before it is persisted.
///
/// Validators record user-facing problems on the record itself and reserve
/// `Err` for failures that must abort the save and reach operators.
pub trait RecordValidator<R>: Send + Sync {
    /// Validate `record`, attaching errors to it as needed.
    fn validate(&self, record: &mut R) -> Result<(), VerificationError>;
}

impl<R, F> RecordValidator<R> for F
where
    F: Fn(&mut R) -> Result<(), VerificationError> + Send + Sync,
{
    fn validate(&self, record: &mut R) -> Result<(), VerificationError> {
        self(record)
    }
}

/// Ordered set of validators the host runs before persisting a record.
pub struct ValidationChain<R> {
    validators: Vec<Box<dyn RecordValidator<R>>>,
}

impl<R> Default for ValidationChain<R> {
    fn default() -> Self {
        Self {
            validators: Vec::new(),
        }
    }
}

impl<R> std::fmt::Debug for ValidationChain<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationChain")
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<R: Validatable> ValidationChain<R> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator; validators run in registration order.
    pub fn register(&mut self, validator: impl RecordValidator<R> + 'static) -> &mut Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Clear the record's errors and run every validator.
    ///
    /// Returns `Ok(true)` when the record may be saved. The first `Err`
    /// stops the chain.
    pub fn run(&self, record: &mut R) -> Result<bool, VerificationError> {
        record.errors_mut().clear();
        for validator in &self.validators {
            validator.validate(record)?;
        }
        Ok(record.errors().is_empty())
    }
}

/// What the validation hook did to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Verification did not apply to this save.
    Skipped,
    /// The address was verified and normalized.
    Validated,
    /// The address is not deliverable; an error was attached to the record.
    Rejected,
}

/// Pre-save hook that verifies address records.
#[derive(Clone)]
pub struct AddressValidator {
    checker: Arc<dyn DeliverabilityCheck>,
    policy: Arc<dyn VerificationPolicy>,
    invalid_address_message: String,
}

impl std::fmt::Debug for AddressValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressValidator")
            .field("invalid_address_message", &self.invalid_address_message)
            .finish_non_exhaustive()
    }
}

impl AddressValidator {
    /// Create a validator from a deliverability check and an enablement policy.
    pub fn new(checker: Arc<dyn DeliverabilityCheck>, policy: Arc<dyn VerificationPolicy>) -> Self {
        Self {
            checker,
            policy,
            invalid_address_message: DEFAULT_INVALID_ADDRESS_MESSAGE.to_string(),
        }
    }

    /// Create a validator over a street address API, configured by `settings`.
    pub fn from_settings(
        api: Arc<dyn StreetAddressApi>,
        states: Arc<dyn StateDirectory>,
        settings: VerificationSettings,
    ) -> Self {
        let message = settings.invalid_address_message.clone();
        Self::new(
            Arc::new(StreetDeliverabilityChecker::new(api, states)),
            Arc::new(settings),
        )
        .with_invalid_address_message(message)
    }

    /// Override the message attached to undeliverable records.
    pub fn with_invalid_address_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_address_message = message.into();
        self
    }

    /// Run the hook against `address`.
    ///
    /// Errors leave `validated` and the record's errors untouched.
    pub fn check(&self, address: &mut Address) -> Result<ValidationOutcome, VerificationError> {
        if !should_auto_validate(address, self.policy.as_ref()) {
            return Ok(ValidationOutcome::Skipped);
        }

        let deliverability = self.checker.check_deliverability(address)?;
        address.validated = deliverability.is_deliverable();
        if address.validated {
            Ok(ValidationOutcome::Validated)
        } else {
            tracing::debug!(?deliverability, "address rejected as not deliverable");
            address
                .errors_mut()
                .add_base(self.invalid_address_message.clone());
            Ok(ValidationOutcome::Rejected)
        }
    }
}

impl RecordValidator<Address> for AddressValidator {
    fn validate(&self, record: &mut Address) -> Result<(), VerificationError> {
        self.check(record).map(|_| ())
    }
}
