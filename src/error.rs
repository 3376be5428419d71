//! Error types for dispatcher operations.
//!
//! Only input-validation and invariant failures are represented here.
//! An empty dispatch is a normal outcome (`None`) and a wrong ordering
//! found while benchmarking is reported through the report's correctness
//! flag, so neither appears in [`DispatchError`].

use crate::model::{CustomerId, Status, Tier};
use thiserror::Error;

/// Result type alias for dispatcher operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors surfaced synchronously to the caller of a dispatcher operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// A customer request is missing a field or carries an invalid value.
    #[error("validation failed for `{field}`: {reason}")]
    ValidationFailed { field: &'static str, reason: String },

    /// A customer was routed to a queue of a different tier.
    #[error("tier mismatch: queue holds {expected}, customer is {actual}")]
    TierMismatch { expected: Tier, actual: Tier },

    /// A tier name outside the closed tier set.
    #[error("unknown tier: {value}")]
    UnknownTier { value: String },

    /// No waiting customer carries this id.
    #[error("customer {id} is not waiting")]
    CustomerNotFound { id: CustomerId },

    /// A status change outside `Waiting -> InService -> Served | Waiting -> Cancelled`.
    #[error("customer {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: CustomerId,
        from: Status,
        to: Status,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },
}

impl DispatchError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DispatchError::ValidationFailed {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures caused by the caller's input rather than
    /// by a broken internal invariant.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DispatchError::ValidationFailed { .. } | DispatchError::InvalidConfig { .. }
        )
    }
}
