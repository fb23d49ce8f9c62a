//! # Error Types
//!
//! Errors that escape the observation protocol as control flow. Everything
//! a computation does (success, domain failure, defect, cancellation) is
//! reported as a [`ComputationState`](crate::ComputationState) value instead;
//! only argument validation and label parsing fail with an error.

use thiserror::Error;

/// Argument validation failure raised by the observer before any side effect.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserveError {
    /// The emission sink cannot currently receive states.
    #[error("observe() expects its first argument to be a callable emission sink")]
    CallbackNotCallable,

    /// The computation handle is not a valid instance of its abstraction.
    #[error("observe() expects its second argument to be a valid computation")]
    InvalidComputation,
}

/// A state label that does not name any computation state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("unknown computation state label: {0:?}")]
pub struct UnknownTag(pub String);
