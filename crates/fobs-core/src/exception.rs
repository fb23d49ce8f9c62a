//! # Exception — the defect payload
//!
//! A computation that panics while running has not failed in the domain
//! sense; it has a defect. The observer reports that as
//! [`ComputationState::Crashed`](crate::ComputationState::Crashed) carrying
//! an `Exception`, never by unwinding through the caller.

use std::any::Any;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a panic payload is neither `&str` nor `String`.
pub const NON_STRING_PANIC: &str = "computation panicked with a non-string payload";

/// An unexpected defect raised while running a computation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("{message}")]
pub struct Exception {
    message: String,
}

impl Exception {
    /// Create an exception with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the payload of a caught panic.
    ///
    /// `panic!` produces either a `&'static str` or a `String` payload;
    /// anything else (e.g. `std::panic::panic_any(42)`) keeps only a
    /// generic message.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else {
            NON_STRING_PANIC.to_string()
        };
        Self { message }
    }

    /// The defect message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
