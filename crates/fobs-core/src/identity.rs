//! # Observation Identity
//!
//! Every call to the observer creates an independent observation instance.
//! `ObservationId` tells those instances apart in structured logs; it has no
//! bearing on the protocol itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one observation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationId(pub Uuid);

impl ObservationId {
    /// Generate a new random observation identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ObservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "observation:{}", self.0)
    }
}
