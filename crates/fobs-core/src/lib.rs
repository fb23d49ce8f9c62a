//! # fobs-core — Foundational Types for Future Observation
//!
//! Defines the vocabulary every other crate in the workspace speaks: the
//! states an observed computation moves through, the exhaustive dispatch
//! over them, the cancellation control, and the boundary trait a
//! computation implements so it can be observed. Depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed state model.** [`ComputationState`] is a plain enum with six
//!    variants. Exhaustiveness is the compiler's job: `match`, [`Cases`]
//!    and [`Handlers`] all fail to compile when a case is missing.
//!
//! 2. **Outcomes are data.** A computation's success, domain failure and
//!    defects arrive as [`Outcome`] values through [`Settle`] and become
//!    states. Only argument validation ([`ObserveError`]) and label parsing
//!    ([`UnknownTag`]) are errors.
//!
//! 3. **At most one settlement, structurally.** Clones of a [`Settle`]
//!    share one slot; the first channel to fire empties it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fobs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod cancel;
pub mod cata;
pub mod error;
pub mod exception;
pub mod fork;
pub mod identity;
pub mod state;

// Re-export primary types for ergonomic imports.
pub use cancel::Cancel;
pub use cata::{cata, Cases, Handlers};
pub use error::{ObserveError, UnknownTag};
pub use exception::Exception;
pub use fork::{Fork, Outcome, Settle};
pub use identity::ObservationId;
pub use state::{ComputationState, StateOf, Tag};
