//! # fobs-observe — Observing Deferred Computations
//!
//! Consumes a computation while reporting each change of its state to a
//! sink, in order, as a [`ComputationState`](fobs_core::ComputationState).
//!
//! ```
//! use fobs_core::{cata, Cancel, Exception, Handlers};
//! use fobs_observe::Observer;
//! use fobs_task::Task;
//!
//! let observer: Observer<Task<String, u32>, _> = Observer::new(cata(Handlers {
//!     idle: || println!("computation is idle"),
//!     pending: |_: Cancel| println!("computation is pending"),
//!     canceled: |_: Task<String, u32>| println!("computation was canceled"),
//!     crashed: |e: Exception| eprintln!("computation crashed: {e}"),
//!     rejected: |r: String| println!("computation rejected with {r}"),
//!     resolved: |v: u32| println!("computation resolved with {v}"),
//! }))
//! .unwrap();
//!
//! observer.observe(Task::resolve(42)).unwrap();
//! ```
//!
//! ## Protocol
//!
//! - `Idle` first, before the computation is subscribed to.
//! - Then exactly one of `Resolved`, `Rejected`, `Crashed` (settled during
//!   subscription) or `Pending` (not yet settled).
//! - After `Pending`, at most one of a later settlement or `Canceled`.
//! - Nothing after a settlement or `Canceled`.
//!
//! Emissions for one observation never overlap, even when the computation
//! settles on another thread. See the `observation` module for how.
//!
//! ## Crate Policy
//!
//! - Outcomes of the computation are data; only argument validation
//!   returns an error.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests and examples.

pub mod config;
pub mod emit;
mod observation;
pub mod observer;

pub use config::{ConfigError, ObserverConfig};
pub use emit::Emit;
pub use observer::{observe, Observer};
