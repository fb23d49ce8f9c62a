//! # fobs-task — A Minimal Observable Computation
//!
//! The observer only needs something that implements
//! [`fobs_core::Fork`]. This crate provides [`Task`], a small clonable
//! computation with that shape: synchronous constructors for computations
//! that are already complete, a never-settling task, and tokio-backed tasks
//! that settle on a later turn of the runtime.
//!
//! `Task` does not offer combinators, retry or scheduling policy. It is
//! deliberately the least a computation needs to be observed.

pub mod task;

pub use task::Task;
