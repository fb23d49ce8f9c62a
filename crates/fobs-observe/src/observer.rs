//! # Observer
//!
//! Consumes a computation while reporting its state to a sink.
//!
//! ## Emitted sequences
//!
//! | Computation | States |
//! |---|---|
//! | settles during subscription | `Idle`, then `Resolved` / `Rejected` / `Crashed` |
//! | settles later | `Idle`, `Pending`, then `Resolved` / `Rejected` / `Crashed` |
//! | canceled while pending | `Idle`, `Pending`, `Canceled(handle)` |
//! | never settles | `Idle`, `Pending` |
//!
//! Construction and each `observe` call validate their arguments before
//! anything is emitted or subscribed.

use std::marker::PhantomData;
use std::sync::Arc;

use fobs_core::{Cancel, Fork, ObserveError, StateOf};

use crate::config::ObserverConfig;
use crate::emit::Emit;
use crate::observation::Observation;

/// A sink bound to a computation type, ready to observe computations.
///
/// Cloning shares the sink, so a `Canceled` handler holding a clone can
/// restart observation by passing the handle back to [`Observer::observe`].
pub struct Observer<M, S> {
    sink: Arc<S>,
    config: Arc<ObserverConfig>,
    _computation: PhantomData<fn(M)>,
}

impl<M, S> Observer<M, S>
where
    M: Fork,
    S: Emit<StateOf<M>>,
{
    /// Bind a sink with the default configuration.
    ///
    /// # Errors
    ///
    /// [`ObserveError::CallbackNotCallable`] if the sink cannot receive states.
    pub fn new(sink: S) -> Result<Self, ObserveError> {
        Self::with_config(sink, ObserverConfig::default())
    }

    /// Bind a sink with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`ObserveError::CallbackNotCallable`] if the sink cannot receive states.
    pub fn with_config(sink: S, config: ObserverConfig) -> Result<Self, ObserveError> {
        if !sink.is_callable() {
            return Err(ObserveError::CallbackNotCallable);
        }
        Ok(Self {
            sink: Arc::new(sink),
            config: Arc::new(config),
            _computation: PhantomData,
        })
    }

    /// Observe `computation`.
    ///
    /// Emits `Idle`, subscribes, and emits either the settlement or
    /// `Pending`. Returns the same cancellation control that `Pending`
    /// carries; invoking it after settlement does nothing.
    ///
    /// # Errors
    ///
    /// - [`ObserveError::CallbackNotCallable`] if the sink stopped accepting
    ///   states since the observer was built.
    /// - [`ObserveError::InvalidComputation`] if `computation` is not a
    ///   valid instance of its abstraction.
    pub fn observe(&self, computation: M) -> Result<Cancel, ObserveError> {
        if !self.sink.is_callable() {
            return Err(ObserveError::CallbackNotCallable);
        }
        if !computation.is_future() {
            return Err(ObserveError::InvalidComputation);
        }
        Ok(Observation::start(
            Arc::clone(&self.sink),
            Arc::clone(&self.config),
            computation,
        ))
    }

    /// The configuration shared by every observation.
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }
}

impl<M, S> Clone for Observer<M, S> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            config: Arc::clone(&self.config),
            _computation: PhantomData,
        }
    }
}

impl<M, S> std::fmt::Debug for Observer<M, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Observe `computation` with a one-off observer.
///
/// # Errors
///
/// See [`Observer::new`] and [`Observer::observe`].
pub fn observe<M, S>(sink: S, computation: M) -> Result<Cancel, ObserveError>
where
    M: Fork,
    S: Emit<StateOf<M>>,
{
    Observer::new(sink)?.observe(computation)
}
