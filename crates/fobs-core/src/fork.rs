//! # Computation Boundary
//!
//! The observer treats the computation it watches as an opaque capability:
//! a validity predicate plus one subscription operation that takes three
//! completion channels and hands back an unsubscribe control.
//!
//! ## Contract for implementors
//!
//! - `fork` returns a [`Cancel`] that unsubscribes.
//! - After that control runs, none of the channels fire.
//! - At most one channel fires per subscription. [`Settle`] enforces this
//!   on its own: all clones of one `Settle` share a single slot.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cancel::Cancel;
use crate::exception::Exception;

/// What a computation settled with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome<E, T> {
    /// The exception channel: a defect while running.
    Crashed(Exception),
    /// The failure-reason channel.
    Rejected(E),
    /// The success-value channel.
    Resolved(T),
}

type Channels<E, T> = Box<dyn FnOnce(Outcome<E, T>) + Send>;

/// The three completion channels handed to a computation on subscription.
///
/// Firing any channel consumes the shared slot, so later calls on this
/// handle or any clone of it are ignored.
pub struct Settle<E, T> {
    slot: Arc<Mutex<Option<Channels<E, T>>>>,
}

impl<E, T> Settle<E, T> {
    /// Build a channel set that funnels every outcome into `f`.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Outcome<E, T>) + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(f)))),
        }
    }

    /// Fire the exception channel.
    pub fn crash(self, exception: Exception) {
        self.settle(Outcome::Crashed(exception));
    }

    /// Fire the failure-reason channel.
    pub fn reject(self, reason: E) {
        self.settle(Outcome::Rejected(reason));
    }

    /// Fire the success-value channel.
    pub fn resolve(self, value: T) {
        self.settle(Outcome::Resolved(value));
    }

    /// Fire whichever channel matches `outcome`.
    ///
    /// Returns whether this call actually delivered the outcome.
    pub fn settle(self, outcome: Outcome<E, T>) -> bool {
        // Take under the lock, call outside it: the receiver may re-enter.
        let channels = self.slot.lock().take();
        match channels {
            Some(channels) => {
                channels(outcome);
                true
            }
            None => false,
        }
    }

    /// Close all channels without firing any of them.
    pub fn disarm(&self) {
        let channels = self.slot.lock().take();
        drop(channels);
    }

    /// A control that disarms these channels.
    ///
    /// The closer holds the channels weakly: it never keeps the receiver
    /// alive, and does nothing once every `Settle` clone is gone.
    pub fn closer(&self) -> Cancel
    where
        E: 'static,
        T: 'static,
    {
        let slot = Arc::downgrade(&self.slot);
        Cancel::new(move || {
            if let Some(slot) = slot.upgrade() {
                let channels = slot.lock().take();
                drop(channels);
            }
        })
    }

    /// Whether a channel has fired or the set was disarmed.
    pub fn is_settled(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<E, T> Clone for Settle<E, T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<E, T> fmt::Debug for Settle<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settle")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// A deferred, cancelable computation the observer can subscribe to.
pub trait Fork: Clone + Send + Sync + 'static {
    /// Failure-reason type.
    type Reason: Send + 'static;
    /// Success-value type.
    type Value: Send + 'static;

    /// Whether this handle is a valid instance of the abstraction.
    ///
    /// Handles that wrap something external (a detached job, a closed
    /// connection) override this; the observer refuses invalid handles
    /// before emitting anything.
    fn is_future(&self) -> bool {
        true
    }

    /// Subscribe to completion.
    ///
    /// The computation may fire one of `settle`'s channels before returning
    /// (synchronous settlement) or at any later point.
    fn fork(&self, settle: Settle<Self::Reason, Self::Value>) -> Cancel;
}
