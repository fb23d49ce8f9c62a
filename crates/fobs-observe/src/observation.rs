//! # Observation Instance
//!
//! One subscription to one computation, and the state machine that decides
//! what gets reported about it.
//!
//! ## Phases
//!
//! ```text
//! Subscribing ──▶ Settled                  (a channel fired inside fork)
//!      │
//!      └──▶ Pending ──▶ Settled            (a channel fired later)
//!                 └──▶ Canceled            (the control ran first)
//! ```
//!
//! `Settled` and `Canceled` absorb everything: a late channel firing or a
//! second cancel is ignored. Every phase decision and the emission it
//! causes are queued under the same lock, and one thread at a time drains
//! the queue into the sink with the lock released. That gives a single,
//! ordered, non-overlapping stream of states per observation even when the
//! computation settles on another thread or the sink cancels from inside
//! its own callback.
//!
//! ## Ownership
//!
//! The observation owns the sink and the computation handle. The
//! unsubscribe control lives in the cancellation control, not in the
//! observation, so a computation whose unsubscribe holds its channels does
//! not form a cycle: an observation nobody can settle or cancel any more
//! is dropped.
//!
//! ## Sink panics
//!
//! A panic from the sink is held until the queue is empty, then resumed.
//! States queued by other threads in the meantime are still delivered.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use fobs_core::{Cancel, ComputationState, Fork, ObservationId, Outcome, Settle, StateOf};
use parking_lot::Mutex;

use crate::config::ObserverConfig;
use crate::emit::Emit;

/// Where an observation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// `fork` has not returned yet.
    Subscribing,
    /// Subscribed and not settled; the control is live.
    Pending,
    /// A completion channel fired.
    Settled,
    /// The control ran before any channel fired.
    Canceled,
}

struct Relay<M: Fork> {
    phase: Phase,
    queue: VecDeque<StateOf<M>>,
    draining: bool,
}

impl<M: Fork> Relay<M> {
    /// Queue a state. Returns whether the caller must drain.
    fn enqueue(&mut self, state: StateOf<M>) -> bool {
        self.queue.push_back(state);
        !std::mem::replace(&mut self.draining, true)
    }
}

pub(crate) struct Observation<M: Fork, S> {
    id: ObservationId,
    config: Arc<ObserverConfig>,
    sink: Arc<S>,
    computation: M,
    relay: Mutex<Relay<M>>,
}

impl<M, S> Observation<M, S>
where
    M: Fork,
    S: Emit<StateOf<M>>,
{
    /// Report `Idle`, subscribe, and report `Pending` unless the
    /// computation settled during subscription.
    ///
    /// Returns the cancellation control.
    pub(crate) fn start(sink: Arc<S>, config: Arc<ObserverConfig>, computation: M) -> Cancel {
        let observation = Arc::new(Self {
            id: ObservationId::new(),
            config,
            sink,
            computation,
            relay: Mutex::new(Relay {
                phase: Phase::Subscribing,
                queue: VecDeque::new(),
                draining: false,
            }),
        });
        tracing::trace!(observation = %observation.id, label = %observation.config.label, "observation started");

        observation.report(ComputationState::Idle);

        let settle = {
            let observation = Arc::clone(&observation);
            Settle::new(move |outcome| observation.settle(outcome))
        };
        let unsubscribe = observation.computation.fork(settle);

        let control = {
            let observation = Arc::clone(&observation);
            Cancel::new(move || observation.cancel(&unsubscribe))
        };
        observation.subscribed(control.clone());
        control
    }

    fn report(&self, state: StateOf<M>) {
        let drain = self.relay.lock().enqueue(state);
        if drain {
            self.drain();
        }
    }

    fn subscribed(&self, control: Cancel) {
        let drain = {
            let mut relay = self.relay.lock();
            if relay.phase != Phase::Subscribing {
                // Settled while subscribing; the terminal state is already queued.
                return;
            }
            relay.phase = Phase::Pending;
            relay.enqueue(ComputationState::Pending(control))
        };
        if drain {
            self.drain();
        }
    }

    fn settle(&self, outcome: Outcome<M::Reason, M::Value>) {
        let drain = {
            let mut relay = self.relay.lock();
            match relay.phase {
                Phase::Subscribing | Phase::Pending => {
                    relay.phase = Phase::Settled;
                    relay.enqueue(outcome.into())
                }
                Phase::Settled | Phase::Canceled => {
                    tracing::trace!(
                        observation = %self.id,
                        phase = ?relay.phase,
                        "ignoring settlement of a concluded observation"
                    );
                    false
                }
            }
        };
        if drain {
            self.drain();
        }
    }

    fn cancel(&self, unsubscribe: &Cancel) {
        let drain = {
            let mut relay = self.relay.lock();
            if relay.phase != Phase::Pending {
                tracing::trace!(
                    observation = %self.id,
                    phase = ?relay.phase,
                    "ignoring cancel of an observation that is not pending"
                );
                return;
            }
            relay.phase = Phase::Canceled;
            relay.enqueue(ComputationState::Canceled(self.computation.clone()))
        };
        unsubscribe.cancel();
        if drain {
            self.drain();
        }
    }

    fn drain(&self) {
        let mut failure: Option<Box<dyn Any + Send>> = None;
        loop {
            let next = {
                let mut relay = self.relay.lock();
                match relay.queue.pop_front() {
                    Some(state) => state,
                    None => {
                        relay.draining = false;
                        break;
                    }
                }
            };
            if self.config.log_emissions {
                tracing::debug!(
                    observation = %self.id,
                    label = %self.config.label,
                    state = %next.tag(),
                    "emitting computation state"
                );
            }
            let sink = &self.sink;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| sink.emit(next))) {
                tracing::warn!(
                    observation = %self.id,
                    label = %self.config.label,
                    "emission sink panicked"
                );
                if failure.is_none() {
                    failure = Some(payload);
                }
            }
        }
        if let Some(payload) = failure {
            panic::resume_unwind(payload);
        }
    }
}
