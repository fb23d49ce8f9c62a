//! # Emission Sinks
//!
//! Where the observer delivers computation states. Any
//! `Fn(state) + Send + Sync` closure is a sink; so is an unbounded tokio
//! channel sender, which stops being callable once its receiver is gone.

use tokio::sync::mpsc::UnboundedSender;

/// A destination for computation states.
pub trait Emit<S>: Send + Sync + 'static {
    /// Deliver one state.
    fn emit(&self, state: S);

    /// Whether the sink can currently receive states.
    fn is_callable(&self) -> bool {
        true
    }
}

impl<S, F> Emit<S> for F
where
    F: Fn(S) + Send + Sync + 'static,
{
    fn emit(&self, state: S) {
        self(state)
    }
}

impl<S> Emit<S> for UnboundedSender<S>
where
    S: Send + 'static,
{
    fn emit(&self, state: S) {
        if self.send(state).is_err() {
            tracing::warn!("emission receiver closed; dropping computation state");
        }
    }

    fn is_callable(&self) -> bool {
        !self.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn deliver<E: Emit<u8>>(sink: &E, value: u8) {
        sink.emit(value);
    }

    #[test]
    fn closures_are_always_callable() {
        let total = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&total);
        let sink = move |v: u8| {
            counter.fetch_add(usize::from(v), Ordering::SeqCst);
        };
        assert!(Emit::<u8>::is_callable(&sink));
        deliver(&sink, 3);
        deliver(&sink, 4);
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn open_channel_is_callable_and_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
        assert!(tx.is_callable());
        deliver(&tx, 9);
        assert_eq!(rx.try_recv().unwrap(), 9);
    }

    #[test]
    fn closed_channel_is_not_callable() {
        let (tx, rx) = mpsc::unbounded_channel::<u8>();
        drop(rx);
        assert!(!tx.is_callable());
        // Sending into a closed channel is dropped quietly.
        deliver(&tx, 1);
    }
}
