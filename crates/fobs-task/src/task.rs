//! # Task
//!
//! A `Task<E, T>` is a lazily run computation that fails with `E` or
//! succeeds with `T`. Nothing happens until it is forked, and every fork
//! runs the body again, so a handle can be observed, canceled and observed
//! once more.
//!
//! ## Settlement
//!
//! | Constructor | Settles |
//! |---|---|
//! | `resolve`, `reject`, `crash` | during `fork` |
//! | `never` | never |
//! | `from_future`, `after`, `reject_after` | on the tokio runtime, later |
//! | `new` | whenever the body fires a channel |
//!
//! A panic inside the body while forking is caught and reported through the
//! crash channel. If a channel already fired (the body panicked after
//! settling, or the receiver itself panicked), the panic resumes instead.
//! The control returned by `fork` closes the channels before running the
//! body's own cancel, so nothing fires after cancellation. It holds the
//! channels weakly and never keeps the receiver alive.

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use fobs_core::{Cancel, Exception, Fork, Outcome, Settle};
use tokio::runtime::Handle;

type Body<E, T> = dyn Fn(Settle<E, T>) -> Cancel + Send + Sync;

/// A deferred, cancelable, resubscribable computation.
pub struct Task<E, T> {
    body: Arc<Body<E, T>>,
}

impl<E, T> Task<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    /// Build a task from its body.
    ///
    /// The body receives the completion channels and returns the control
    /// that stops whatever it started.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(Settle<E, T>) -> Cancel + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
        }
    }

    /// A task that succeeds with `value` as soon as it is forked.
    pub fn resolve(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move |settle| {
            settle.resolve(value.clone());
            Cancel::noop()
        })
    }

    /// A task that fails with `reason` as soon as it is forked.
    pub fn reject(reason: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::new(move |settle| {
            settle.reject(reason.clone());
            Cancel::noop()
        })
    }

    /// A task that reports a defect as soon as it is forked.
    pub fn crash(exception: Exception) -> Self {
        Self::new(move |settle| {
            settle.crash(exception.clone());
            Cancel::noop()
        })
    }

    /// A task that never settles.
    pub fn never() -> Self {
        Self::new(|_| Cancel::noop())
    }

    /// A task that runs a fresh future from `make` on every fork.
    ///
    /// The future is spawned on the tokio runtime current at fork time:
    /// `Ok` resolves, `Err` rejects, a panic crashes. Canceling aborts the
    /// spawned future. Forking outside a runtime crashes immediately.
    pub fn from_future<F, Fut>(make: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::new(move |settle| {
            let handle = match Handle::try_current() {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::warn!(error = %err, "task forked outside a tokio runtime");
                    settle.crash(Exception::new(format!(
                        "no tokio runtime to drive the task: {err}"
                    )));
                    return Cancel::noop();
                }
            };

            let work = handle.spawn(make());
            let abort = work.abort_handle();
            handle.spawn(async move {
                match work.await {
                    Ok(Ok(value)) => settle.resolve(value),
                    Ok(Err(reason)) => settle.reject(reason),
                    Err(err) if err.is_panic() => {
                        settle.crash(Exception::from_panic(&*err.into_panic()))
                    }
                    Err(_) => tracing::debug!("task future aborted before settling"),
                }
            });

            Cancel::new(move || abort.abort())
        })
    }

    /// A task that succeeds with `value` after `delay`.
    pub fn after(delay: Duration, value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::from_future(move || {
            let value = value.clone();
            async move {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
        })
    }

    /// A task that fails with `reason` after `delay`.
    pub fn reject_after(delay: Duration, reason: E) -> Self
    where
        E: Clone + Sync,
    {
        Self::from_future(move || {
            let reason = reason.clone();
            async move {
                tokio::time::sleep(delay).await;
                Err(reason)
            }
        })
    }
}

impl<E, T> Task<E, T> {
    /// Whether both handles share the same body.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl<E, T> Fork for Task<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    type Reason = E;
    type Value = T;

    fn fork(&self, settle: Settle<E, T>) -> Cancel {
        let channels = settle.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)(settle))) {
            Ok(stop) => {
                let close = channels.closer();
                Cancel::once(move || {
                    close.cancel();
                    stop.cancel();
                })
            }
            Err(payload) => {
                // Already settled: the panic came from the receiver or from
                // the body after settling, and there is no channel left for it.
                let crash = Outcome::Crashed(Exception::from_panic(&*payload));
                if !channels.settle(crash) {
                    panic::resume_unwind(payload);
                }
                Cancel::noop()
            }
        }
    }
}

impl<E, T> Clone for Task<E, T> {
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}

impl<E, T> PartialEq for Task<E, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<E, T> Eq for Task<E, T> {}

impl<E, T> fmt::Debug for Task<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Task(..)")
    }
}
