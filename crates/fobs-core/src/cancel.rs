//! # Cancellation Control
//!
//! A `Cancel` is a clonable zero-argument operation. Computations hand one
//! back when subscribed (the unsubscribe control), and the observer hands
//! one to its caller inside `Pending` (the cancellation control).

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// A shareable zero-argument cancellation operation.
///
/// Clones share the same underlying operation and compare equal to each
/// other; two independently created controls never compare equal.
#[derive(Clone)]
pub struct Cancel(Arc<dyn Fn() + Send + Sync>);

impl Cancel {
    /// Wrap an operation that may be invoked any number of times.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap an operation that runs on the first invocation only.
    pub fn once<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let slot = Mutex::new(Some(f));
        Self::new(move || {
            let f = slot.lock().take();
            if let Some(f) = f {
                f();
            }
        })
    }

    /// A control that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Invoke the operation.
    pub fn cancel(&self) {
        (self.0)()
    }

    /// Whether both controls share the same underlying operation.
    pub fn same(&self, other: &Cancel) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}

impl PartialEq for Cancel {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Cancel {}

impl fmt::Debug for Cancel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cancel(..)")
    }
}
