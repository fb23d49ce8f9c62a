//! # Catamorphism
//!
//! Total dispatch over [`ComputationState`]: one handler per label, all
//! required. A handler set missing a case does not compile, whether it is
//! written as a [`Cases`] implementation (no method has a default) or as a
//! [`Handlers`] literal (every field must be given).
//!
//! ```
//! use fobs_core::{cata, Cancel, ComputationState, Handlers};
//!
//! let describe = cata(Handlers {
//!     idle: || "idle".to_string(),
//!     pending: |_: Cancel| "pending".to_string(),
//!     canceled: |_: ()| "canceled".to_string(),
//!     crashed: |e: fobs_core::Exception| format!("crashed: {e}"),
//!     rejected: |r: i32| format!("rejected with {r}"),
//!     resolved: |v: i32| format!("resolved with {v}"),
//! });
//!
//! let state: ComputationState<(), i32, i32> = ComputationState::Resolved(42);
//! assert_eq!(describe(state), "resolved with 42");
//! ```

use crate::cancel::Cancel;
use crate::exception::Exception;
use crate::state::ComputationState;

/// One handler per computation state.
pub trait Cases<M, E, T> {
    /// What every handler returns.
    type Output;

    fn idle(&self) -> Self::Output;
    fn pending(&self, cancel: Cancel) -> Self::Output;
    fn canceled(&self, computation: M) -> Self::Output;
    fn crashed(&self, exception: Exception) -> Self::Output;
    fn rejected(&self, reason: E) -> Self::Output;
    fn resolved(&self, value: T) -> Self::Output;
}

/// A handler set built from six closures.
#[derive(Debug, Clone, Copy)]
pub struct Handlers<I, P, C, X, J, R> {
    pub idle: I,
    pub pending: P,
    pub canceled: C,
    pub crashed: X,
    pub rejected: J,
    pub resolved: R,
}

impl<M, E, T, O, I, P, C, X, J, R> Cases<M, E, T> for Handlers<I, P, C, X, J, R>
where
    I: Fn() -> O,
    P: Fn(Cancel) -> O,
    C: Fn(M) -> O,
    X: Fn(Exception) -> O,
    J: Fn(E) -> O,
    R: Fn(T) -> O,
{
    type Output = O;

    fn idle(&self) -> O {
        (self.idle)()
    }

    fn pending(&self, cancel: Cancel) -> O {
        (self.pending)(cancel)
    }

    fn canceled(&self, computation: M) -> O {
        (self.canceled)(computation)
    }

    fn crashed(&self, exception: Exception) -> O {
        (self.crashed)(exception)
    }

    fn rejected(&self, reason: E) -> O {
        (self.rejected)(reason)
    }

    fn resolved(&self, value: T) -> O {
        (self.resolved)(value)
    }
}

impl<M, E, T> ComputationState<M, E, T> {
    /// Invoke exactly the handler matching this state with its payload.
    pub fn cata<C>(self, cases: &C) -> C::Output
    where
        C: Cases<M, E, T> + ?Sized,
    {
        match self {
            Self::Idle => cases.idle(),
            Self::Pending(cancel) => cases.pending(cancel),
            Self::Canceled(computation) => cases.canceled(computation),
            Self::Crashed(exception) => cases.crashed(exception),
            Self::Rejected(reason) => cases.rejected(reason),
            Self::Resolved(value) => cases.resolved(value),
        }
    }
}

/// Curried catamorphism: turn a handler set into a function over states.
///
/// The result can be handed straight to the observer as its sink.
pub fn cata<M, E, T, C>(cases: C) -> impl Fn(ComputationState<M, E, T>) -> C::Output
where
    C: Cases<M, E, T>,
{
    move |state| state.cata(&cases)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::state::Tag;
    use proptest::prelude::*;

    fn any_state() -> impl Strategy<Value = ComputationState<u16, i64, i64>> {
        prop_oneof![
            Just(ComputationState::Idle),
            Just(()).prop_map(|_| ComputationState::Pending(Cancel::noop())),
            any::<u16>().prop_map(ComputationState::Canceled),
            "[a-z ]{0,20}".prop_map(|m| ComputationState::Crashed(Exception::new(m))),
            any::<i64>().prop_map(ComputationState::Rejected),
            any::<i64>().prop_map(ComputationState::Resolved),
        ]
    }

    proptest! {
        /// The marker returned by the dispatch always names the variant.
        #[test]
        fn dispatch_marker_matches_tag(state in any_state()) {
            let expected = state.tag();
            let marker = state.cata(&Handlers {
                idle: || Tag::Idle,
                pending: |_: Cancel| Tag::Pending,
                canceled: |_: u16| Tag::Canceled,
                crashed: |_: Exception| Tag::Crashed,
                rejected: |_: i64| Tag::Rejected,
                resolved: |_: i64| Tag::Resolved,
            });
            prop_assert_eq!(marker, expected);
        }

        /// Payloads pass through dispatch untouched.
        #[test]
        fn dispatch_preserves_payload(value in any::<i64>()) {
            let echo = Handlers {
                idle: || None,
                pending: |_: Cancel| None,
                canceled: |_: u16| None,
                crashed: |_: Exception| None,
                rejected: |r: i64| Some(r),
                resolved: |v: i64| Some(v),
            };
            let state: ComputationState<u16, i64, i64> = ComputationState::Resolved(value);
            prop_assert_eq!(state.cata(&echo), Some(value));
        }
    }
}
