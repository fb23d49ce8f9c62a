//! # Computation State Model
//!
//! The six states an observed computation is reported in.
//!
//! ```text
//!          ┌──▶ Resolved | Rejected | Crashed          (settled during subscription)
//! Idle ────┤
//!          └──▶ Pending ──┬──▶ Resolved | Rejected | Crashed   (settled later)
//!                         └──▶ Canceled(handle) ──▶ Idle ...   (restart by re-observing)
//! ```
//!
//! A `ComputationState` is a point-in-time report: constructed at emission,
//! moved into the sink, never stored by the observer. [`Tag`] is the
//! payload-free label used for logging, serialization and string parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cancel::Cancel;
use crate::error::UnknownTag;
use crate::exception::Exception;
use crate::fork::{Fork, Outcome};

// ─── Tag ────────────────────────────────────────────────────────────

/// The label of a computation state, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// Not yet started.
    Idle,
    /// Running and cancelable.
    Pending,
    /// Canceled; restartable.
    Canceled,
    /// Terminated by a defect.
    Crashed,
    /// Terminated through the failure channel.
    Rejected,
    /// Terminated through the success channel.
    Resolved,
}

impl Tag {
    /// Every label, in lifecycle order.
    pub const ALL: [Tag; 6] = [
        Tag::Idle,
        Tag::Pending,
        Tag::Canceled,
        Tag::Crashed,
        Tag::Rejected,
        Tag::Resolved,
    ];

    /// The label's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending => "Pending",
            Self::Canceled => "Canceled",
            Self::Crashed => "Crashed",
            Self::Rejected => "Rejected",
            Self::Resolved => "Resolved",
        }
    }

    /// Look a label up by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    /// Whether nothing is ever reported after this label.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Canceled | Self::Crashed | Self::Rejected | Self::Resolved
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}

// ─── ComputationState ───────────────────────────────────────────────

/// The observed lifecycle stage of one computation.
///
/// `M` is the computation handle type, `E` the failure reason and `T` the
/// success value. Use [`StateOf`] to derive `E` and `T` from a [`Fork`]
/// implementor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputationState<M, E, T> {
    /// Not yet started; subscription not yet attempted.
    Idle,
    /// Running. Invoking the control cancels the computation.
    Pending(Cancel),
    /// Canceled. Carries the original handle so it can be observed again.
    Canceled(M),
    /// Terminated by an unexpected defect.
    Crashed(Exception),
    /// Terminated through the failure channel.
    Rejected(E),
    /// Terminated through the success channel.
    Resolved(T),
}

/// The state type reported when observing a computation of type `M`.
pub type StateOf<M> = ComputationState<M, <M as Fork>::Reason, <M as Fork>::Value>;

impl<M, E, T> ComputationState<M, E, T> {
    /// The label of this state.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Idle => Tag::Idle,
            Self::Pending(_) => Tag::Pending,
            Self::Canceled(_) => Tag::Canceled,
            Self::Crashed(_) => Tag::Crashed,
            Self::Rejected(_) => Tag::Rejected,
            Self::Resolved(_) => Tag::Resolved,
        }
    }

    /// Whether this state carries the given label.
    pub fn is(&self, tag: Tag) -> bool {
        self.tag() == tag
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }

    pub fn is_crashed(&self) -> bool {
        matches!(self, Self::Crashed(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Whether the computation reached one of its three completion channels.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Crashed(_) | Self::Rejected(_) | Self::Resolved(_))
    }

    /// Whether nothing further is reported after this state.
    pub fn is_terminal(&self) -> bool {
        self.tag().is_terminal()
    }

    /// The cancellation control, if pending.
    pub fn cancel_control(&self) -> Option<&Cancel> {
        match self {
            Self::Pending(cancel) => Some(cancel),
            _ => None,
        }
    }
}

impl<M, E, T> From<Outcome<E, T>> for ComputationState<M, E, T> {
    fn from(outcome: Outcome<E, T>) -> Self {
        match outcome {
            Outcome::Crashed(exception) => Self::Crashed(exception),
            Outcome::Rejected(reason) => Self::Rejected(reason),
            Outcome::Resolved(value) => Self::Resolved(value),
        }
    }
}

impl<M, E, T> fmt::Display for ComputationState<M, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().as_str())
    }
}
