//! Status enums for stateful entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Returned when a status change is not allowed from the current state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move friendship from {from} to {to}")]
pub struct TransitionError {
    /// State the row was in.
    pub from: FriendshipStatus,
    /// State that was requested.
    pub to: FriendshipStatus,
}

/// State of a friendship row.
///
/// `Pending` is the only state with outgoing transitions. `Accepted` and
/// `Rejected` are terminal; a rejected pair stays rejected until the row is
/// deleted by an unfriend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl FriendshipStatus {
    /// Lowercase wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// True for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Move `pending -> accepted`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` from any terminal state.
    pub const fn accept(self) -> Result<Self, TransitionError> {
        self.transition(Self::Accepted)
    }

    /// Move `pending -> rejected`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` from any terminal state.
    pub const fn reject(self) -> Result<Self, TransitionError> {
        self.transition(Self::Rejected)
    }

    const fn transition(self, to: Self) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(to),
            Self::Accepted | Self::Rejected => Err(TransitionError { from: self, to }),
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
