//! Store and session errors.

use super::store::{RoomId, Version};
use crate::turn::TurnError;

/// Errors returned by a `RoomStore`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("room {0} not found")]
    NotFound(RoomId),

    #[error("stale write: expected {expected}, stored {actual}")]
    VersionConflict { expected: Version, actual: Version },

    #[error("room document codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to a gamer's session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A write or read failed; the local view is unchanged and the action
    /// can be retried.
    #[error("store error while {action}: {source}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },

    /// No signed-in user, a user without a seat, or an action the user
    /// may not take.
    #[error("not authorized")]
    Unauthorized,

    /// The room document no longer exists.
    #[error("room {0} no longer exists")]
    RoomGone(RoomId),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl SessionError {
    /// Wrap a store error raised while performing `action`.
    pub fn store(action: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound(id) => SessionError::RoomGone(id),
            source => SessionError::Store { action, source },
        }
    }

    /// Retryable failures shown as a passing notice.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionError::Store { .. })
    }

    /// Failures that send the gamer back to the lobby.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, SessionError::Unauthorized | SessionError::RoomGone(_))
    }

    /// Text shown to the gamer.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            SessionError::Store { action, .. } => {
                format!("Oops! Something went wrong while {action}. Please try again!")
            }
            SessionError::Unauthorized => "You don't have access to this room.".to_string(),
            SessionError::RoomGone(_) => "This room no longer exists.".to_string(),
            SessionError::Turn(err) => format!("Oops! {err}."),
        }
    }
}
