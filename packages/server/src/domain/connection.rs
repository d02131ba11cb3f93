//! Per-connection protocol state.

use thiserror::Error;

/// Lifecycle of one transport connection.
///
/// A `Connected` client is invisible to the room until it joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connected,
    Joined,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("this connection has already joined the room")]
    AlreadyJoined,

    #[error("join the room before sending events")]
    NotJoined,

    #[error("connection is closed")]
    Closed,
}

impl ConnectionState {
    /// `Connected` -> `Joined`
    pub fn join(self) -> Result<Self, TransitionError> {
        match self {
            Self::Connected => Ok(Self::Joined),
            Self::Joined => Err(TransitionError::AlreadyJoined),
            Self::Closed => Err(TransitionError::Closed),
        }
    }

    /// Gate for events that need a joined session.
    pub fn ensure_joined(self) -> Result<(), TransitionError> {
        match self {
            Self::Joined => Ok(()),
            Self::Connected => Err(TransitionError::NotJoined),
            Self::Closed => Err(TransitionError::Closed),
        }
    }

    /// Any state -> `Closed`
    pub fn close(self) -> Self {
        Self::Closed
    }
}
