//! Error taxonomy for the board core.

use thiserror::Error;

use crate::models::ButtonId;

/// Errors surfaced by registry, binder, and session operations.
///
/// None of these is fatal: the in-memory registry stays authoritative and the
/// worst outcome is a session that could not be saved this round.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The operation referenced a button id the registry does not hold.
    #[error("no button with id {0}")]
    NotFound(ButtonId),

    /// A shortcut bind was attempted on a control key.
    #[error("'{0}' is a reserved key and cannot be used as a shortcut")]
    ReservedKey(String),

    /// An imported or stored document could not be parsed.
    #[error("invalid session format: {0}")]
    InvalidFormat(String),

    /// The durable store rejected a read or write.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An uploaded file is not usable as a button's audio.
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

/// Result alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
