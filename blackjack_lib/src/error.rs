//! The error taxonomy shared by the engine, the ledger, and the storage
//! ports. All variants are recoverable conditions reported to the caller;
//! nothing here is retried internally.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlackjackError {
    #[error("game not found with id: {0}")]
    GameNotFound(String),

    #[error("player not found with id: {0}")]
    PlayerNotFound(u64),

    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An opaque collaborator failure (e.g. storage unavailability), surfaced
    /// unchanged to the caller.
    #[error("storage failure: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, BlackjackError>;
