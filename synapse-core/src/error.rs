//! Error types for the SYNAPSE core library.

use thiserror::Error;

/// Top-level error type for all SYNAPSE operations.
#[derive(Error, Debug)]
pub enum SynapseError {
    /// A room ID was referenced that the content registry does not know.
    #[error("Unknown room: {0}")]
    UnknownRoom(crate::RoomId),

    /// A character profile was requested that does not exist.
    #[error("Unknown character: {0}")]
    UnknownCharacter(crate::CharacterId),

    /// An item was referenced that the content registry does not know.
    #[error("Unknown item: {0}")]
    UnknownItem(crate::ItemId),

    /// A save slot index outside the configured range.
    #[error("Save slot {slot} out of range (0..{max})")]
    SlotOutOfRange {
        /// Requested slot index.
        slot: u8,
        /// Number of configured slots.
        max: u8,
    },

    /// A snapshot failed structural validation on restore.
    #[error("Corrupt snapshot: {reason}")]
    CorruptSnapshot {
        /// What the validator found wrong.
        reason: String,
    },

    /// A snapshot was written by an incompatible engine version.
    #[error("Snapshot version {found} not supported (expected {expected})")]
    SnapshotVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this engine writes.
        expected: u32,
    },

    /// The session has reached a terminal state and rejects further commands.
    #[error("Session is over: {cause}")]
    SessionOver {
        /// Which ending terminated the session.
        cause: String,
    },

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite persistence error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, SynapseError>;
