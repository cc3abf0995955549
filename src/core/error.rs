//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by ROM loading, stepping, and adapter state persistence.
///
/// None of these are retried internally. The environment is deterministic,
/// so a retry would only repeat the same failure.
#[derive(Error, Debug)]
pub enum EnvError {
    /// The ROM file does not exist.
    #[error("ROM not found: {}", path.display())]
    RomNotFound { path: PathBuf },

    /// The ROM file exists but could not be read or was rejected by the machine.
    #[error("ROM unreadable: {}: {reason}", path.display())]
    RomUnreadable { path: PathBuf, reason: String },

    /// The registry has no adapter for this identifier.
    #[error("no game adapter registered for '{0}'")]
    UnknownGameAdapter(String),

    /// The action identifier is outside the generic enumeration.
    #[error("invalid action: {0}")]
    InvalidAction(i64),

    /// The action name is not one of the generic enumeration's names.
    #[error("unknown action name '{0}'")]
    UnknownActionName(String),

    /// A caller-supplied field count did not match the persisted adapter state.
    #[error("adapter state mismatch: expected {expected} fields, found {found}")]
    AdapterStateMismatch { expected: usize, found: usize },

    /// The primitive stream ran out or held a value of the wrong kind.
    #[error("adapter state stream: {0}")]
    StateStream(String),

    /// Encoding adapter state to or from bytes failed.
    #[error("adapter state encoding: {0}")]
    StateEncoding(#[from] bincode::Error),

    /// The controller has no game loaded.
    #[error("no game loaded")]
    NotLoaded,

    /// A step was requested on an ended episode under the rejecting policy.
    #[error("episode is over; reset before stepping")]
    EpisodeOver,
}

/// Result alias for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;
