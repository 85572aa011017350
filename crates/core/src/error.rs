//! Error types for event streams
//!
//! Every environmental failure is surfaced to the immediate caller and is
//! never retried internally.

use crate::types::{AccountAddress, Guid};
use thiserror::Error;

/// Result type for chronicle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while creating streams or emitting into them
#[derive(Debug, Error)]
pub enum Error {
    /// The identity service could not allocate a GUID
    #[error("identity allocation failed for {owner}: {reason}")]
    IdentityAllocationFailed {
        /// Owner the GUID was requested for
        owner: AccountAddress,
        /// Why allocation failed
        reason: String,
    },

    /// A payload could not be canonically encoded (or decoded)
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// The sink rejected or could not complete an append
    #[error("append failed for stream {key} at position {position}: {source}")]
    AppendFailed {
        /// Stream the append targeted
        key: Guid,
        /// Position the append targeted
        position: u64,
        /// Sink-level cause
        #[source]
        source: AppendError,
    },

    /// Malformed address or event key
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Rejected configuration value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Check if the sink refused the append because the slot was taken
    pub fn is_position_occupied(&self) -> bool {
        matches!(
            self,
            Error::AppendFailed {
                source: AppendError::PositionOccupied,
                ..
            }
        )
    }

    /// Check if this error came from the sink
    pub fn is_append_failure(&self) -> bool {
        matches!(self, Error::AppendFailed { .. })
    }
}

/// Why an event log sink refused an append
///
/// A sink only ever reports "appended and acknowledged" (`Ok`) or one of these.
/// Partial appends are not representable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppendError {
    /// An entry already exists at this position
    #[error("position already occupied")]
    PositionOccupied,

    /// The stream reached its configured entry limit
    #[error("stream capacity exceeded (limit {limit})")]
    CapacityExceeded {
        /// Configured maximum number of entries
        limit: u64,
    },

    /// The append was cancelled or timed out before acknowledgement
    #[error("append interrupted: {0}")]
    Interrupted(String),

    /// The sink is unavailable
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
