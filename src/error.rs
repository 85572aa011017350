//! Unified error types for chronicle.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.

use crate::types::{AppendError, Guid};
use thiserror::Error;

/// All chronicle errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream identity could not be allocated
    #[error("identity allocation failed: {0}")]
    IdentityAllocationFailed(String),

    /// Record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The sink refused the append; the handle did not advance
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

    /// Invalid address or event key
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid builder configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for chronicle operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from the sink.
    pub fn is_append_failure(&self) -> bool {
        matches!(self, Error::AppendFailed { .. })
    }

    /// Check if the append hit a position that was already written.
    pub fn is_position_conflict(&self) -> bool {
        matches!(
            self,
            Error::AppendFailed {
                source: AppendError::PositionOccupied,
                ..
            }
        )
    }

    /// Check if this is a serious/unrecoverable error.
    ///
    /// Identity exhaustion can not be fixed by the caller retrying.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::IdentityAllocationFailed(_))
    }
}

// Convert from internal core errors
impl From<chronicle_core::Error> for Error {
    fn from(e: chronicle_core::Error) -> Self {
        use chronicle_core::Error as CoreError;
        match e {
            CoreError::IdentityAllocationFailed { owner, reason } => {
                Error::IdentityAllocationFailed(format!("{}: {}", owner.short_str(), reason))
            }
            CoreError::SerializationFailed(msg) => Error::Serialization(msg),
            CoreError::AppendFailed {
                key,
                position,
                source,
            } => Error::AppendFailed {
                key,
                position,
                source,
            },
            CoreError::InvalidKey(msg) => Error::InvalidKey(msg),
            CoreError::InvalidConfig(msg) => Error::InvalidConfig(msg),
        }
    }
}
