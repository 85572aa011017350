//! Event log entry types
//!
//! These types describe what a sink stores and what an observer learns when
//! it audits a stream.

use crate::types::Guid;
use serde::{Deserialize, Serialize};

/// One committed record in a stream
///
/// Entries are immutable once written. The payload is the canonical encoding
/// of the record that was emitted; decoding it is up to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Stream the entry belongs to
    pub key: Guid,
    /// Zero-based position within the stream
    pub position: u64,
    /// Canonically encoded record
    pub payload: Vec<u8>,
}

impl EventLogEntry {
    /// Create an entry
    pub fn new(key: Guid, position: u64, payload: Vec<u8>) -> Self {
        Self {
            key,
            position,
            payload,
        }
    }
}

/// Stream verification result
///
/// Returned by `verify_stream()` to report whether a stream holds exactly the
/// positions `0..expected` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamVerification {
    /// Whether the stream matches the expected length
    pub is_valid: bool,
    /// Number of entries actually present
    pub length: u64,
    /// First position where the stream diverges (if any)
    pub first_invalid: Option<u64>,
    /// Error description (if any)
    pub error: Option<String>,
}

impl StreamVerification {
    /// Create a valid verification result
    pub fn valid(length: u64) -> Self {
        Self {
            is_valid: true,
            length,
            first_invalid: None,
            error: None,
        }
    }

    /// Create an invalid verification result
    pub fn invalid(length: u64, first_invalid: u64, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            length,
            first_invalid: Some(first_invalid),
            error: Some(error.into()),
        }
    }
}
