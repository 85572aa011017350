//! Event log sink traits
//!
//! A sink stores entries keyed by `(stream, position)`. The writer side and
//! the reader side are separate traits so that emission code only needs the
//! narrow append capability.

use chronicle_core::{AppendError, EventLogEntry, Guid};
use std::sync::Arc;

/// Append-only storage for serialized records
///
/// # Contract
///
/// - `append` returns `Ok(())` only once the entry is durably retrievable.
/// - Appending at a position already occupied for that stream fails with
///   [`AppendError::PositionOccupied`] and leaves the existing entry untouched.
/// - Entries are never modified or removed once appended.
///
/// Implementations must be safe to share between threads; distinct streams
/// carry no ordering guarantee relative to each other.
pub trait EventLogSink: Send + Sync {
    /// Append `payload` at `position` in stream `key`
    fn append(&self, key: &Guid, position: u64, payload: Vec<u8>) -> Result<(), AppendError>;
}

/// Ordered read access to a sink
pub trait EventLogReader: Send + Sync {
    /// Read the entry at `position`, if present
    fn get(&self, key: &Guid, position: u64) -> Option<EventLogEntry>;

    /// Read entries with positions in `[start, end)`, in position order
    fn range(&self, key: &Guid, start: u64, end: u64) -> Vec<EventLogEntry>;

    /// Read every entry at or after `start`, in position order
    ///
    /// Unlike [`EventLogReader::range`] this includes position `u64::MAX`.
    fn range_from(&self, key: &Guid, start: u64) -> Vec<EventLogEntry>;

    /// Number of entries stored for `key`
    fn stream_len(&self, key: &Guid) -> u64;
}

impl<S: EventLogSink + ?Sized> EventLogSink for Arc<S> {
    fn append(&self, key: &Guid, position: u64, payload: Vec<u8>) -> Result<(), AppendError> {
        (**self).append(key, position, payload)
    }
}

impl<R: EventLogReader + ?Sized> EventLogReader for Arc<R> {
    fn get(&self, key: &Guid, position: u64) -> Option<EventLogEntry> {
        (**self).get(key, position)
    }

    fn range(&self, key: &Guid, start: u64, end: u64) -> Vec<EventLogEntry> {
        (**self).range(key, start, end)
    }

    fn range_from(&self, key: &Guid, start: u64) -> Vec<EventLogEntry> {
        (**self).range_from(key, start)
    }

    fn stream_len(&self, key: &Guid) -> u64 {
        (**self).stream_len(key)
    }
}
