//! Event Log primitive implementation
//!
//! Emission facade plus the observer side of the log: read-back, length,
//! contiguity checks and a hash-chained digest per stream.
//!
//! ## Design
//!
//! EventLog owns no stream state. Positions live in the [`EventHandle`]s,
//! entries live in the injected sink. It provides:
//! - `create` / `emit` over the configured sink and codec
//! - Typed reads (`read`, `read_range`) for observers
//! - `verify_stream`: the stream holds exactly `0..n` and nothing else
//! - `stream_digest`: SHA-256 chain over entries in position order
//!
//! ## Digest Chain
//!
//! ```text
//! h[-1] = [0; 32]
//! h[i]  = SHA256(h[i-1] || guid_key || position_le || payload)
//! ```
//!
//! Two observers holding the same entries compute the same digest. The chain
//! detects reordering and edits; it is not a signature.

use crate::codec::{BincodeCodec, EventCodec};
use crate::event_handle::EventHandle;
use crate::identity::IdentityService;
use chronicle_core::{AccountAddress, Guid, Result, StreamVerification};
use chronicle_storage::{EventLogReader, EventLogSink};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Emission and audit facade over a sink
///
/// # Example
///
/// ```
/// use chronicle_core::AccountAddress;
/// use chronicle_primitives::{EventLog, GuidAllocator};
/// use chronicle_storage::ShardedSink;
/// use std::sync::Arc;
///
/// let ids = GuidAllocator::new();
/// let log: EventLog<ShardedSink> = EventLog::new(Arc::new(ShardedSink::new()));
///
/// let mut handle = log.create::<u64, _>(&ids, &AccountAddress::ONE).unwrap();
/// log.emit(&mut handle, 42).unwrap();
///
/// let guid = *handle.identifier();
/// assert_eq!(log.read::<u64>(&guid, 0).unwrap(), Some(42));
/// assert!(log.verify_stream(&guid, handle.position()).is_valid);
/// handle.destroy();
/// ```
pub struct EventLog<S, C = BincodeCodec> {
    sink: Arc<S>,
    codec: C,
}

impl<S, C> Clone for EventLog<S, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            codec: self.codec.clone(),
        }
    }
}

impl<S, C> EventLog<S, C>
where
    S: EventLogSink,
    C: EventCodec,
{
    /// Create a facade with the default codec
    pub fn new(sink: Arc<S>) -> Self
    where
        C: Default,
    {
        Self::with_codec(sink, C::default())
    }

    /// Create a facade with an explicit codec
    pub fn with_codec(sink: Arc<S>, codec: C) -> Self {
        Self { sink, codec }
    }

    /// Underlying sink
    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Codec used for records
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Create a handle for a new stream owned by `owner`
    pub fn create<T, I>(&self, identity: &I, owner: &AccountAddress) -> Result<EventHandle<T>>
    where
        I: IdentityService + ?Sized,
    {
        EventHandle::create(identity, owner)
    }

    /// Emit `record` through `handle` into this log
    pub fn emit<T: Serialize>(&self, handle: &mut EventHandle<T>, record: T) -> Result<()> {
        handle.emit(self.sink.as_ref(), &self.codec, record)
    }
}

impl<S, C> EventLog<S, C>
where
    S: EventLogSink + EventLogReader,
    C: EventCodec,
{
    /// Number of entries stored for `key`
    pub fn len(&self, key: &Guid) -> u64 {
        self.sink.stream_len(key)
    }

    /// Check if the stream has no entries
    pub fn is_empty(&self, key: &Guid) -> bool {
        self.len(key) == 0
    }

    /// Decode the record at `position`
    pub fn read<T: DeserializeOwned>(&self, key: &Guid, position: u64) -> Result<Option<T>> {
        self.sink
            .get(key, position)
            .map(|entry| self.codec.decode(&entry.payload))
            .transpose()
    }

    /// Decode records with positions in `[start, end)`
    pub fn read_range<T: DeserializeOwned>(
        &self,
        key: &Guid,
        start: u64,
        end: u64,
    ) -> Result<Vec<(u64, T)>> {
        self.sink
            .range(key, start, end)
            .into_iter()
            .map(|entry| {
                self.codec
                    .decode(&entry.payload)
                    .map(|record| (entry.position, record))
            })
            .collect()
    }

    /// Check that the stream holds exactly positions `0..expected`
    pub fn verify_stream(&self, key: &Guid, expected: u64) -> StreamVerification {
        let entries = self.sink.range_from(key, 0);
        let length = entries.len() as u64;
        let stored = self.sink.stream_len(key);
        if length != stored {
            return StreamVerification::invalid(
                stored,
                length,
                format!("reader returned {} of {} entries", length, stored),
            );
        }

        for (index, entry) in entries.iter().enumerate() {
            let index = index as u64;
            if index >= expected {
                return StreamVerification::invalid(
                    length,
                    entry.position,
                    format!("unexpected entry at position {}", entry.position),
                );
            }
            if entry.position != index {
                return StreamVerification::invalid(
                    length,
                    index,
                    format!("gap at position {}", index),
                );
            }
        }

        if length < expected {
            return StreamVerification::invalid(
                length,
                length,
                format!("expected {} entries, found {}", expected, length),
            );
        }

        StreamVerification::valid(length)
    }

    /// Verify the stream a live handle writes to
    pub fn verify_handle<T>(&self, handle: &EventHandle<T>) -> StreamVerification {
        self.verify_stream(handle.identifier(), handle.position())
    }

    /// Hash chain over every entry of the stream, in position order
    pub fn stream_digest(&self, key: &Guid) -> [u8; 32] {
        let key_bytes = key.to_bytes();
        self.sink
            .range_from(key, 0)
            .iter()
            .fold([0u8; 32], |prev, entry| {
                let mut hasher = Sha256::new();
                hasher.update(prev);
                hasher.update(key_bytes);
                hasher.update(entry.position.to_le_bytes());
                hasher.update(&entry.payload);
                hasher.finalize().into()
            })
    }
}
