//! Main entry point for chronicle.
//!
//! This module provides the `Chronicle` struct, which wires an identity
//! allocator, an in-memory sink and a codec together.

use crate::error::{Error, Result};
use crate::types::{
    AccountAddress, CodecKind, EventCodec, EventHandle, EventLog, Guid, GuidAllocator,
    ShardedSink, StreamVerification,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Event streams for a set of actors.
///
/// Create one with [`Chronicle::ephemeral`] or [`Chronicle::builder`].
///
/// # Example
///
/// ```
/// use chronicle::prelude::*;
///
/// let chronicle = Chronicle::ephemeral().unwrap();
///
/// let mut handle = chronicle.create::<u64>(&AccountAddress::ONE).unwrap();
/// chronicle.emit(&mut handle, 42).unwrap();
/// chronicle.emit(&mut handle, 7).unwrap();
/// assert_eq!(handle.position(), 2);
///
/// let guid = *handle.identifier();
/// assert_eq!(chronicle.read::<u64>(&guid, 1).unwrap(), Some(7));
/// assert!(chronicle.verify(&handle).is_valid);
///
/// handle.destroy();
/// ```
pub struct Chronicle {
    events: EventLog<ShardedSink, CodecKind>,
    identity: Arc<GuidAllocator>,
}

impl Chronicle {
    /// In-memory chronicle with default settings.
    ///
    /// Uses the bincode codec and unbounded streams.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chronicle::prelude::*;
    ///
    /// let chronicle = Chronicle::builder()
    ///     .codec(CodecKind::Json)
    ///     .max_entries_per_stream(1_000)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(chronicle.codec(), CodecKind::Json);
    /// ```
    pub fn builder() -> ChronicleBuilder {
        ChronicleBuilder::new()
    }

    /// Emission and audit facade.
    pub fn events(&self) -> &EventLog<ShardedSink, CodecKind> {
        &self.events
    }

    /// Identity allocator shared by every stream.
    pub fn identity(&self) -> &GuidAllocator {
        &self.identity
    }

    /// Underlying sink.
    pub fn sink(&self) -> &ShardedSink {
        self.events.sink()
    }

    /// Configured codec.
    pub fn codec(&self) -> CodecKind {
        *self.events.codec()
    }

    /// Create a handle for a new stream owned by `owner`.
    pub fn create<T>(&self, owner: &AccountAddress) -> Result<EventHandle<T>> {
        self.events
            .create(self.identity.as_ref(), owner)
            .map_err(Error::from)
    }

    /// Emit `record` through `handle`.
    ///
    /// On error the handle's position is unchanged.
    pub fn emit<T: Serialize>(&self, handle: &mut EventHandle<T>, record: T) -> Result<()> {
        self.events.emit(handle, record).map_err(Error::from)
    }

    /// Decode the record at `position` of stream `key`.
    pub fn read<T: DeserializeOwned>(&self, key: &Guid, position: u64) -> Result<Option<T>> {
        self.events.read(key, position).map_err(Error::from)
    }

    /// Decode records with positions in `[start, end)`.
    pub fn read_range<T: DeserializeOwned>(
        &self,
        key: &Guid,
        start: u64,
        end: u64,
    ) -> Result<Vec<(u64, T)>> {
        self.events.read_range(key, start, end).map_err(Error::from)
    }

    /// Number of entries stored for `key`.
    pub fn len(&self, key: &Guid) -> u64 {
        self.events.len(key)
    }

    /// Check if stream `key` has no entries.
    pub fn is_empty(&self, key: &Guid) -> bool {
        self.events.is_empty(key)
    }

    /// Check that the log matches a live handle's position.
    pub fn verify<T>(&self, handle: &EventHandle<T>) -> StreamVerification {
        self.events.verify_handle(handle)
    }

    /// Check that stream `key` holds exactly positions `0..expected`.
    pub fn verify_stream(&self, key: &Guid, expected: u64) -> StreamVerification {
        self.events.verify_stream(key, expected)
    }

    /// Hash chain over the entries of stream `key`.
    pub fn stream_digest(&self, key: &Guid) -> [u8; 32] {
        self.events.stream_digest(key)
    }

    /// Get chronicle metrics.
    pub fn metrics(&self) -> ChronicleMetrics {
        let sink = self.sink();
        ChronicleMetrics {
            streams: sink.stream_count(),
            entries: sink.total_entries(),
            appends: sink.appended_total(),
            guids_allocated: self.identity.allocated_total(),
        }
    }
}

impl std::fmt::Debug for Chronicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chronicle")
            .field("codec", &self.codec().name())
            .field("sink", self.sink())
            .finish()
    }
}

/// Chronicle metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronicleMetrics {
    /// Streams with at least one entry
    pub streams: usize,
    /// Entries across all streams
    pub entries: usize,
    /// Successful appends since creation
    pub appends: u64,
    /// GUIDs handed out since creation
    pub guids_allocated: u64,
}

/// Builder for chronicle configuration.
///
/// # Example
///
/// ```
/// use chronicle::prelude::*;
///
/// // Bounded streams, pre-sized for many actors
/// let chronicle = Chronicle::builder()
///     .stream_capacity(10_000)
///     .max_entries_per_stream(100)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ChronicleBuilder {
    codec: CodecKind,
    max_entries_per_stream: Option<u64>,
    stream_capacity: usize,
    identity: Option<Arc<GuidAllocator>>,
}

impl ChronicleBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            codec: CodecKind::default(),
            max_entries_per_stream: None,
            stream_capacity: 0,
            identity: None,
        }
    }

    /// Codec used for every record.
    pub fn codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Reject appends past `limit` entries in any single stream.
    ///
    /// Must be non-zero.
    pub fn max_entries_per_stream(mut self, limit: u64) -> Self {
        self.max_entries_per_stream = Some(limit);
        self
    }

    /// Pre-size the sink for `streams` streams.
    pub fn stream_capacity(mut self, streams: usize) -> Self {
        self.stream_capacity = streams;
        self
    }

    /// Share an existing identity allocator.
    ///
    /// Useful when several chronicles must never hand out the same GUID.
    pub fn identity(mut self, identity: Arc<GuidAllocator>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Build the chronicle.
    pub fn build(self) -> Result<Chronicle> {
        let mut sink = ShardedSink::with_capacity(self.stream_capacity);
        if let Some(limit) = self.max_entries_per_stream {
            if limit == 0 {
                return Err(Error::InvalidConfig(
                    "max_entries_per_stream must be non-zero".to_string(),
                ));
            }
            sink = sink.with_max_entries_per_stream(limit);
        }

        debug!(
            codec = self.codec.name(),
            max_entries_per_stream = ?self.max_entries_per_stream,
            "chronicle built"
        );

        Ok(Chronicle {
            events: EventLog::with_codec(Arc::new(sink), self.codec),
            identity: self.identity.unwrap_or_default(),
        })
    }
}

impl Default for ChronicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
