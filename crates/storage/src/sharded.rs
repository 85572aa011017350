//! Sharded in-memory event log
//!
//! One shard per stream, keyed by [`Guid`] in a DashMap.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, lock-free reads
//! - FxHash: fast non-crypto hash for GUID keys
//! - Per-stream BTreeMap: position-ordered entries, cheap range reads
//! - Per-stream locking: appends to different streams never contend

use crate::sink::{EventLogReader, EventLogSink};
use chronicle_core::{AppendError, EventLogEntry, Guid};
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::hash::BuildHasherDefault;
use std::ops::RangeBounds;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Entries of a single stream, ordered by position
#[derive(Debug, Default)]
pub(crate) struct StreamShard {
    entries: BTreeMap<u64, Vec<u8>>,
}

impl StreamShard {
    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn collect(&self, key: &Guid, positions: impl RangeBounds<u64>) -> Vec<EventLogEntry> {
        self.entries
            .range(positions)
            .map(|(pos, payload)| EventLogEntry::new(*key, *pos, payload.clone()))
            .collect()
    }
}

/// In-memory sink - DashMap by stream, BTreeMap within
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - reads: lock-free via DashMap read guard
/// - append: only locks the target stream's shard
///
/// # Example
///
/// ```
/// use chronicle_core::{AccountAddress, Guid};
/// use chronicle_storage::{EventLogReader, EventLogSink, ShardedSink};
///
/// let sink = ShardedSink::new();
/// let key = Guid::new(AccountAddress::ONE, 0);
///
/// sink.append(&key, 0, vec![1]).unwrap();
/// assert!(sink.append(&key, 0, vec![2]).is_err());
/// assert_eq!(sink.get(&key, 0).unwrap().payload, vec![1]);
/// ```
pub struct ShardedSink {
    shards: DashMap<Guid, StreamShard, FxBuildHasher>,
    /// Entry limit per stream (None = unbounded)
    max_entries_per_stream: Option<u64>,
    /// Successful appends across all streams
    appended: AtomicU64,
}

impl ShardedSink {
    /// Create new empty sink
    pub fn new() -> Self {
        Self {
            shards: DashMap::with_hasher(FxBuildHasher::default()),
            max_entries_per_stream: None,
            appended: AtomicU64::new(0),
        }
    }

    /// Create with expected number of streams
    pub fn with_capacity(num_streams: usize) -> Self {
        Self {
            shards: DashMap::with_capacity_and_hasher(num_streams, FxBuildHasher::default()),
            max_entries_per_stream: None,
            appended: AtomicU64::new(0),
        }
    }

    /// Cap the number of entries any single stream may hold
    ///
    /// A limit of zero rejects every append.
    pub fn with_max_entries_per_stream(mut self, limit: u64) -> Self {
        self.max_entries_per_stream = Some(limit);
        self
    }

    /// Configured per-stream limit
    pub fn max_entries_per_stream(&self) -> Option<u64> {
        self.max_entries_per_stream
    }

    /// Get number of streams with at least one entry
    pub fn stream_count(&self) -> usize {
        self.shards.len()
    }

    /// Check if a stream exists
    pub fn has_stream(&self, key: &Guid) -> bool {
        self.shards.contains_key(key)
    }

    /// Get total number of entries across all shards
    pub fn total_entries(&self) -> usize {
        self.shards.iter().map(|entry| entry.value().len()).sum()
    }

    /// Number of successful appends since creation
    #[inline]
    pub fn appended_total(&self) -> u64 {
        self.appended.load(Ordering::Acquire)
    }

    /// All stream identifiers, sorted
    pub fn streams(&self) -> Vec<Guid> {
        let mut keys: Vec<Guid> = self.shards.iter().map(|entry| *entry.key()).collect();
        keys.sort();
        keys
    }

    /// Check if an entry exists
    #[inline]
    pub fn contains(&self, key: &Guid, position: u64) -> bool {
        self.shards
            .get(key)
            .map(|shard| shard.entries.contains_key(&position))
            .unwrap_or(false)
    }
}

impl Default for ShardedSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedSink")
            .field("stream_count", &self.stream_count())
            .field("total_entries", &self.total_entries())
            .field("max_entries_per_stream", &self.max_entries_per_stream)
            .finish()
    }
}

impl EventLogSink for ShardedSink {
    /// Sharded write - only locks this stream's shard.
    fn append(&self, key: &Guid, position: u64, payload: Vec<u8>) -> Result<(), AppendError> {
        // Never register a shard that cannot hold an entry
        if self.max_entries_per_stream == Some(0) {
            return Err(AppendError::CapacityExceeded { limit: 0 });
        }

        let mut shard = self.shards.entry(*key).or_insert_with(StreamShard::new);

        if let Some(limit) = self.max_entries_per_stream {
            if !shard.entries.contains_key(&position) && shard.len() as u64 >= limit {
                return Err(AppendError::CapacityExceeded { limit });
            }
        }

        match shard.entries.entry(position) {
            Entry::Occupied(_) => Err(AppendError::PositionOccupied),
            Entry::Vacant(slot) => {
                slot.insert(payload);
                self.appended.fetch_add(1, Ordering::AcqRel);
                trace!(stream = %key, position, "entry appended");
                Ok(())
            }
        }
    }
}

impl EventLogReader for ShardedSink {
    #[inline]
    fn get(&self, key: &Guid, position: u64) -> Option<EventLogEntry> {
        self.shards.get(key).and_then(|shard| {
            shard
                .entries
                .get(&position)
                .map(|payload| EventLogEntry::new(*key, position, payload.clone()))
        })
    }

    fn range(&self, key: &Guid, start: u64, end: u64) -> Vec<EventLogEntry> {
        if start >= end {
            return Vec::new();
        }
        self.shards
            .get(key)
            .map(|shard| shard.collect(key, start..end))
            .unwrap_or_default()
    }

    fn range_from(&self, key: &Guid, start: u64) -> Vec<EventLogEntry> {
        self.shards
            .get(key)
            .map(|shard| shard.collect(key, start..))
            .unwrap_or_default()
    }

    fn stream_len(&self, key: &Guid) -> u64 {
        self.shards
            .get(key)
            .map(|shard| shard.len() as u64)
            .unwrap_or(0)
    }
}
