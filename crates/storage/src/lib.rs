//! Storage layer for chronicle
//!
//! This crate defines the boundary to the append-only event log:
//! - [`EventLogSink`]: position-checked append
//! - [`EventLogReader`]: ordered read-back for observers
//! - [`ShardedSink`]: in-memory sink, one shard per stream

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;
pub mod sink;

pub use sharded::ShardedSink;
pub use sink::{EventLogReader, EventLogSink};
