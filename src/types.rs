//! Public types for the chronicle API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identity
pub use chronicle_core::AccountAddress;
pub use chronicle_core::Guid;
pub use chronicle_core::GUID_KEY_LENGTH;

// Log contents
pub use chronicle_core::AppendError;
pub use chronicle_core::EventLogEntry;
pub use chronicle_core::StreamVerification;

// Handles, identity and encoding
pub use chronicle_primitives::{
    BincodeCodec, CodecKind, EventCodec, EventHandle, EventLog, GuidAllocator, IdentityService,
    JsonCodec, StreamSummary,
};

// Sinks
pub use chronicle_storage::{EventLogReader, EventLogSink, ShardedSink};
