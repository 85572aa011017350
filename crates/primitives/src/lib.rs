//! Event stream primitives for chronicle
//!
//! - [`IdentityService`] / [`GuidAllocator`]: stream identity allocation
//! - [`EventCodec`]: canonical record encoding
//! - [`EventHandle`]: the sole writer of one stream
//! - [`EventLog`]: emission facade and stream auditing over a sink

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod event_handle;
pub mod event_log;
pub mod identity;

pub use codec::{BincodeCodec, CodecKind, EventCodec, JsonCodec};
pub use event_handle::{EventHandle, StreamSummary};
pub use event_log::EventLog;
pub use identity::{GuidAllocator, IdentityService};
