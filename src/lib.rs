//! # Chronicle
//!
//! Uniquely identified, strictly ordered event streams over an append-only log.
//!
//! Every actor can open any number of streams. Each stream has a globally
//! unique [`Guid`] and exactly one writer, its [`EventHandle`]. The handle's
//! position always equals the number of entries committed to the log, so any
//! observer can audit a stream from its GUID alone.
//!
//! ## Quick Start
//!
//! ```
//! use chronicle::prelude::*;
//!
//! let chronicle = Chronicle::ephemeral()?;
//!
//! // One stream per owner and record type
//! let mut deposits = chronicle.create::<u64>(&AccountAddress::ONE)?;
//! chronicle.emit(&mut deposits, 100)?;
//! chronicle.emit(&mut deposits, 250)?;
//!
//! // Observers only need the GUID
//! let guid = *deposits.identifier();
//! assert_eq!(chronicle.len(&guid), 2);
//! assert!(chronicle.verify_stream(&guid, 2).is_valid);
//!
//! // Streams end explicitly; history stays
//! let summary = deposits.destroy();
//! assert_eq!(summary.length, 2);
//! # Ok::<(), chronicle::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Chronicle`] - configured entry point (identity + sink + codec)
//! - [`EventLog`] - emission and audit over any [`EventLogSink`]
//! - [`EventHandle`] - sole writer of one stream
//! - [`ShardedSink`] - in-memory sink, one shard per stream

#![warn(missing_docs)]

mod chronicle;
mod error;
mod types;

pub mod prelude;

// Re-export main entry points
pub use crate::chronicle::{Chronicle, ChronicleBuilder, ChronicleMetrics};
pub use error::{Error, Result};

// Re-export types
pub use types::*;
