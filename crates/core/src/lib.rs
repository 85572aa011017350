//! Core types for chronicle
//!
//! This crate defines the canonical types shared by every other crate:
//! - [`AccountAddress`]: the owner of one or more event streams
//! - [`Guid`]: globally unique stream identifier
//! - [`EventLogEntry`]: one committed record in a stream
//! - [`Error`] / [`AppendError`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod types;

pub use error::{AppendError, Error, Result};
pub use event::{EventLogEntry, StreamVerification};
pub use types::{AccountAddress, Guid, GUID_KEY_LENGTH};
