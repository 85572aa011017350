//! Convenient imports for chronicle.
//!
//! ```
//! use chronicle::prelude::*;
//!
//! let chronicle = Chronicle::ephemeral().unwrap();
//! let handle = chronicle.create::<String>(&AccountAddress::ONE).unwrap();
//! handle.destroy();
//! ```

// Main entry point
pub use crate::chronicle::{Chronicle, ChronicleBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{AccountAddress, Guid, StreamSummary, StreamVerification};

// Handles and encoding
pub use crate::types::{CodecKind, EventCodec, EventHandle};
