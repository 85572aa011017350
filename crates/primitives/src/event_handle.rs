//! Event handle: the sole writer of one stream
//!
//! ## Design
//!
//! An `EventHandle<T>` binds one GUID to a position counter and a record
//! type. It provides:
//! - Exclusive emission rights (emitting needs `&mut self`)
//! - Position assignment from a local counter, no global clock
//! - Compile-time record typing (`T` is a marker, nothing of type `T` is stored)
//! - Explicit, consuming destruction
//!
//! ## Emission Sequence
//!
//! ```text
//! 1. encode(record)                        - failure: counter unchanged
//! 2. sink.append(guid, counter, payload)   - failure: counter unchanged
//! 3. counter += 1                          - only after the append is acknowledged
//! ```
//!
//! The counter therefore always equals the number of entries committed
//! through this handle.
//!
//! ## Lifecycle
//!
//! ```text
//! Created(counter=0) -> [emit]* -> Created(counter=n) -> Destroyed
//! ```
//!
//! `destroy` takes the handle by value, so using it afterwards does not compile:
//!
//! ```compile_fail
//! use chronicle_core::AccountAddress;
//! use chronicle_primitives::{BincodeCodec, EventHandle, GuidAllocator};
//! use chronicle_storage::ShardedSink;
//!
//! let ids = GuidAllocator::new();
//! let sink = ShardedSink::new();
//! let mut handle = EventHandle::<u64>::create(&ids, &AccountAddress::ONE).unwrap();
//! handle.destroy();
//! handle.emit(&sink, &BincodeCodec, 1).unwrap();
//! ```
//!
//! Discarding a freshly created handle is flagged by `unused_must_use`:
//!
//! ```compile_fail
//! #![deny(unused_must_use)]
//! use chronicle_core::AccountAddress;
//! use chronicle_primitives::{EventHandle, GuidAllocator};
//!
//! let ids = GuidAllocator::new();
//! EventHandle::<u64>::create(&ids, &AccountAddress::ONE).unwrap();
//! ```

use crate::codec::EventCodec;
use crate::identity::IdentityService;
use chronicle_core::{AccountAddress, Error, Guid, Result};
use chronicle_storage::EventLogSink;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Owned writer for a single event stream
///
/// There is no public constructor taking a [`Guid`]: a handle can only come
/// from [`EventHandle::create`], which allocates a fresh identity. Knowing a
/// stream's GUID therefore never lets anyone forge a second writer for it.
///
/// Handles are not `Clone`. Moving a handle moves all emission rights.
#[must_use = "an event handle must be ended with `destroy`"]
pub struct EventHandle<T> {
    guid: Guid,
    counter: u64,
    /// Cleared by `destroy`; checked on drop
    live: bool,
    _record: PhantomData<fn(T)>,
}

/// Final state of a destroyed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Identity of the stream
    pub identifier: Guid,
    /// Number of entries committed through the handle
    pub length: u64,
}

impl<T> EventHandle<T> {
    /// Create a handle for a new stream owned by `owner`
    ///
    /// Allocation failures are returned as-is and never retried.
    pub fn create<I>(identity: &I, owner: &AccountAddress) -> Result<Self>
    where
        I: IdentityService + ?Sized,
    {
        let guid = identity.allocate(owner)?;
        debug!(stream = %guid, record = std::any::type_name::<T>(), "event handle created");
        Ok(Self {
            guid,
            counter: 0,
            live: true,
            _record: PhantomData,
        })
    }

    /// Stream identity
    pub fn identifier(&self) -> &Guid {
        &self.guid
    }

    /// Number of records committed so far, which is also the next position
    pub fn position(&self) -> u64 {
        self.counter
    }

    /// End the stream
    ///
    /// Entries already in the log are kept. The GUID is never reissued.
    pub fn destroy(mut self) -> StreamSummary {
        self.live = false;
        info!(stream = %self.guid, length = self.counter, "event handle destroyed");
        StreamSummary {
            identifier: self.guid,
            length: self.counter,
        }
    }
}

impl<T: Serialize> EventHandle<T> {
    /// Encode `record` and append it at the current position
    ///
    /// The counter advances only once the sink acknowledges the append. On
    /// any error the handle is left exactly as it was.
    ///
    /// The counter tracks one stream in one sink. Every call on a handle must
    /// pass the same sink; switching sinks leaves each of them with a gapped
    /// stream. [`EventLog`](crate::EventLog) binds the sink once and is the
    /// usual way to emit.
    pub fn emit<S, C>(&mut self, sink: &S, codec: &C, record: T) -> Result<()>
    where
        S: EventLogSink + ?Sized,
        C: EventCodec,
    {
        let payload = codec.encode(&record)?;
        let position = self.counter;

        sink.append(&self.guid, position, payload)
            .map_err(|source| {
                warn!(stream = %self.guid, position, error = %source, "append rejected");
                Error::AppendFailed {
                    key: self.guid,
                    position,
                    source,
                }
            })?;

        self.counter += 1;
        debug!(stream = %self.guid, position, "event emitted");
        Ok(())
    }
}

impl<T> std::fmt::Debug for EventHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandle")
            .field("guid", &self.guid)
            .field("counter", &self.counter)
            .field("record", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Drop for EventHandle<T> {
    fn drop(&mut self) {
        if self.live {
            warn!(
                stream = %self.guid,
                length = self.counter,
                "event handle dropped without destroy"
            );
        }
    }
}
