//! EventLog Integration Test Suite
//!
//! End-to-end checks of stream identity, ordering and failure atomicity.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test eventlog
//! cargo test --test eventlog failures::
//! ```

use chronicle::{
    AccountAddress, AppendError, BincodeCodec, EventLog, EventLogSink, Guid, GuidAllocator,
    ShardedSink,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

mod lifecycle;
mod ordering;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Owner used by most tests
pub fn alice() -> AccountAddress {
    AccountAddress::from_hex("0xa11ce").unwrap()
}

/// Second owner
pub fn bob() -> AccountAddress {
    AccountAddress::from_hex("0xb0b").unwrap()
}

/// Sink that fails appends on demand, then delegates to a real sink
pub struct ScriptedSink {
    inner: ShardedSink,
    script: Mutex<VecDeque<Option<AppendError>>>,
}

impl ScriptedSink {
    pub fn new() -> Self {
        Self {
            inner: ShardedSink::new(),
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue the outcome of the next append (`None` = let it through)
    pub fn then(&self, outcome: Option<AppendError>) -> &Self {
        self.script.lock().push_back(outcome);
        self
    }

    pub fn inner(&self) -> &ShardedSink {
        &self.inner
    }
}

impl EventLogSink for ScriptedSink {
    fn append(&self, key: &Guid, position: u64, payload: Vec<u8>) -> Result<(), AppendError> {
        if let Some(Some(err)) = self.script.lock().pop_front() {
            return Err(err);
        }
        self.inner.append(key, position, payload)
    }
}

/// Allocator + in-memory log
pub fn setup() -> (GuidAllocator, EventLog<ShardedSink>) {
    init_tracing();
    (
        GuidAllocator::new(),
        EventLog::new(Arc::new(ShardedSink::new())),
    )
}

/// Allocator + log over a scripted sink
pub fn scripted() -> (GuidAllocator, Arc<ScriptedSink>) {
    init_tracing();
    (GuidAllocator::new(), Arc::new(ScriptedSink::new()))
}

/// Codec used with scripted sinks
pub const CODEC: BincodeCodec = BincodeCodec;
