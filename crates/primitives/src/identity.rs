//! Stream identity allocation
//!
//! A GUID is `(creation_num, owner)`. [`GuidAllocator`] keeps one creation
//! counter per owner and never hands out the same number twice.

use chronicle_core::{AccountAddress, Error, Guid, Result};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Allocates globally unique stream identifiers
pub trait IdentityService: Send + Sync {
    /// Allocate a fresh GUID owned by `owner`
    ///
    /// Must never return a GUID that was returned before, for any owner.
    fn allocate(&self, owner: &AccountAddress) -> Result<Guid>;
}

/// Per-owner creation counters
///
/// # Thread Safety
///
/// Allocation for one owner locks only that owner's slot, so different
/// owners never contend.
///
/// # Example
///
/// ```
/// use chronicle_core::AccountAddress;
/// use chronicle_primitives::{GuidAllocator, IdentityService};
///
/// let ids = GuidAllocator::new();
/// let a = ids.allocate(&AccountAddress::ONE).unwrap();
/// let b = ids.allocate(&AccountAddress::ONE).unwrap();
/// assert_eq!(a.creation_num(), 0);
/// assert_eq!(b.creation_num(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GuidAllocator {
    next: DashMap<AccountAddress, u64>,
    allocated: AtomicU64,
}

impl GuidAllocator {
    /// Create an allocator where every owner starts at creation number 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise `owner`'s next creation number to at least `next`
    ///
    /// Used when restoring from an existing log. The counter never moves
    /// backwards, so seeding can not cause a GUID to be reissued.
    pub fn seed(&self, owner: &AccountAddress, next: u64) {
        let mut slot = self.next.entry(*owner).or_insert(0);
        if next > *slot {
            *slot = next;
        }
    }

    /// Creation number the next allocation for `owner` would receive
    pub fn next_creation_num(&self, owner: &AccountAddress) -> u64 {
        self.next.get(owner).map(|slot| *slot).unwrap_or(0)
    }

    /// Number of GUIDs handed out since creation
    pub fn allocated_total(&self) -> u64 {
        self.allocated.load(Ordering::Acquire)
    }
}

impl IdentityService for GuidAllocator {
    fn allocate(&self, owner: &AccountAddress) -> Result<Guid> {
        let mut slot = self.next.entry(*owner).or_insert(0);
        let creation_num = *slot;
        *slot = creation_num
            .checked_add(1)
            .ok_or_else(|| Error::IdentityAllocationFailed {
                owner: *owner,
                reason: "creation numbers exhausted".to_string(),
            })?;
        self.allocated.fetch_add(1, Ordering::AcqRel);
        Ok(Guid::new(*owner, creation_num))
    }
}
