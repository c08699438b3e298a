//! Creation-ordered enumeration of registered pools.

use std::sync::{Arc, PoisonError, RwLock};

use super::pool_registry::Index;
use super::PoolHandle;
use crate::ledger::FungibleLedger;

/// Lazy iterator over a registry's pools, in creation order.
///
/// Created by [`PoolRegistry::all_pools`](super::PoolRegistry::all_pools).
/// Each call to `next` takes the registry's read lock just long enough to
/// clone one handle, so enumeration never blocks pool creation for long.
///
/// The sequence is finite: it stops at the number of pools that existed
/// when the iterator was created, even if more are added meanwhile. It is
/// restartable: a clone starts from the clone point.
pub struct AllPools<'a, L: FungibleLedger> {
    index: &'a RwLock<Index<L>>,
    next: usize,
    end: usize,
}

impl<'a, L: FungibleLedger> AllPools<'a, L> {
    pub(super) fn new(index: &'a RwLock<Index<L>>, end: usize) -> Self {
        Self {
            index,
            next: 0,
            end,
        }
    }
}

impl<L: FungibleLedger> Clone for AllPools<'_, L> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            next: self.next,
            end: self.end,
        }
    }
}

impl<L: FungibleLedger> Iterator for AllPools<'_, L> {
    type Item = PoolHandle<L>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let pool = self
            .index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ordered
            .get(self.next)
            .map(Arc::clone)?;
        self.next += 1;
        Some(pool)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl<L: FungibleLedger> ExactSizeIterator for AllPools<'_, L> {}

impl<L: FungibleLedger> core::fmt::Debug for AllPools<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AllPools")
            .field("next", &self.next)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
