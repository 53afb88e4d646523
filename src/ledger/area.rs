//! Per-player area table.
//!
//! Maps each live `AreaId` to the number of cells in that area. An id is live
//! exactly while it has an entry. Released ids go on an ordered free list so
//! `alloc` always hands out the smallest id not currently in use, which keeps
//! the id space dense without ever running out.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::core::{AreaId, GammaError};

/// Sizes of one player's live areas, keyed by area id.
#[derive(Clone, Debug)]
pub struct AreaLedger {
    sizes: FxHashMap<AreaId, u64>,
    released: BTreeSet<u32>,
    next_id: u32,
}

impl Default for AreaLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sizes: FxHashMap::default(),
            released: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Number of live areas.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.sizes.len() as u32
    }

    /// Check if no area is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Check whether `id` names a live area.
    #[must_use]
    pub fn is_live(&self, id: AreaId) -> bool {
        self.sizes.contains_key(&id)
    }

    /// Size of area `id`, zero when not live.
    #[must_use]
    pub fn size(&self, id: AreaId) -> u64 {
        self.sizes.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all live area sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.sizes.values().sum()
    }

    /// Iterate over `(id, size)` of live areas in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (AreaId, u64)> + '_ {
        self.sizes.iter().map(|(&id, &size)| (id, size))
    }

    /// Make room for `additional` new areas so the next allocations cannot
    /// fail. Called before any state is mutated.
    pub fn reserve(&mut self, additional: usize) -> Result<(), GammaError> {
        self.sizes
            .try_reserve(additional)
            .map_err(|_| GammaError::OutOfMemory { what: "area ledger" })
    }

    /// The id `alloc` would return next.
    #[must_use]
    pub fn peek_id(&self) -> AreaId {
        AreaId(self.released.first().copied().unwrap_or(self.next_id))
    }

    /// Create a new live area of `size` cells under the smallest unused id.
    pub fn alloc(&mut self, size: u64) -> AreaId {
        let id = match self.released.pop_first() {
            Some(raw) => AreaId(raw),
            None => {
                let raw = self.next_id;
                self.next_id += 1;
                AreaId(raw)
            }
        };
        self.sizes.insert(id, size);
        id
    }

    /// Mark `id` as no longer in use.
    pub fn release(&mut self, id: AreaId) {
        if self.sizes.remove(&id).is_none() {
            return;
        }
        if id.0 + 1 == self.next_id {
            self.next_id -= 1;
            // Fold trailing released ids back into the counter.
            while self.next_id > 1 && self.released.remove(&(self.next_id - 1)) {
                self.next_id -= 1;
            }
        } else {
            self.released.insert(id.0);
        }
    }

    /// Overwrite the size of a live area.
    pub fn set_size(&mut self, id: AreaId, size: u64) {
        if let Some(entry) = self.sizes.get_mut(&id) {
            *entry = size;
        }
    }

    /// Fold the `absorbed` areas into `surviving`, which grows by their
    /// sizes plus `extra` cells. Absorbed ids are released; relabelling
    /// their cells on the board is the caller's job.
    pub fn merge(&mut self, surviving: AreaId, absorbed: &[AreaId], extra: u64) -> u64 {
        let mut total = self.size(surviving) + extra;
        for &id in absorbed {
            if id != surviving {
                total += self.size(id);
                self.release(id);
            }
        }
        self.set_size(surviving, total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_dense() {
        let mut ledger = AreaLedger::new();
        assert_eq!(ledger.alloc(1), AreaId::new(1));
        assert_eq!(ledger.alloc(1), AreaId::new(2));
        assert_eq!(ledger.alloc(1), AreaId::new(3));
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_alloc_reuses_smallest_released() {
        let mut ledger = AreaLedger::new();
        for _ in 0..4 {
            ledger.alloc(1);
        }
        ledger.release(AreaId::new(3));
        ledger.release(AreaId::new(2));

        assert_eq!(ledger.peek_id(), AreaId::new(2));
        assert_eq!(ledger.alloc(5), AreaId::new(2));
        assert_eq!(ledger.alloc(5), AreaId::new(3));
        assert_eq!(ledger.alloc(5), AreaId::new(5));
    }

    #[test]
    fn test_release_trailing_ids_shrinks_counter() {
        let mut ledger = AreaLedger::new();
        for _ in 0..3 {
            ledger.alloc(1);
        }
        ledger.release(AreaId::new(2));
        ledger.release(AreaId::new(3));

        assert_eq!(ledger.peek_id(), AreaId::new(2));
        assert_eq!(ledger.alloc(1), AreaId::new(2));
        assert_eq!(ledger.alloc(1), AreaId::new(3));
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let mut ledger = AreaLedger::new();
        ledger.alloc(1);
        ledger.release(AreaId::new(9));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.peek_id(), AreaId::new(2));
    }

    #[test]
    fn test_merge_sums_sizes() {
        let mut ledger = AreaLedger::new();
        let a = ledger.alloc(4);
        let b = ledger.alloc(2);
        let c = ledger.alloc(3);

        let total = ledger.merge(a, &[b, c], 1);

        assert_eq!(total, 10);
        assert_eq!(ledger.size(a), 10);
        assert!(!ledger.is_live(b));
        assert!(!ledger.is_live(c));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_size(), 10);
    }

    #[test]
    fn test_merge_ignores_surviving_in_absorbed() {
        let mut ledger = AreaLedger::new();
        let a = ledger.alloc(4);
        assert_eq!(ledger.merge(a, &[a], 1), 5);
        assert!(ledger.is_live(a));
    }

    #[test]
    fn test_reserve() {
        let mut ledger = AreaLedger::new();
        assert!(ledger.reserve(16).is_ok());
        assert!(ledger.is_empty());
    }
}
