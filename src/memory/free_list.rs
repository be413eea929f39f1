//! Free-list slot allocator.
//!
//! The free slots of a [`SlotStore`] form a singly-linked chain through their `next`
//! links, rooted at the `reserved_head` sentinel and terminated by index `0`. The
//! allocator itself owns no storage: it only counts live slots and edits links in the
//! store it is handed.
//!
//! # Slot state machine
//! ```text
//! Free --allocate--> Live --release--> Free
//! ```
//! A slot is never spliced into a list without passing through `allocate`, and
//! `release` refuses sentinels, out-of-range indices and slots that are already free.

use core::marker::PhantomData;
use core::ops::Range;

use super::node::{Links, RESERVED_HEAD, SENTINELS, SlotStore};
use crate::{CollectionError, IndexType};

/// Bookkeeping for the free chain of one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeList<I> {
    live: usize,
    _marker: PhantomData<I>,
}

impl<I: IndexType> Default for FreeList<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IndexType> FreeList<I> {
    /// Creates an allocator with no live slots. Call [`reset`](Self::reset) before
    /// first use to chain the store's slots.
    pub const fn new() -> Self {
        Self {
            live: 0,
            _marker: PhantomData,
        }
    }

    /// Marks every data slot of `store` free and chains them in index order.
    ///
    /// # Pseudo Code:
    /// ```text
    /// reserved_head.next = 3 (or 0 when the store has no slots)
    /// for each data slot i:
    ///     links[i] = { prev: 0, next: i + 1, live: false }
    /// links[last].next = 0
    /// live = 0
    /// ```
    pub fn reset<S: SlotStore<Index = I>>(&mut self, store: &mut S) {
        let (sentinels, links, _) = store.parts_mut();
        let count = links.len();
        for (offset, slot) in links.iter_mut().enumerate() {
            let next = if offset + 1 < count {
                I::from_usize(offset + SENTINELS + 1)
            } else {
                I::ZERO
            };
            *slot = Links {
                prev: I::ZERO,
                next,
                live: false,
            };
        }
        sentinels[RESERVED_HEAD] = Links {
            prev: I::ZERO,
            next: if count > 0 {
                I::from_usize(SENTINELS)
            } else {
                I::ZERO
            },
            live: false,
        };
        self.live = 0;
    }

    /// Pops the first free slot.
    ///
    /// When the chain is empty the store is asked to [`grow`](SlotStore::grow); a
    /// fixed store never does, and the call fails with `CapacityExceeded`.
    /// The returned slot has `prev == next == 0` and is marked live.
    pub fn allocate<S: SlotStore<Index = I>>(&mut self, store: &mut S) -> Result<I, CollectionError> {
        let reserved = I::from_usize(RESERVED_HEAD);
        let mut slot = store.links(reserved).next;
        if slot.is_zero() {
            match store.grow() {
                Some(fresh) => self.chain_fresh(store, fresh),
                None => {
                    log::trace!(
                        "{}: allocation refused, {} of {} slots live",
                        S::NAME,
                        self.live,
                        store.max_slots()
                    );
                    return Err(CollectionError::CapacityExceeded {
                        capacity: store.max_slots(),
                    });
                }
            }
            slot = store.links(reserved).next;
        }

        let next_free = store.links(slot).next;
        store.links_mut(reserved).next = next_free;
        *store.links_mut(slot) = Links {
            prev: I::ZERO,
            next: I::ZERO,
            live: true,
        };
        self.live += 1;
        log::trace!("{}: allocated slot {}", S::NAME, slot.as_usize());
        Ok(slot)
    }

    /// Pushes a live slot back onto the front of the free chain.
    ///
    /// The payload is not touched; the caller must have moved it out or dropped it.
    pub fn release<S: SlotStore<Index = I>>(
        &mut self,
        store: &mut S,
        slot: I,
    ) -> Result<(), CollectionError> {
        let index = slot.as_usize();
        if index < SENTINELS || index >= store.slot_count() + SENTINELS || !store.links(slot).live {
            log::warn!("{}: refusing to release slot {index}", S::NAME);
            return Err(CollectionError::InvalidSlot { index });
        }

        let reserved = I::from_usize(RESERVED_HEAD);
        let next_free = store.links(reserved).next;
        *store.links_mut(slot) = Links {
            prev: I::ZERO,
            next: next_free,
            live: false,
        };
        store.links_mut(reserved).next = slot;
        self.live -= 1;
        log::trace!("{}: released slot {index}", S::NAME);
        Ok(())
    }

    /// Splices an already detached run of `count` live slots, `first ..= last`
    /// linked through `next`, onto the front of the free chain.
    ///
    /// The splice itself is O(1); the slots' live flags and `prev` links are then
    /// cleared one by one.
    pub fn release_chain<S: SlotStore<Index = I>>(
        &mut self,
        store: &mut S,
        first: I,
        last: I,
        count: usize,
    ) {
        let reserved = I::from_usize(RESERVED_HEAD);
        let next_free = store.links(reserved).next;
        store.links_mut(last).next = next_free;
        store.links_mut(reserved).next = first;

        let mut cursor = first;
        for _ in 0..count {
            let links = store.links_mut(cursor);
            debug_assert!(links.live, "released chain contains a free slot");
            links.prev = I::ZERO;
            links.live = false;
            cursor = links.next;
        }
        self.live -= count;
        log::trace!("{}: released chain of {count} slots", S::NAME);
    }

    /// Number of live slots.
    #[inline(always)]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of free slots currently present in `store`.
    #[inline(always)]
    pub fn free_count<S: SlotStore<Index = I>>(&self, store: &S) -> usize {
        store.slot_count() - self.live
    }

    /// Walks the free chain from `reserved_head`, yielding slot indices.
    ///
    /// Unlike [`free_count`](Self::free_count), which is derived from the live count,
    /// this follows the actual links. The walk stops after `slot_count + 1` steps, so
    /// a cycle shows up as an over-long chain instead of a hang.
    pub fn free_chain<'a, S: SlotStore<Index = I>>(&self, store: &'a S) -> FreeChain<'a, S> {
        FreeChain {
            store,
            cursor: store.links(I::from_usize(RESERVED_HEAD)).next,
            budget: store.slot_count() + 1,
        }
    }

    /// Grows `store` until it holds at least `slots` data slots, chaining the new
    /// slots as free.
    pub fn reserve<S: SlotStore<Index = I>>(
        &mut self,
        store: &mut S,
        slots: usize,
    ) -> Result<(), CollectionError> {
        if slots > store.max_slots() {
            return Err(CollectionError::CapacityExceeded {
                capacity: store.max_slots(),
            });
        }
        while store.slot_count() < slots {
            match store.grow() {
                Some(fresh) => self.chain_fresh(store, fresh),
                None => {
                    return Err(CollectionError::CapacityExceeded {
                        capacity: store.slot_count(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Upper bound on live slots for `store`.
    #[inline(always)]
    pub fn max_objects<S: SlotStore<Index = I>>(&self, store: &S) -> usize {
        store.max_slots()
    }

    /// Chains freshly grown slots in front of the free chain.
    fn chain_fresh<S: SlotStore<Index = I>>(&mut self, store: &mut S, fresh: Range<usize>) {
        let reserved = I::from_usize(RESERVED_HEAD);
        for index in fresh.rev() {
            let slot = I::from_usize(index);
            let next_free = store.links(reserved).next;
            *store.links_mut(slot) = Links {
                prev: I::ZERO,
                next: next_free,
                live: false,
            };
            store.links_mut(reserved).next = slot;
        }
    }
}

/// Iterator over the free chain of a store; see [`FreeList::free_chain`].
pub struct FreeChain<'a, S: SlotStore> {
    store: &'a S,
    cursor: S::Index,
    budget: usize,
}

impl<S: SlotStore> Iterator for FreeChain<'_, S> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor.is_zero() || self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        let slot = self.cursor;
        self.cursor = self.store.links(slot).next;
        Some(slot.as_usize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::node::{HeapStore, InlineStore};

    fn free_chain<S: SlotStore>(store: &S) -> Vec<usize> {
        FreeList::<S::Index>::new().free_chain(store).collect()
    }

    #[test]
    fn test_reset_chains_every_slot() {
        let mut store: InlineStore<i32, 4, u8> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        assert_eq!(free_chain(&store), vec![3, 4, 5, 6]);
        assert_eq!(alloc.live_count(), 0);
        assert_eq!(alloc.free_count(&store), 4);
        assert_eq!(alloc.max_objects(&store), 4);
    }

    #[test]
    fn test_allocate_until_exhausted() {
        let mut store: InlineStore<i32, 3, u8> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);

        assert_eq!(alloc.allocate(&mut store), Ok(3));
        assert_eq!(alloc.allocate(&mut store), Ok(4));
        assert_eq!(alloc.allocate(&mut store), Ok(5));
        assert_eq!(
            alloc.allocate(&mut store),
            Err(CollectionError::CapacityExceeded { capacity: 3 })
        );
        assert_eq!(alloc.live_count(), 3);
        assert_eq!(alloc.free_count(&store), 0);
        assert!(store.links(4).live);
    }

    #[test]
    fn test_release_is_lifo() {
        let mut store: InlineStore<i32, 3, u16> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        let a = alloc.allocate(&mut store).unwrap();
        let b = alloc.allocate(&mut store).unwrap();

        alloc.release(&mut store, a).unwrap();
        assert_eq!(free_chain(&store), vec![3, 5]);
        assert_eq!(store.links(a).prev, 0);
        alloc.release(&mut store, b).unwrap();
        assert_eq!(free_chain(&store), vec![4, 3, 5]);
        assert_eq!(alloc.allocate(&mut store), Ok(b));
    }

    #[test]
    fn test_release_rejects_invalid_slots() {
        let mut store: InlineStore<i32, 2, u8> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        let a = alloc.allocate(&mut store).unwrap();

        assert_eq!(
            alloc.release(&mut store, 0),
            Err(CollectionError::InvalidSlot { index: 0 })
        );
        assert_eq!(
            alloc.release(&mut store, 5),
            Err(CollectionError::InvalidSlot { index: 5 })
        );
        // Slot 4 was never allocated.
        assert_eq!(
            alloc.release(&mut store, 4),
            Err(CollectionError::InvalidSlot { index: 4 })
        );
        alloc.release(&mut store, a).unwrap();
        assert_eq!(
            alloc.release(&mut store, a),
            Err(CollectionError::InvalidSlot { index: 3 })
        );
        assert_eq!(alloc.live_count(), 0);
        assert_eq!(free_chain(&store), vec![3, 4]);
    }

    #[test]
    fn test_release_chain_splices_in_front() {
        let mut store: InlineStore<i32, 4, u8> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        let a = alloc.allocate(&mut store).unwrap();
        let b = alloc.allocate(&mut store).unwrap();
        store.links_mut(a).next = b;
        store.links_mut(b).prev = a;

        alloc.release_chain(&mut store, a, b, 2);
        assert_eq!(free_chain(&store), vec![3, 4, 5, 6]);
        assert_eq!(alloc.live_count(), 0);
        assert!(!store.links(a).live);
        assert_eq!(store.links(b).prev, 0);
    }

    #[test]
    fn test_allocate_grows_heap_store() {
        let mut store: HeapStore<i32, u32> = HeapStore::new(1, 3);
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);

        assert_eq!(alloc.allocate(&mut store), Ok(3));
        assert_eq!(alloc.allocate(&mut store), Ok(4));
        assert_eq!(alloc.allocate(&mut store), Ok(5));
        assert_eq!(store.slot_count(), 3);
        assert_eq!(
            alloc.allocate(&mut store),
            Err(CollectionError::CapacityExceeded { capacity: 3 })
        );
    }

    #[test]
    fn test_free_chain_walk_is_bounded_on_cycle() {
        let mut store: InlineStore<i32, 3, u8> = InlineStore::new();
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        store.links_mut(5).next = 3;
        assert_eq!(alloc.free_chain(&store).count(), 4);
        // Arithmetic count cannot see the corruption; the walk does.
        assert_eq!(alloc.free_count(&store), 3);
    }

    #[test]
    fn test_reserve_chains_grown_slots() {
        let mut store: HeapStore<i32, u32> = HeapStore::new(1, 10);
        let mut alloc = FreeList::new();
        alloc.reset(&mut store);
        let a = alloc.allocate(&mut store).unwrap();

        alloc.reserve(&mut store, 5).unwrap();
        assert!(store.slot_count() >= 5);
        let chain = free_chain(&store);
        assert_eq!(chain.len(), store.slot_count() - 1);
        assert!(!chain.contains(&a.as_usize()));
        assert_eq!(
            alloc.reserve(&mut store, 11),
            Err(CollectionError::CapacityExceeded { capacity: 10 })
        );
    }
}
