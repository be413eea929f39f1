//! Node pool: slot storage and intrusive links for the index-linked lists.
//!
//! # Layout
//! A pool of capacity `N` exposes `N + 3` logical slot indices:
//!
//! | Index | Role |
//! |-------|------|
//! | `0` | `head` sentinel, `next` is the first live slot |
//! | `1` | `tail` sentinel, `prev` is the last live slot |
//! | `2` | `reserved_head` sentinel, `next` is the first free slot |
//! | `3..N + 3` | data slots |
//!
//! The three sentinels only carry links, so they live in their own `[Links<I>; 3]`
//! and the data slots in parallel `links` / `payloads` arrays (Struct-of-Arrays).
//! [`SlotStore::links`] hides the split so list algorithms see one index space.
//!
//! Payloads are `MaybeUninit<T>`: a free slot holds no value, and the owner of the
//! store (the list) is responsible for dropping live payloads.

use core::mem::MaybeUninit;
use core::ops::Range;

use crate::IndexType;

/// Index of the `head` sentinel.
pub const HEAD: usize = 0;
/// Index of the `tail` sentinel.
pub const TAIL: usize = 1;
/// Index of the sentinel rooting the free chain.
pub const RESERVED_HEAD: usize = 2;
/// Number of sentinel slots; also the index of the first data slot.
pub const SENTINELS: usize = 3;

/// Maximum allowed size in bytes for an inline store. Prevents accidentally placing
/// huge pools on the call stack.
pub const MAX_STACK_SIZE: usize = 16 * 1024;

/// The intrusive links of one slot.
///
/// `live` is set while the slot holds a user element and is reachable from `head`.
/// A free slot always has `prev == 0` and `live == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links<I> {
    pub prev: I,
    pub next: I,
    pub live: bool,
}

impl<I: IndexType> Links<I> {
    /// Links of a slot that is not part of any chain.
    pub const UNLINKED: Self = Links {
        prev: I::ZERO,
        next: I::ZERO,
        live: false,
    };
}

/// Backing storage for an index-linked list.
///
/// Implementors only provide the raw parts; index resolution and the sentinel split
/// are handled by the provided methods. `grow` lets a heap store hand new slots to
/// the free-list allocator.
pub trait SlotStore {
    /// Element type held in the data slots.
    type Item;
    /// Integer type used for links.
    type Index: IndexType;

    /// Name used in diagnostics and in the `Display` rendering of the owning list.
    const NAME: &'static str;

    /// Number of data slots currently present.
    fn slot_count(&self) -> usize;

    /// Hard upper bound on the number of data slots.
    fn max_slots(&self) -> usize;

    /// Sentinel links, data-slot links and payloads.
    #[allow(clippy::type_complexity)]
    fn parts(
        &self,
    ) -> (
        &[Links<Self::Index>; SENTINELS],
        &[Links<Self::Index>],
        &[MaybeUninit<Self::Item>],
    );

    /// Mutable view of the same parts. The three borrows are disjoint.
    #[allow(clippy::type_complexity)]
    fn parts_mut(
        &mut self,
    ) -> (
        &mut [Links<Self::Index>; SENTINELS],
        &mut [Links<Self::Index>],
        &mut [MaybeUninit<Self::Item>],
    );

    /// Adds data slots and returns their logical indices, or `None` if the store
    /// cannot grow. New slots start [`Links::UNLINKED`].
    fn grow(&mut self) -> Option<Range<usize>> {
        None
    }

    /// An empty store with the same configuration (capacity limits) as `self`.
    fn fresh(&self) -> Self
    where
        Self: Sized;

    /// Links of the slot at logical index `idx`.
    #[inline]
    fn links(&self, idx: Self::Index) -> &Links<Self::Index> {
        let (sentinels, links, _) = self.parts();
        resolve(sentinels, links, idx)
    }

    #[inline]
    fn links_mut(&mut self, idx: Self::Index) -> &mut Links<Self::Index> {
        let (sentinels, links, _) = self.parts_mut();
        let i = idx.as_usize();
        if i < SENTINELS {
            &mut sentinels[i]
        } else {
            &mut links[i - SENTINELS]
        }
    }

    /// Payload of the data slot at logical index `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is a sentinel or out of range.
    #[inline]
    fn payload(&self, idx: Self::Index) -> &MaybeUninit<Self::Item> {
        &self.parts().2[idx.as_usize() - SENTINELS]
    }

    #[inline]
    fn payload_mut(&mut self, idx: Self::Index) -> &mut MaybeUninit<Self::Item> {
        &mut self.parts_mut().2[idx.as_usize() - SENTINELS]
    }
}

/// Resolves a logical index against split sentinel/data link arrays.
#[inline]
pub(crate) fn resolve<'a, I: IndexType>(
    sentinels: &'a [Links<I>; SENTINELS],
    links: &'a [Links<I>],
    idx: I,
) -> &'a Links<I> {
    let i = idx.as_usize();
    if i < SENTINELS {
        &sentinels[i]
    } else {
        &links[i - SENTINELS]
    }
}

/// A fixed pool of `N` data slots stored inline (no heap).
pub struct InlineStore<T, const N: usize, I: IndexType> {
    sentinels: [Links<I>; SENTINELS],
    links: [Links<I>; N],
    payloads: [MaybeUninit<T>; N],
}

impl<T, const N: usize, I: IndexType> InlineStore<T, N, I> {
    /// Creates a pool with every link cleared.
    ///
    /// # Panics (compile-time)
    /// Asserts that `N + 3` slots are addressable by `I` and that the pool fits in
    /// 16 KiB.
    pub fn new() -> Self {
        const {
            assert!(
                N <= I::MAX_SLOTS - SENTINELS,
                "capacity too large for the slot index type"
            );
            assert!(
                std::mem::size_of::<Self>() <= MAX_STACK_SIZE,
                "InlineStore is too large! Reduce N."
            );
        }
        Self {
            sentinels: [Links::UNLINKED; SENTINELS],
            links: [Links::UNLINKED; N],
            payloads: unsafe { MaybeUninit::uninit().assume_init() },
        }
    }
}

impl<T, const N: usize, I: IndexType> Default for InlineStore<T, N, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize, I: IndexType> SlotStore for InlineStore<T, N, I> {
    type Item = T;
    type Index = I;

    const NAME: &'static str = "StaticList";

    #[inline(always)]
    fn slot_count(&self) -> usize {
        N
    }

    #[inline(always)]
    fn max_slots(&self) -> usize {
        N
    }

    fn parts(&self) -> (&[Links<I>; SENTINELS], &[Links<I>], &[MaybeUninit<T>]) {
        (&self.sentinels, &self.links, &self.payloads)
    }

    fn parts_mut(
        &mut self,
    ) -> (
        &mut [Links<I>; SENTINELS],
        &mut [Links<I>],
        &mut [MaybeUninit<T>],
    ) {
        (&mut self.sentinels, &mut self.links, &mut self.payloads)
    }

    fn fresh(&self) -> Self {
        Self::new()
    }
}

/// A growable pool of data slots on the heap.
///
/// Grows by `len * 3 / 2 + 1` slots at a time, never past `limit` nor past what
/// the index type can address. Slots are never given back to the system; emptied
/// slots go back onto the free chain.
pub struct HeapStore<T, I: IndexType> {
    sentinels: [Links<I>; SENTINELS],
    links: Vec<Links<I>>,
    payloads: Vec<MaybeUninit<T>>,
    initial: usize,
    limit: usize,
}

impl<T, I: IndexType> HeapStore<T, I> {
    /// Creates a pool with `initial` preallocated slots and a hard limit of `limit`.
    pub fn new(initial: usize, limit: usize) -> Self {
        let limit = limit.min(I::MAX_SLOTS - SENTINELS);
        let initial = initial.min(limit);
        let mut payloads = Vec::with_capacity(initial);
        payloads.resize_with(initial, MaybeUninit::uninit);
        Self {
            sentinels: [Links::UNLINKED; SENTINELS],
            links: vec![Links::UNLINKED; initial],
            payloads,
            initial,
            limit,
        }
    }

    /// The hard slot limit.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<T, I: IndexType> SlotStore for HeapStore<T, I> {
    type Item = T;
    type Index = I;

    const NAME: &'static str = "DynamicList";

    #[inline(always)]
    fn slot_count(&self) -> usize {
        self.links.len()
    }

    #[inline(always)]
    fn max_slots(&self) -> usize {
        self.limit
    }

    fn parts(&self) -> (&[Links<I>; SENTINELS], &[Links<I>], &[MaybeUninit<T>]) {
        (&self.sentinels, &self.links, &self.payloads)
    }

    fn parts_mut(
        &mut self,
    ) -> (
        &mut [Links<I>; SENTINELS],
        &mut [Links<I>],
        &mut [MaybeUninit<T>],
    ) {
        (&mut self.sentinels, &mut self.links, &mut self.payloads)
    }

    fn grow(&mut self) -> Option<Range<usize>> {
        let old = self.links.len();
        let new = (old.saturating_mul(3) / 2 + 1).min(self.limit);
        if new <= old {
            return None;
        }
        self.links.resize(new, Links::UNLINKED);
        self.payloads.resize_with(new, MaybeUninit::uninit);
        log::debug!("{}: pool grown from {old} to {new} slots", Self::NAME);
        Some(old + SENTINELS..new + SENTINELS)
    }

    fn fresh(&self) -> Self {
        Self::new(self.initial, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_store_index_split() {
        let mut store: InlineStore<i32, 4, u8> = InlineStore::new();
        assert_eq!(store.slot_count(), 4);

        store.links_mut(TAIL as u8).prev = 5;
        store.links_mut(5).next = TAIL as u8;
        assert_eq!(store.links(TAIL as u8).prev, 5);
        assert_eq!(store.links(5).next, TAIL as u8);

        let (sentinels, links, _) = store.parts();
        assert_eq!(sentinels[TAIL].prev, 5);
        assert_eq!(links[2].next, TAIL as u8);
    }

    #[test]
    fn test_inline_store_payload_access() {
        let mut store: InlineStore<String, 2, u16> = InlineStore::new();
        store.payload_mut(3).write("a".to_string());
        assert_eq!(unsafe { store.payload(3).assume_init_ref() }, "a");
        unsafe { store.payload_mut(3).assume_init_drop() };
    }

    #[test]
    fn test_heap_store_growth_policy() {
        let mut store: HeapStore<i32, u32> = HeapStore::new(0, 10);
        assert_eq!(store.grow(), Some(3..4));
        assert_eq!(store.grow(), Some(4..5));
        assert_eq!(store.grow(), Some(5..7));
        assert_eq!(store.grow(), Some(7..10));
        assert_eq!(store.grow(), Some(10..13));
        assert_eq!(store.slot_count(), 10);
        assert_eq!(store.grow(), None);
    }

    #[test]
    fn test_heap_store_limit_clamped_to_index_type() {
        let store: HeapStore<i32, u8> = HeapStore::new(1000, usize::MAX);
        assert_eq!(store.limit(), 253);
        assert_eq!(store.slot_count(), 253);
    }
}
