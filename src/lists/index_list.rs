//! Doubly-linked list over a slot store, linked by index instead of pointer.
//!
//! # Implementation details
//! - **Double sentinel**: `head` (index 0) and `tail` (index 1) are real link records,
//!   so every insert and unlink is the same four link writes with no boundary branch.
//! - **Free-list allocator**: every add obtains its slot from [`FreeList::allocate`] and
//!   every removal hands it back with [`FreeList::release`]; `empty` returns the whole
//!   live chain in one splice.
//! - **Pluggable storage**: the same engine runs over an inline pool
//!   ([`StaticList`](crate::StaticList)) and a growable heap pool
//!   ([`DynamicList`](crate::DynamicList)).

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};

use crate::memory::node::{HEAD, Links, SENTINELS, TAIL, resolve};
use crate::memory::{FreeChain, FreeList, HeapStore, InlineStore, SlotStore};
use crate::{CollectionError, IndexType};

/// An index-linked doubly-linked list over the slot store `S`.
///
/// Use it through the [`StaticList`](crate::StaticList) and
/// [`DynamicList`](crate::DynamicList) aliases.
pub struct IndexList<S: SlotStore> {
    store: S,
    allocator: FreeList<S::Index>,
    len: usize,
}

#[inline(always)]
fn at<I: IndexType>(index: usize) -> I {
    I::from_usize(index)
}

impl<S: SlotStore + Default> IndexList<S> {
    /// Creates an empty list over a default-configured store.
    pub fn new() -> Self {
        Self::with_store(S::default())
    }

    /// Copies `other` element by element, failing without copying anything if it is
    /// longer than this list can ever hold.
    pub fn try_from_list<S2>(other: &IndexList<S2>) -> Result<Self, CollectionError>
    where
        S2: SlotStore<Item = S::Item>,
        S::Item: Clone,
    {
        let mut list = Self::new();
        if other.len() > list.max_capacity() {
            log::warn!(
                "{}: cannot copy {} elements into capacity {}",
                S::NAME,
                other.len(),
                list.max_capacity()
            );
            return Err(CollectionError::CapacityExceeded {
                capacity: list.max_capacity(),
            });
        }
        for value in other.iter() {
            list.add_back(value.clone())?;
        }
        Ok(list)
    }

    /// Copies `other` element by element, stopping once this list is full.
    pub fn from_list_truncating<S2>(other: &IndexList<S2>) -> Self
    where
        S2: SlotStore<Item = S::Item>,
        S::Item: Clone,
    {
        let mut list = Self::new();
        let copied = other
            .iter()
            .take(list.max_capacity())
            .map(|value| list.add_back(value.clone()))
            .take_while(Result::is_ok)
            .count();
        if copied < other.len() {
            log::warn!(
                "{}: copy truncated to {copied} of {} elements",
                S::NAME,
                other.len()
            );
        }
        list
    }
}

impl<S: SlotStore> IndexList<S> {
    /// Creates an empty list over `store`, chaining all of its slots as free.
    ///
    /// # Pseudo Code:
    /// ```text
    /// allocator.reset(store)       // reserved_head -> 3 -> 4 -> ... -> 0
    /// head = { prev: 0, next: TAIL }
    /// tail = { prev: HEAD, next: 0 }
    /// len = 0
    /// ```
    pub fn with_store(mut store: S) -> Self {
        let mut allocator = FreeList::new();
        allocator.reset(&mut store);
        let mut list = Self {
            store,
            allocator,
            len: 0,
        };
        list.wire_sentinels();
        list
    }

    /// Returns the number of elements in the list.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of data slots currently in the pool (live plus free).
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.store.slot_count()
    }

    /// The most elements the list can ever hold.
    #[inline(always)]
    pub fn max_capacity(&self) -> usize {
        self.store.max_slots()
    }

    /// Slots the allocator currently counts as live.
    #[inline(always)]
    pub fn live_slots(&self) -> usize {
        self.allocator.live_count()
    }

    /// Slots currently sitting on the free chain.
    #[inline(always)]
    pub fn free_slots(&self) -> usize {
        self.allocator.free_count(&self.store)
    }

    /// Free slot indices, walked along the allocator's free chain.
    ///
    /// Meant for consistency checks: a healthy list yields exactly
    /// `capacity() - len()` distinct data-slot indices.
    pub fn free_chain(&self) -> FreeChain<'_, S> {
        self.allocator.free_chain(&self.store)
    }

    /// Grows the slot pool to at least `capacity` slots. Fixed pools only accept
    /// values they already satisfy.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        self.allocator
            .reserve(&mut self.store, capacity)
            .inspect_err(|err| log::warn!("{}: cannot reserve {capacity}, {err}", S::NAME))
    }

    /// Prepends an element.
    ///
    /// Fails with `CapacityExceeded` when no slot can be allocated; the list is
    /// unchanged and `value` is dropped.
    pub fn add_front(&mut self, value: S::Item) -> Result<(), CollectionError> {
        let slot = self.acquire(value)?;
        self.link_after(slot, at(HEAD));
        Ok(())
    }

    /// Appends an element.
    ///
    /// Fails with `CapacityExceeded` when no slot can be allocated; the list is
    /// unchanged and `value` is dropped.
    pub fn add_back(&mut self, value: S::Item) -> Result<(), CollectionError> {
        let slot = self.acquire(value)?;
        let last = self.store.links(at(TAIL)).prev;
        self.link_after(slot, last);
        Ok(())
    }

    /// Inserts clones of `other`'s elements, in order, at the front.
    ///
    /// All or nothing: fails with `CapacityExceeded` before touching the list if the
    /// elements would not all fit.
    pub fn append_front<'a, It>(&mut self, other: It) -> Result<(), CollectionError>
    where
        It: IntoIterator<Item = &'a S::Item>,
        It::IntoIter: ExactSizeIterator,
        S::Item: Clone + 'a,
    {
        let values = other.into_iter();
        self.check_room(values.len())?;
        let mut anchor = at(HEAD);
        for value in values {
            let slot = self.acquire(value.clone())?;
            self.link_after(slot, anchor);
            anchor = slot;
        }
        Ok(())
    }

    /// Appends clones of `other`'s elements, in order, at the back.
    ///
    /// All or nothing, like [`append_front`](Self::append_front).
    pub fn append_back<'a, It>(&mut self, other: It) -> Result<(), CollectionError>
    where
        It: IntoIterator<Item = &'a S::Item>,
        It::IntoIter: ExactSizeIterator,
        S::Item: Clone + 'a,
    {
        let values = other.into_iter();
        self.check_room(values.len())?;
        for value in values {
            self.add_back(value.clone())?;
        }
        Ok(())
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Result<&S::Item, CollectionError> {
        let first = self.first_live("front")?;
        Ok(unsafe { self.store.payload(first).assume_init_ref() })
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Result<&S::Item, CollectionError> {
        let last = self.last_live("back")?;
        Ok(unsafe { self.store.payload(last).assume_init_ref() })
    }

    pub fn front_mut(&mut self) -> Result<&mut S::Item, CollectionError> {
        let first = self.first_live("front_mut")?;
        Ok(unsafe { self.store.payload_mut(first).assume_init_mut() })
    }

    pub fn back_mut(&mut self) -> Result<&mut S::Item, CollectionError> {
        let last = self.last_live("back_mut")?;
        Ok(unsafe { self.store.payload_mut(last).assume_init_mut() })
    }

    /// Removes and returns the first element, releasing its slot.
    pub fn pop_front(&mut self) -> Result<S::Item, CollectionError> {
        let first = self.first_live("pop_front")?;
        Ok(self.unlink(first))
    }

    /// Removes and returns the last element, releasing its slot.
    pub fn pop_back(&mut self) -> Result<S::Item, CollectionError> {
        let last = self.last_live("pop_back")?;
        Ok(self.unlink(last))
    }

    /// Removes the first element equal to `value`. Returns `true` if one was found.
    pub fn search_remove(&mut self, value: &S::Item) -> bool
    where
        S::Item: PartialEq,
    {
        match self.find(value) {
            Some(slot) => {
                drop(self.unlink(slot));
                true
            }
            None => false,
        }
    }

    /// For every element of `other`, removes the first equal element of this list if
    /// there is one. Returns `true` if at least one element was removed.
    pub fn remove_all<'a, It>(&mut self, other: It) -> bool
    where
        It: IntoIterator<Item = &'a S::Item>,
        S::Item: PartialEq + 'a,
    {
        let mut removed = false;
        for value in other {
            removed |= self.search_remove(value);
        }
        removed
    }

    /// Returns `true` if an element equal to `value` is in the list.
    pub fn contains(&self, value: &S::Item) -> bool
    where
        S::Item: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Removes every element and returns all slots to the allocator.
    ///
    /// # Pseudo Code:
    /// ```text
    /// if len == 0: return
    /// first = head.next, last = tail.prev
    /// last.next = reserved_head.next       // live chain now leads into the free chain
    /// reserved_head.next = first
    /// head.next = TAIL, tail.prev = HEAD
    /// drop the payloads of the `len` slots starting at `first`
    /// len = 0
    /// ```
    pub fn empty(&mut self) {
        let count = self.len;
        if count == 0 {
            return;
        }
        let first = self.store.links(at(HEAD)).next;
        let last = self.store.links(at(TAIL)).prev;
        self.allocator
            .release_chain(&mut self.store, first, last, count);
        self.wire_sentinels();
        self.len = 0;

        if mem::needs_drop::<S::Item>() {
            let mut cursor = first;
            for _ in 0..count {
                let next = self.store.links(cursor).next;
                unsafe { self.store.payload_mut(cursor).assume_init_drop() };
                cursor = next;
            }
        }
    }

    /// Returns `true` if this list holds more elements than `other`.
    pub fn longer_than<S2: SlotStore>(&self, other: &IndexList<S2>) -> bool {
        self.len > other.len()
    }

    /// Returns `true` if this list holds fewer elements than `other`.
    pub fn shorter_than<S2: SlotStore>(&self, other: &IndexList<S2>) -> bool {
        self.len < other.len()
    }

    /// Prints the list as `Name[a,b,c]` on standard output.
    pub fn print(&self)
    where
        S::Item: fmt::Display,
    {
        println!("{self}");
    }

    /// Iterates front to back; call `.rev()` for back to front.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            store: &self.store,
            front: self.store.links(at(HEAD)).next,
            back: self.store.links(at(TAIL)).prev,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, S> {
        let remaining = self.len;
        let (sentinels, links, payloads) = self.store.parts_mut();
        let front = sentinels[HEAD].next;
        let back = sentinels[TAIL].prev;
        IterMut {
            sentinels,
            links,
            payloads: payloads.as_mut_ptr(),
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }

    fn wire_sentinels(&mut self) {
        *self.store.links_mut(at(HEAD)) = Links {
            prev: S::Index::ZERO,
            next: at(TAIL),
            live: false,
        };
        *self.store.links_mut(at(TAIL)) = Links {
            prev: at(HEAD),
            next: S::Index::ZERO,
            live: false,
        };
    }

    fn check_room(&self, additional: usize) -> Result<(), CollectionError> {
        if additional > self.store.max_slots().saturating_sub(self.len) {
            log::warn!(
                "{}: cannot append {additional} elements, {} of {} used",
                S::NAME,
                self.len,
                self.store.max_slots()
            );
            return Err(CollectionError::CapacityExceeded {
                capacity: self.store.max_slots(),
            });
        }
        Ok(())
    }

    /// Allocates a slot and moves `value` into it. The slot is not linked yet.
    fn acquire(&mut self, value: S::Item) -> Result<S::Index, CollectionError> {
        match self.allocator.allocate(&mut self.store) {
            Ok(slot) => {
                self.store.payload_mut(slot).write(value);
                Ok(slot)
            }
            Err(err) => {
                log::warn!("{}: add rejected, {err}", S::NAME);
                Err(err)
            }
        }
    }

    /// Splices `slot` in directly after `anchor`.
    fn link_after(&mut self, slot: S::Index, anchor: S::Index) {
        let after = self.store.links(anchor).next;
        let links = self.store.links_mut(slot);
        links.prev = anchor;
        links.next = after;
        self.store.links_mut(anchor).next = slot;
        self.store.links_mut(after).prev = slot;
        self.len += 1;
    }

    /// Splices out a live slot, moves its payload out and releases the slot.
    fn unlink(&mut self, slot: S::Index) -> S::Item {
        let Links { prev, next, .. } = *self.store.links(slot);
        self.store.links_mut(prev).next = next;
        self.store.links_mut(next).prev = prev;
        let value = unsafe { self.store.payload(slot).assume_init_read() };
        let released = self.allocator.release(&mut self.store, slot);
        debug_assert!(released.is_ok(), "unlinked slot was not live");
        self.len -= 1;
        value
    }

    fn first_live(&self, op: &str) -> Result<S::Index, CollectionError> {
        if self.len == 0 {
            log::warn!("{}::{op} on an empty list", S::NAME);
            return Err(CollectionError::EmptyContainer);
        }
        Ok(self.store.links(at(HEAD)).next)
    }

    fn last_live(&self, op: &str) -> Result<S::Index, CollectionError> {
        if self.len == 0 {
            log::warn!("{}::{op} on an empty list", S::NAME);
            return Err(CollectionError::EmptyContainer);
        }
        Ok(self.store.links(at(TAIL)).prev)
    }

    fn find(&self, value: &S::Item) -> Option<S::Index>
    where
        S::Item: PartialEq,
    {
        let tail: S::Index = at(TAIL);
        let mut cursor = self.store.links(at(HEAD)).next;
        while cursor != tail {
            if unsafe { self.store.payload(cursor).assume_init_ref() } == value {
                return Some(cursor);
            }
            cursor = self.store.links(cursor).next;
        }
        None
    }
}

impl<T, I: IndexType> IndexList<HeapStore<T, I>> {
    /// Creates an empty heap-backed list with `capacity` preallocated slots and no
    /// upper bound beyond what `I` can address.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_store(HeapStore::new(capacity, usize::MAX))
    }

    /// Creates an empty heap-backed list that never holds more than `max` elements.
    pub fn with_max_capacity(max: usize) -> Self {
        Self::with_store(HeapStore::new(super::DEFAULT_CAPACITY.min(max), max))
    }
}

impl<T, I: IndexType> Default for HeapStore<T, I> {
    fn default() -> Self {
        HeapStore::new(super::DEFAULT_CAPACITY, usize::MAX)
    }
}

impl<S: SlotStore + Default> Default for IndexList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SlotStore> Drop for IndexList<S> {
    fn drop(&mut self) {
        if !mem::needs_drop::<S::Item>() {
            return;
        }
        let mut cursor = self.store.links(at(HEAD)).next;
        for _ in 0..self.len {
            let next = self.store.links(cursor).next;
            unsafe { self.store.payload_mut(cursor).assume_init_drop() };
            cursor = next;
        }
    }
}

impl<S: SlotStore> Clone for IndexList<S>
where
    S::Item: Clone,
{
    fn clone(&self) -> Self {
        let mut list = Self::with_store(self.store.fresh());
        for value in self.iter() {
            let copied = list.add_back(value.clone());
            debug_assert!(copied.is_ok(), "fresh store rejected a clone");
        }
        list
    }
}

impl<T, const N: usize, I: IndexType, const M: usize> From<[T; M]> for IndexList<InlineStore<T, N, I>> {
    /// Builds a list from an array literal, checked at compile time to fit.
    fn from(values: [T; M]) -> Self {
        const {
            assert!(M <= N, "too many elements for the list capacity");
        }
        let mut list = Self::new();
        for value in values {
            let added = list.add_back(value);
            debug_assert!(added.is_ok());
        }
        list
    }
}

impl<T, I: IndexType, const M: usize> From<[T; M]> for IndexList<HeapStore<T, I>> {
    fn from(values: [T; M]) -> Self {
        let mut list = Self::with_capacity(M);
        list.extend(values);
        list
    }
}

impl<S: SlotStore> Extend<S::Item> for IndexList<S> {
    /// Appends until the first rejected element; the rest of `iter` is not consumed.
    fn extend<It: IntoIterator<Item = S::Item>>(&mut self, iter: It) {
        for value in iter {
            if self.add_back(value).is_err() {
                break;
            }
        }
    }
}

impl<S: SlotStore + Default> FromIterator<S::Item> for IndexList<S> {
    fn from_iter<It: IntoIterator<Item = S::Item>>(iter: It) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<S, S2> PartialEq<IndexList<S2>> for IndexList<S>
where
    S: SlotStore,
    S2: SlotStore,
    S::Item: PartialEq<S2::Item>,
{
    fn eq(&self, other: &IndexList<S2>) -> bool {
        self.len == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<S: SlotStore> Eq for IndexList<S> where S::Item: Eq {}

impl<S: SlotStore> PartialOrd for IndexList<S>
where
    S::Item: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<S: SlotStore> Ord for IndexList<S>
where
    S::Item: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<S: SlotStore> Hash for IndexList<S>
where
    S::Item: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<S: SlotStore> fmt::Debug for IndexList<S>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: SlotStore> fmt::Display for IndexList<S>
where
    S::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", S::NAME)?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Borrowing iterator over an [`IndexList`].
pub struct Iter<'a, S: SlotStore> {
    store: &'a S,
    front: S::Index,
    back: S::Index,
    remaining: usize,
}

impl<S: SlotStore> Clone for Iter<'_, S> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, S: SlotStore> Iterator for Iter<'a, S> {
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front;
        self.front = self.store.links(slot).next;
        self.remaining -= 1;
        Some(unsafe { self.store.payload(slot).assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: SlotStore> DoubleEndedIterator for Iter<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back;
        self.back = self.store.links(slot).prev;
        self.remaining -= 1;
        Some(unsafe { self.store.payload(slot).assume_init_ref() })
    }
}

impl<S: SlotStore> ExactSizeIterator for Iter<'_, S> {}
impl<S: SlotStore> FusedIterator for Iter<'_, S> {}

/// Mutably borrowing iterator over an [`IndexList`].
///
/// Links are read through shared borrows of the link arrays; payloads are reached
/// through a raw pointer so each yielded `&mut` covers exactly one slot.
pub struct IterMut<'a, S: SlotStore> {
    sentinels: &'a [Links<S::Index>; SENTINELS],
    links: &'a [Links<S::Index>],
    payloads: *mut MaybeUninit<S::Item>,
    front: S::Index,
    back: S::Index,
    remaining: usize,
    _marker: PhantomData<&'a mut S::Item>,
}

impl<'a, S: SlotStore> IterMut<'a, S> {
    #[inline]
    unsafe fn payload(&self, slot: S::Index) -> &'a mut S::Item {
        unsafe { (*self.payloads.add(slot.as_usize() - SENTINELS)).assume_init_mut() }
    }
}

impl<'a, S: SlotStore> Iterator for IterMut<'a, S> {
    type Item = &'a mut S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front;
        self.front = resolve(self.sentinels, self.links, slot).next;
        self.remaining -= 1;
        Some(unsafe { self.payload(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: SlotStore> DoubleEndedIterator for IterMut<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back;
        self.back = resolve(self.sentinels, self.links, slot).prev;
        self.remaining -= 1;
        Some(unsafe { self.payload(slot) })
    }
}

impl<S: SlotStore> ExactSizeIterator for IterMut<'_, S> {}
impl<S: SlotStore> FusedIterator for IterMut<'_, S> {}

/// Owning iterator over an [`IndexList`].
pub struct IntoIter<S: SlotStore> {
    list: IndexList<S>,
}

impl<S: SlotStore> Iterator for IntoIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.list.is_empty() {
            return None;
        }
        let first = self.list.store.links(at(HEAD)).next;
        Some(self.list.unlink(first))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<S: SlotStore> DoubleEndedIterator for IntoIter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.list.is_empty() {
            return None;
        }
        let last = self.list.store.links(at(TAIL)).prev;
        Some(self.list.unlink(last))
    }
}

impl<S: SlotStore> ExactSizeIterator for IntoIter<S> {}

impl<S: SlotStore> IntoIterator for IndexList<S> {
    type Item = S::Item;
    type IntoIter = IntoIter<S>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, S: SlotStore> IntoIterator for &'a IndexList<S> {
    type Item = &'a S::Item;
    type IntoIter = Iter<'a, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: SlotStore> IntoIterator for &'a mut IndexList<S> {
    type Item = &'a mut S::Item;
    type IntoIter = IterMut<'a, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
