//! The container seam the adapters are generic over.

use core::slice;

use crate::lists::{IndexList, Iter};
use crate::memory::SlotStore;
use crate::vecs::{DynamicArray, StaticArray};
use crate::CollectionError;

/// A sequence that can back a [`Deque`](super::Deque), [`Queue`](super::Queue) or
/// [`Stack`](super::Stack).
///
/// Implemented by [`StaticArray`], [`DynamicArray`] and both list flavours. Every
/// fallible operation keeps the error contract of the underlying container.
pub trait BackingContainer<T>: Default {
    /// Front-to-back iterator over the elements.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// Raises the capacity to at least `capacity`. Fixed containers only accept
    /// values they already satisfy.
    fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        if capacity <= self.capacity() {
            Ok(())
        } else {
            Err(CollectionError::CapacityExceeded {
                capacity: self.capacity(),
            })
        }
    }

    /// Releases spare capacity where the container can.
    fn trim_to_size(&mut self) {}

    fn add_front(&mut self, value: T) -> Result<(), CollectionError>;
    fn add_back(&mut self, value: T) -> Result<(), CollectionError>;
    fn pop_front(&mut self) -> Result<T, CollectionError>;
    fn pop_back(&mut self) -> Result<T, CollectionError>;
    fn front(&self) -> Result<&T, CollectionError>;
    fn back(&self) -> Result<&T, CollectionError>;

    /// Element at position `index`, counted from the front.
    fn get(&self, index: usize) -> Result<&T, CollectionError>;

    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq;

    /// Removes every element.
    fn empty(&mut self);

    fn iter<'a>(&'a self) -> Self::Iter<'a>
    where
        T: 'a;
}

impl<T, const N: usize> BackingContainer<T> for StaticArray<T, N> {
    type Iter<'a>
        = slice::Iter<'a, T>
    where
        T: 'a;

    fn len(&self) -> usize {
        StaticArray::len(self)
    }
    fn capacity(&self) -> usize {
        StaticArray::capacity(self)
    }
    fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        StaticArray::add_front(self, value)
    }
    fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        StaticArray::add_back(self, value)
    }
    fn pop_front(&mut self) -> Result<T, CollectionError> {
        StaticArray::pop_front(self)
    }
    fn pop_back(&mut self) -> Result<T, CollectionError> {
        StaticArray::pop_back(self)
    }
    fn front(&self) -> Result<&T, CollectionError> {
        StaticArray::front(self)
    }
    fn back(&self) -> Result<&T, CollectionError> {
        StaticArray::back(self)
    }
    fn get(&self, index: usize) -> Result<&T, CollectionError> {
        StaticArray::get(self, index)
    }
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        StaticArray::contains(self, value)
    }
    fn empty(&mut self) {
        StaticArray::empty(self)
    }
    fn iter<'a>(&'a self) -> Self::Iter<'a>
    where
        T: 'a,
    {
        StaticArray::iter(self)
    }
}

impl<T> BackingContainer<T> for DynamicArray<T> {
    type Iter<'a>
        = slice::Iter<'a, T>
    where
        T: 'a;

    fn len(&self) -> usize {
        DynamicArray::len(self)
    }
    fn capacity(&self) -> usize {
        DynamicArray::capacity(self)
    }
    fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        DynamicArray::reserve(self, capacity)
    }
    fn trim_to_size(&mut self) {
        DynamicArray::trim_to_size(self)
    }
    fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        DynamicArray::add_front(self, value)
    }
    fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        DynamicArray::add_back(self, value)
    }
    fn pop_front(&mut self) -> Result<T, CollectionError> {
        DynamicArray::pop_front(self)
    }
    fn pop_back(&mut self) -> Result<T, CollectionError> {
        DynamicArray::pop_back(self)
    }
    fn front(&self) -> Result<&T, CollectionError> {
        DynamicArray::front(self)
    }
    fn back(&self) -> Result<&T, CollectionError> {
        DynamicArray::back(self)
    }
    fn get(&self, index: usize) -> Result<&T, CollectionError> {
        DynamicArray::get(self, index)
    }
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        DynamicArray::contains(self, value)
    }
    fn empty(&mut self) {
        DynamicArray::empty(self)
    }
    fn iter<'a>(&'a self) -> Self::Iter<'a>
    where
        T: 'a,
    {
        DynamicArray::iter(self)
    }
}

impl<T, S> BackingContainer<T> for IndexList<S>
where
    S: SlotStore<Item = T> + Default,
{
    type Iter<'a>
        = Iter<'a, S>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        IndexList::len(self)
    }
    /// Slots currently in the pool. A heap-backed list grows past this on demand.
    fn capacity(&self) -> usize {
        IndexList::capacity(self)
    }
    fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        IndexList::reserve(self, capacity)
    }
    fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        IndexList::add_front(self, value)
    }
    fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        IndexList::add_back(self, value)
    }
    fn pop_front(&mut self) -> Result<T, CollectionError> {
        IndexList::pop_front(self)
    }
    fn pop_back(&mut self) -> Result<T, CollectionError> {
        IndexList::pop_back(self)
    }
    fn front(&self) -> Result<&T, CollectionError> {
        IndexList::front(self)
    }
    fn back(&self) -> Result<&T, CollectionError> {
        IndexList::back(self)
    }
    fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let len = IndexList::len(self);
        IndexList::iter(self).nth(index).ok_or_else(|| {
            log::warn!("{}: index {index} out of range for length {len}", S::NAME);
            CollectionError::IndexOutOfRange { index, len }
        })
    }
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        IndexList::contains(self, value)
    }
    fn empty(&mut self) {
        IndexList::empty(self)
    }
    fn iter<'a>(&'a self) -> Self::Iter<'a>
    where
        T: 'a,
    {
        IndexList::iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::{DynamicList, StaticList};

    fn exercise<C: BackingContainer<i32>>(mut c: C) {
        c.add_back(2).unwrap();
        c.add_front(1).unwrap();
        c.add_back(3).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.get(1), Ok(&2));
        assert_eq!(
            c.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(c.contains(&3));
        assert_eq!(c.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(c.pop_front(), Ok(1));
        assert_eq!(c.pop_back(), Ok(3));
        assert_eq!(c.front(), c.back());
        c.empty();
        assert!(c.is_empty());
        assert_eq!(c.pop_front(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_every_container_backs_adapters() {
        exercise(StaticArray::<i32, 4>::new());
        exercise(DynamicArray::<i32>::new());
        exercise(StaticList::<i32, 4>::new());
        exercise(DynamicList::<i32>::new());
    }

    #[test]
    fn test_reserve_on_fixed_container() {
        let mut arr = StaticArray::<i32, 4>::new();
        assert_eq!(BackingContainer::reserve(&mut arr, 4), Ok(()));
        assert_eq!(
            BackingContainer::reserve(&mut arr, 5),
            Err(CollectionError::CapacityExceeded { capacity: 4 })
        );
    }

    #[test]
    fn test_list_capacity_is_current_pool_size() {
        let mut list = DynamicList::<i32>::new();
        assert_eq!(BackingContainer::capacity(&list), 10);
        BackingContainer::reserve(&mut list, 25).unwrap();
        assert!(BackingContainer::capacity(&list) >= 25);

        let mut fixed = StaticList::<i32, 4>::new();
        assert_eq!(BackingContainer::capacity(&fixed), 4);
        assert_eq!(
            BackingContainer::reserve(&mut fixed, 5),
            Err(CollectionError::CapacityExceeded { capacity: 4 })
        );
    }
}
