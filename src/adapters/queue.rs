//! FIFO queue adapter.

use core::marker::PhantomData;
use core::mem;

use super::BackingContainer;
use crate::CollectionError;
use crate::lists::DynamicList;

/// A first-in first-out queue over any [`BackingContainer`], a [`DynamicList`] by
/// default.
///
/// New elements enter at the container's front and leave from its back, so the
/// container's back is always the oldest element.
pub struct Queue<T, C: BackingContainer<T> = DynamicList<T>> {
    container: C,
    _marker: PhantomData<T>,
}

impl<T, C: BackingContainer<T>> Queue<T, C> {
    pub fn new() -> Self {
        Self {
            container: C::default(),
            _marker: PhantomData,
        }
    }

    pub fn add(&mut self, value: T) -> Result<(), CollectionError> {
        self.container.add_front(value)
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.container.pop_back()
    }

    /// The oldest element.
    pub fn element(&self) -> Result<&T, CollectionError> {
        self.container.back()
    }

    /// Same as [`element`](Self::element).
    pub fn front(&self) -> Result<&T, CollectionError> {
        self.container.back()
    }

    /// Exchanges the contents of two queues.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.container, &mut other.container);
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// Current capacity of the backing container. Heap-backed ones grow on demand.
    pub fn capacity(&self) -> usize {
        self.container.capacity()
    }
}

impl<T, C: BackingContainer<T>> Default for Queue<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::StaticList;
    use crate::vecs::StaticArray;

    fn drain<C: BackingContainer<i32>>(queue: &mut Queue<i32, C>) -> Vec<i32> {
        core::iter::from_fn(|| queue.pop().ok()).collect()
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue: Queue<i32> = Queue::new();
        for i in 1..=5 {
            queue.add(i).unwrap();
        }
        assert_eq!(queue.element(), Ok(&1));
        assert_eq!(queue.front(), Ok(&1));
        assert_eq!(queue.len(), 5);
        assert_eq!(drain(&mut queue), vec![1, 2, 3, 4, 5]);
        assert_eq!(queue.pop(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_queue_over_fixed_backings() {
        let mut queue: Queue<i32, StaticList<i32, 3, u8>> = Queue::new();
        for i in 0..3 {
            queue.add(i).unwrap();
        }
        assert!(queue.add(3).is_err());
        assert_eq!(queue.capacity(), 3);
        assert_eq!(drain(&mut queue), vec![0, 1, 2]);

        let mut queue: Queue<i32, StaticArray<i32, 3>> = Queue::new();
        queue.add(7).unwrap();
        queue.add(8).unwrap();
        assert_eq!(drain(&mut queue), vec![7, 8]);
    }

    #[test]
    fn test_queue_swap() {
        let mut a: Queue<i32> = Queue::new();
        let mut b: Queue<i32> = Queue::new();
        a.add(1).unwrap();
        a.add(2).unwrap();
        b.add(9).unwrap();
        a.swap(&mut b);
        assert_eq!(drain(&mut a), vec![9]);
        assert_eq!(drain(&mut b), vec![1, 2]);
        assert!(a.is_empty());
    }
}
