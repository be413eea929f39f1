//! LIFO stack adapter.

use core::marker::PhantomData;
use core::mem;

use super::BackingContainer;
use crate::CollectionError;
use crate::lists::DynamicList;

/// A last-in first-out stack over any [`BackingContainer`], a [`DynamicList`] by
/// default. The top of the stack is the container's front.
pub struct Stack<T, C: BackingContainer<T> = DynamicList<T>> {
    container: C,
    _marker: PhantomData<T>,
}

impl<T, C: BackingContainer<T>> Stack<T, C> {
    pub fn new() -> Self {
        Self {
            container: C::default(),
            _marker: PhantomData,
        }
    }

    pub fn add(&mut self, value: T) -> Result<(), CollectionError> {
        self.container.add_front(value)
    }

    /// Removes and returns the most recently added element.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.container.pop_front()
    }

    pub fn top(&self) -> Result<&T, CollectionError> {
        self.container.front()
    }

    /// Exchanges the contents of two stacks.
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

impl<T, C: BackingContainer<T>> Default for Stack<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::StaticList;
    use crate::vecs::DynamicArray;

    #[test]
    fn test_stack_is_lifo() {
        let mut stack: Stack<i32> = Stack::new();
        for i in 1..=4 {
            stack.add(i).unwrap();
        }
        assert_eq!(stack.top(), Ok(&4));
        let popped: Vec<_> = core::iter::from_fn(|| stack.pop().ok()).collect();
        assert_eq!(popped, vec![4, 3, 2, 1]);
        assert_eq!(stack.top(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_stack_over_fixed_list() {
        let mut stack: Stack<&str, StaticList<&str, 2>> = Stack::new();
        stack.add("a").unwrap();
        stack.add("b").unwrap();
        assert!(stack.add("c").is_err());
        assert_eq!(stack.pop(), Ok("b"));
        stack.add("c").unwrap();
        assert_eq!(stack.pop(), Ok("c"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_stack_swap() {
        let mut a: Stack<i32, DynamicArray<i32>> = Stack::new();
        let mut b = Stack::new();
        a.add(1).unwrap();
        b.add(2).unwrap();
        b.add(3).unwrap();
        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.top(), Ok(&3));
        assert_eq!(b.top(), Ok(&1));
    }
}
