//! Double-ended queue adapter.

use core::fmt;
use core::marker::PhantomData;

use super::BackingContainer;
use crate::CollectionError;
use crate::vecs::DynamicArray;

/// A double-ended queue over any [`BackingContainer`], a [`DynamicArray`] by default.
///
/// `add` and `pop` treat the deque as a FIFO queue: elements enter at the back and
/// leave from the front.
pub struct Deque<T, C: BackingContainer<T> = DynamicArray<T>> {
    container: C,
    _marker: PhantomData<T>,
}

impl<T, C: BackingContainer<T>> Deque<T, C> {
    pub fn new() -> Self {
        Self::with_container(C::default())
    }

    /// Wraps an existing container; its elements become the deque's, front first.
    pub fn with_container(container: C) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    pub fn into_inner(self) -> C {
        self.container
    }

    /// Same as [`add_back`](Self::add_back).
    pub fn add(&mut self, value: T) -> Result<(), CollectionError> {
        self.container.add_back(value)
    }

    pub fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        self.container.add_front(value)
    }

    pub fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        self.container.add_back(value)
    }

    /// Same as [`front`](Self::front).
    pub fn element(&self) -> Result<&T, CollectionError> {
        self.container.front()
    }

    pub fn front(&self) -> Result<&T, CollectionError> {
        self.container.front()
    }

    pub fn back(&self) -> Result<&T, CollectionError> {
        self.container.back()
    }

    /// Same as [`pop_front`](Self::pop_front).
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.container.pop_front()
    }

    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        self.container.pop_front()
    }

    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        self.container.pop_back()
    }

    pub fn empty(&mut self) {
        self.container.empty()
    }

    pub fn trim_to_size(&mut self) {
        self.container.trim_to_size()
    }

    pub fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        self.container.reserve(capacity)
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.container.get(index)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.container.contains(value)
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn capacity(&self) -> usize {
        self.container.capacity()
    }

    pub fn iter(&self) -> C::Iter<'_> {
        self.container.iter()
    }

    /// Prints the backing container's rendering on standard output.
    pub fn print(&self)
    where
        C: fmt::Display,
    {
        println!("{}", self.container);
    }
}

impl<T, C: BackingContainer<T>> Default for Deque<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: BackingContainer<T> + Clone> Clone for Deque<T, C> {
    fn clone(&self) -> Self {
        Self::with_container(self.container.clone())
    }
}

impl<T, C: BackingContainer<T> + fmt::Debug> fmt::Debug for Deque<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Deque").field(&self.container).finish()
    }
}

impl<T, C: BackingContainer<T> + fmt::Display> fmt::Display for Deque<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.container, f)
    }
}

impl<T, C, C2> PartialEq<Deque<T, C2>> for Deque<T, C>
where
    T: PartialEq,
    C: BackingContainer<T>,
    C2: BackingContainer<T>,
{
    fn eq(&self, other: &Deque<T, C2>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, C: BackingContainer<T>> FromIterator<T> for Deque<T, C> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut deque = Self::new();
        for value in iter {
            if deque.add_back(value).is_err() {
                break;
            }
        }
        deque
    }
}

impl<'a, T, C: BackingContainer<T>> IntoIterator for &'a Deque<T, C> {
    type Item = &'a T;
    type IntoIter = C::Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.container.iter()
    }
}
