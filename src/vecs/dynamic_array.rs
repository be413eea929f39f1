//! Heap-backed array with an explicit growth policy and an optional hard limit.
//!
//! [`DynamicArray`] keeps the [`StaticArray`](super::StaticArray) operation set and
//! error contract but stores its elements in a `Vec`. The logical capacity grows by
//! `cap * 3 / 2 + 1` whenever an add finds the array full, never past
//! `max_capacity`.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice;

use crate::CollectionError;

/// Initial capacity of a [`DynamicArray`] created with `new`.
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Clone)]
pub struct DynamicArray<T> {
    data: Vec<T>,
    capacity: usize,
    max_capacity: usize,
}

impl<T> DynamicArray<T> {
    const NAME: &'static str = "DynamicArray";

    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements and no upper bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            max_capacity: usize::MAX,
        }
    }

    /// Creates an empty array that never holds more than `max` elements.
    pub fn with_max_capacity(max: usize) -> Self {
        let capacity = DEFAULT_CAPACITY.min(max);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            max_capacity: max,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current logical capacity; grows on demand.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Raises the capacity to at least `capacity`.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), CollectionError> {
        if capacity <= self.capacity {
            return Ok(());
        }
        if capacity > self.max_capacity {
            log::warn!(
                "{}: cannot reserve {capacity}, limit is {}",
                Self::NAME,
                self.max_capacity
            );
            return Err(CollectionError::CapacityExceeded {
                capacity: self.max_capacity,
            });
        }
        self.set_capacity(capacity);
        Ok(())
    }

    /// Shrinks the capacity to the current length.
    pub fn trim_to_size(&mut self) {
        self.data.shrink_to_fit();
        self.capacity = self.data.len();
    }

    pub fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        self.make_room(1)?;
        self.data.push(value);
        Ok(())
    }

    pub fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        self.add(0, value)
    }

    /// Inserts `value` at `index`, shifting later elements one place right.
    pub fn add(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        self.check_insert_index(index)?;
        self.make_room(1)?;
        self.data.insert(index, value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.check_index(index)?;
        Ok(&self.data[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        self.check_index(index)?;
        Ok(&mut self.data[index])
    }

    pub fn front(&self) -> Result<&T, CollectionError> {
        self.check_not_empty("front")?;
        self.get(0)
    }

    pub fn back(&self) -> Result<&T, CollectionError> {
        self.check_not_empty("back")?;
        self.get(self.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        self.check_index(index)?;
        Ok(self.data.remove(index))
    }

    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        self.check_not_empty("pop_front")?;
        self.remove(0)
    }

    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        self.data.pop().ok_or_else(|| {
            log::warn!("{}::pop_back on an empty array", Self::NAME);
            CollectionError::EmptyContainer
        })
    }

    /// Removes the elements `from ..= to`.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        if from > to {
            log::warn!("{}: remove_range start {from} is past end {to}", Self::NAME);
            return Err(CollectionError::IndexOutOfRange {
                index: from,
                len: self.len(),
            });
        }
        self.check_index(to)?;
        self.data.drain(from..=to);
        Ok(())
    }

    pub fn search_remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => {
                self.data.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_all<'a, It>(&mut self, other: It) -> bool
    where
        It: IntoIterator<Item = &'a T>,
        T: PartialEq + 'a,
    {
        let mut removed = false;
        for value in other {
            removed |= self.search_remove(value);
        }
        removed
    }

    /// Inserts clones of `other` as one contiguous block starting at `index`.
    pub fn append(&mut self, index: usize, other: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.check_insert_index(index)?;
        self.make_room(other.len())?;
        self.data.splice(index..index, other.iter().cloned());
        Ok(())
    }

    pub fn append_front(&mut self, other: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.append(0, other)
    }

    pub fn append_back(&mut self, other: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.append(self.len(), other)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.contains(value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|x| x == value)
    }

    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().rposition(|x| x == value)
    }

    /// Drops every element. The capacity is kept.
    pub fn empty(&mut self) {
        self.data.clear();
    }

    pub fn longer_than(&self, other: &DynamicArray<T>) -> bool {
        self.len() > other.len()
    }

    pub fn shorter_than(&self, other: &DynamicArray<T>) -> bool {
        self.len() < other.len()
    }

    /// Prints the array as `DynamicArray[a,b,c]` on standard output.
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        println!("{self}");
    }

    /// Ensures `additional` more elements fit, growing by `cap * 3 / 2 + 1` steps.
    ///
    /// # Pseudo Code:
    /// ```text
    /// needed = len + additional
    /// if needed > max_capacity: fail
    /// while capacity < needed: capacity = min(capacity * 3 / 2 + 1, max_capacity)
    /// ```
    fn make_room(&mut self, additional: usize) -> Result<(), CollectionError> {
        let needed = self.len().saturating_add(additional);
        if needed <= self.capacity {
            return Ok(());
        }
        if needed > self.max_capacity {
            log::warn!(
                "{}: cannot add {additional} elements, {} of {} used",
                Self::NAME,
                self.len(),
                self.max_capacity
            );
            return Err(CollectionError::CapacityExceeded {
                capacity: self.max_capacity,
            });
        }
        let mut capacity = self.capacity;
        while capacity < needed {
            capacity = (capacity.saturating_mul(3) / 2 + 1).min(self.max_capacity);
        }
        log::debug!("{}: grown from {} to {capacity}", Self::NAME, self.capacity);
        self.set_capacity(capacity);
        Ok(())
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.data.reserve_exact(capacity - self.data.len());
        self.capacity = capacity;
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        if index >= self.len() {
            log::warn!("{}: index {index} out of range for length {}", Self::NAME, self.len());
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<(), CollectionError> {
        if index > self.len() {
            log::warn!("{}: insert position {index} past length {}", Self::NAME, self.len());
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    fn check_not_empty(&self, op: &str) -> Result<(), CollectionError> {
        if self.data.is_empty() {
            log::warn!("{}::{op} on an empty array", Self::NAME);
            return Err(CollectionError::EmptyContainer);
        }
        Ok(())
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        match self.data.get(index) {
            Some(value) => value,
            None => panic!("DynamicArray index {index} out of range for length {}", self.len()),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.data.get_mut(index) {
            Some(value) => value,
            None => panic!("DynamicArray index {index} out of range for length {len}"),
        }
    }
}

impl<T, const M: usize> From<[T; M]> for DynamicArray<T> {
    fn from(values: [T; M]) -> Self {
        Self {
            data: Vec::from(values),
            capacity: M,
            max_capacity: usize::MAX,
        }
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
            capacity: values.len(),
            max_capacity: usize::MAX,
        }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for value in iter {
            if self.add_back(value).is_err() {
                break;
            }
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let data: Vec<T> = iter.into_iter().collect();
        Self {
            capacity: data.len().max(DEFAULT_CAPACITY),
            data,
            max_capacity: usize::MAX,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.data, f)
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", Self::NAME)?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: PartialEq<U>, U> PartialEq<DynamicArray<U>> for DynamicArray<T> {
    fn eq(&self, other: &DynamicArray<U>) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.data.partial_cmp(&other.data)
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.data.cmp(&other.data)
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
