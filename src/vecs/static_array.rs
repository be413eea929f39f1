//! Contiguous array with a compile-time capacity that never touches the heap.
//!
//! [`StaticArray`] stores up to `N` elements in a `[MaybeUninit<T>; N]`. Inserting or
//! removing in the middle shifts the tail with `ptr::copy`; every operation that
//! would exceed `N` or address a missing element returns a [`CollectionError`]
//! instead of panicking, and leaves the array unchanged.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem::{ManuallyDrop, MaybeUninit};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice;

use crate::CollectionError;
use crate::memory::node::MAX_STACK_SIZE;

pub struct StaticArray<T, const N: usize> {
    len: usize,
    data: [MaybeUninit<T>; N],
}

impl<T, const N: usize> StaticArray<T, N> {
    const NAME: &'static str = "StaticArray";

    pub fn new() -> Self {
        const {
            assert!(
                std::mem::size_of::<Self>() <= MAX_STACK_SIZE,
                "StaticArray is too large! Reduce N."
            );
        }
        Self {
            len: 0,
            data: unsafe { MaybeUninit::uninit().assume_init() },
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr() as *const T, self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr() as *mut T, self.len) }
    }

    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr() as *mut T
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    #[inline(always)]
    pub fn add_back(&mut self, value: T) -> Result<(), CollectionError> {
        self.check_room(1)?;
        unsafe { ptr::write(self.as_mut_ptr().add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    pub fn add_front(&mut self, value: T) -> Result<(), CollectionError> {
        self.add(0, value)
    }

    /// Inserts `value` at `index`, shifting later elements one place right.
    ///
    /// `index == len` appends.
    pub fn add(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        self.check_insert_index(index)?;
        self.check_room(1)?;
        unsafe {
            let ptr = self.as_mut_ptr();
            ptr::copy(ptr.add(index), ptr.add(index + 1), self.len - index);
            ptr::write(ptr.add(index), value);
        }
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.check_index(index)?;
        Ok(unsafe { &*(self.data.as_ptr() as *const T).add(index) })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        self.check_index(index)?;
        Ok(unsafe { &mut *self.as_mut_ptr().add(index) })
    }

    pub fn front(&self) -> Result<&T, CollectionError> {
        self.check_not_empty("front")?;
        self.get(0)
    }

    pub fn back(&self) -> Result<&T, CollectionError> {
        self.check_not_empty("back")?;
        self.get(self.len - 1)
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        self.check_index(index)?;
        unsafe {
            let ptr = self.as_mut_ptr();
            let value = ptr::read(ptr.add(index));
            ptr::copy(ptr.add(index + 1), ptr.add(index), self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        self.check_not_empty("pop_front")?;
        self.remove(0)
    }

    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        self.check_not_empty("pop_back")?;
        self.len -= 1;
        Ok(unsafe { ptr::read(self.as_mut_ptr().add(self.len)) })
    }

    /// Removes the elements `from ..= to`.
    ///
    /// # Pseudo Code:
    /// ```text
    /// require from <= to < len
    /// len = from                      // a panicking drop leaks the tail, never double drops
    /// drop elements from ..= to
    /// shift elements to + 1 .. old_len down to from
    /// len = old_len - (to - from + 1)
    /// ```
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        if from > to {
            log::warn!("{}: remove_range start {from} is past end {to}", Self::NAME);
            return Err(CollectionError::IndexOutOfRange {
                index: from,
                len: self.len,
            });
        }
        self.check_index(to)?;
        let old_len = self.len;
        let removed = to - from + 1;
        self.len = from;
        unsafe {
            let ptr = self.as_mut_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.add(from), removed));
            ptr::copy(ptr.add(to + 1), ptr.add(from), old_len - to - 1);
        }
        self.len = old_len - removed;
        Ok(())
    }

    /// Removes the first element equal to `value`. Returns `true` if one was found.
    pub fn search_remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    /// For every element of `other`, removes the first equal element of this array if
    /// there is one. Returns `true` if at least one element was removed.
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
    ///
    /// # Pseudo Code:
    /// ```text
    /// require index <= len and len + other.len <= N
    /// shift index .. len right by other.len
    /// len = index                     // a panicking clone leaks the tail, never double drops
    /// clone other into index ..
    /// len = old_len + other.len
    /// ```
    pub fn append(&mut self, index: usize, other: &[T]) -> Result<(), CollectionError>
    where
        T: Clone,
    {
        self.check_insert_index(index)?;
        self.check_room(other.len())?;
        let old_len = self.len;
        let count = other.len();
        unsafe {
            let ptr = self.as_mut_ptr();
            ptr::copy(ptr.add(index), ptr.add(index + count), old_len - index);
            self.len = index;
            for (offset, value) in other.iter().enumerate() {
                ptr::write(ptr.add(index + offset), value.clone());
            }
        }
        self.len = old_len + count;
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
        self.append(self.len, other)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == value)
    }

    /// Position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|x| x == value)
    }

    /// Drops every element and sets the length to 0.
    pub fn empty(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len));
        }
    }

    /// Copies `other`, failing without copying anything if it does not fit.
    pub fn try_from_slice(other: &[T]) -> Result<Self, CollectionError>
    where
        T: Clone,
    {
        let mut array = Self::new();
        array.append_back(other)?;
        Ok(array)
    }

    /// Copies as much of `other` as fits.
    pub fn from_slice_truncating(other: &[T]) -> Self
    where
        T: Clone,
    {
        if other.len() > N {
            log::warn!(
                "{}: copy truncated to {N} of {} elements",
                Self::NAME,
                other.len()
            );
        }
        let mut array = Self::new();
        for value in other.iter().take(N) {
            unsafe { ptr::write(array.as_mut_ptr().add(array.len), value.clone()) };
            array.len += 1;
        }
        array
    }

    pub fn longer_than<const M: usize>(&self, other: &StaticArray<T, M>) -> bool {
        self.len > other.len
    }

    pub fn shorter_than<const M: usize>(&self, other: &StaticArray<T, M>) -> bool {
        self.len < other.len
    }

    /// Prints the array as `StaticArray[a,b,c]` on standard output.
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        println!("{self}");
    }

    fn check_room(&self, additional: usize) -> Result<(), CollectionError> {
        if additional > N - self.len {
            log::warn!(
                "{}: cannot add {additional} elements, {} of {N} used",
                Self::NAME,
                self.len
            );
            return Err(CollectionError::CapacityExceeded { capacity: N });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        if index >= self.len {
            log::warn!("{}: index {index} out of range for length {}", Self::NAME, self.len);
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<(), CollectionError> {
        if index > self.len {
            log::warn!("{}: insert position {index} past length {}", Self::NAME, self.len);
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_not_empty(&self, op: &str) -> Result<(), CollectionError> {
        if self.len == 0 {
            log::warn!("{}::{op} on an empty array", Self::NAME);
            return Err(CollectionError::EmptyContainer);
        }
        Ok(())
    }
}

impl<T, const N: usize> Default for StaticArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for StaticArray<T, N> {
    fn drop(&mut self) {
        self.empty();
    }
}

impl<T: Clone, const N: usize> Clone for StaticArray<T, N> {
    fn clone(&self) -> Self {
        Self::from_slice_truncating(self.as_slice())
    }
}

impl<T, const N: usize> Deref for StaticArray<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for StaticArray<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> Index<usize> for StaticArray<T, N> {
    type Output = T;

    /// # Panics
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.as_slice().get(index) {
            Some(value) => value,
            None => panic!("StaticArray index {index} out of range for length {}", self.len),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for StaticArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.as_mut_slice().get_mut(index) {
            Some(value) => value,
            None => panic!("StaticArray index {index} out of range for length {len}"),
        }
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for StaticArray<T, N> {
    fn from(values: [T; M]) -> Self {
        const {
            assert!(M <= N, "too many elements for the array capacity");
        }
        let mut array = Self::new();
        for value in values {
            unsafe { ptr::write(array.as_mut_ptr().add(array.len), value) };
            array.len += 1;
        }
        array
    }
}

impl<T, const N: usize> Extend<T> for StaticArray<T, N> {
    /// Appends until the array is full; the rest of `iter` is not consumed.
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for value in iter {
            if self.add_back(value).is_err() {
                break;
            }
        }
    }
}

impl<T, const N: usize> FromIterator<T> for StaticArray<T, N> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for StaticArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", Self::NAME)?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: PartialEq<U>, U, const N: usize, const M: usize> PartialEq<StaticArray<U, M>>
    for StaticArray<T, N>
{
    fn eq(&self, other: &StaticArray<U, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for StaticArray<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for StaticArray<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for StaticArray<T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, const N: usize> Hash for StaticArray<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// Owning iterator over a [`StaticArray`].
pub struct IntoIter<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    pos: usize,
    end: usize,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.pos == self.end {
            return None;
        }
        let value = unsafe { self.data[self.pos].assume_init_read() };
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        if self.pos == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.data[self.end].assume_init_read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}
impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        for slot in &mut self.data[self.pos..self.end] {
            unsafe { slot.assume_init_drop() };
        }
    }
}

impl<T, const N: usize> IntoIterator for StaticArray<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        IntoIter {
            data: unsafe { ptr::read(&this.data) },
            pos: 0,
            end: this.len,
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut StaticArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_array_add_positions() {
        let mut arr: StaticArray<i32, 5> = StaticArray::new();
        arr.add_back(2).unwrap();
        arr.add_front(0).unwrap();
        arr.add(1, 1).unwrap();
        arr.add(3, 3).unwrap();
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(
            arr.add(9, 9),
            Err(CollectionError::IndexOutOfRange { index: 9, len: 4 })
        );
        arr.add_back(4).unwrap();
        assert!(arr.is_full());
        assert_eq!(
            arr.add_back(5),
            Err(CollectionError::CapacityExceeded { capacity: 5 })
        );
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_array_get_and_index() {
        let mut arr: StaticArray<i32, 4> = StaticArray::from([10, 20, 30]);
        assert_eq!(arr.get(1), Ok(&20));
        assert_eq!(
            arr.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        *arr.get_mut(0).unwrap() += 1;
        arr[2] = 33;
        assert_eq!(arr[0], 11);
        assert_eq!(arr.front(), Ok(&11));
        assert_eq!(arr.back(), Ok(&33));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_array_index_panics() {
        let arr: StaticArray<i32, 4> = StaticArray::from([1]);
        let _ = arr[1];
    }

    #[test]
    fn test_array_remove_and_pops() {
        let mut arr: StaticArray<i32, 6> = StaticArray::from([1, 2, 3, 4, 5]);
        assert_eq!(arr.remove(1), Ok(2));
        assert_eq!(arr.pop_front(), Ok(1));
        assert_eq!(arr.pop_back(), Ok(5));
        assert_eq!(arr.as_slice(), &[3, 4]);
        arr.empty();
        assert_eq!(arr.pop_back(), Err(CollectionError::EmptyContainer));
        assert_eq!(arr.front(), Err(CollectionError::EmptyContainer));
    }

    #[test]
    fn test_array_remove_range_inclusive() {
        let mut arr: StaticArray<i32, 6> = StaticArray::from([0, 1, 2, 3, 4, 5]);
        arr.remove_range(1, 3).unwrap();
        assert_eq!(arr.as_slice(), &[0, 4, 5]);
        assert!(arr.remove_range(2, 1).is_err());
        assert_eq!(
            arr.remove_range(1, 3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        arr.remove_range(0, 2).unwrap();
        assert!(arr.is_empty());
    }

    #[test]
    fn test_array_search_and_remove_all() {
        let mut arr: StaticArray<i32, 8> = StaticArray::from([1, 2, 3, 2, 1]);
        assert_eq!(arr.index_of(&2), Some(1));
        assert_eq!(arr.last_index_of(&2), Some(3));
        assert_eq!(arr.index_of(&9), None);
        assert!(arr.search_remove(&1));
        assert_eq!(arr.as_slice(), &[2, 3, 2, 1]);
        assert!(arr.remove_all(&[2, 2, 7]));
        assert_eq!(arr.as_slice(), &[3, 1]);
        assert!(!arr.remove_all(&[7]));
    }

    #[test]
    fn test_array_append_block() {
        let mut arr: StaticArray<i32, 7> = StaticArray::from([1, 5]);
        arr.append(1, &[2, 3, 4]).unwrap();
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 5]);
        arr.append_front(&[0]).unwrap();
        arr.append_back(&[6]).unwrap();
        assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(
            arr.append_back(&[7]),
            Err(CollectionError::CapacityExceeded { capacity: 7 })
        );
    }

    #[test]
    fn test_array_bad_position_wins_over_full() {
        let mut arr: StaticArray<i32, 2> = StaticArray::from([1, 2]);
        assert_eq!(
            arr.add(5, 3),
            Err(CollectionError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(
            arr.append(3, &[3, 4]),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(
            arr.add(2, 3),
            Err(CollectionError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(arr.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_array_copy_between_capacities() {
        let big: StaticArray<i32, 8> = StaticArray::from([1, 2, 3, 4]);
        assert_eq!(
            StaticArray::<i32, 2>::try_from_slice(&big).err(),
            Some(CollectionError::CapacityExceeded { capacity: 2 })
        );
        let small: StaticArray<i32, 2> = StaticArray::from_slice_truncating(&big);
        assert_eq!(small.as_slice(), &[1, 2]);
        let same: StaticArray<i32, 4> = StaticArray::try_from_slice(&big).unwrap();
        assert_eq!(same, big);
        assert!(big.longer_than(&small));
        assert!(small.shorter_than(&big));
    }

    #[test]
    fn test_array_drops_payloads() {
        let marker = Rc::new(());
        {
            let mut arr: StaticArray<Rc<()>, 6> = StaticArray::new();
            for _ in 0..6 {
                arr.add_back(Rc::clone(&marker)).unwrap();
            }
            arr.remove_range(0, 1).unwrap();
            assert_eq!(Rc::strong_count(&marker), 5);
            drop(arr.remove(0).unwrap());
            let mut iter = arr.clone().into_iter();
            drop(iter.next());
            assert_eq!(Rc::strong_count(&marker), 6);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_array_traits() {
        let arr: StaticArray<i32, 4> = (1..=9).collect();
        assert_eq!(arr.to_string(), "StaticArray[1,2,3,4]");
        assert_eq!(format!("{arr:?}"), "[1, 2, 3, 4]");
        let other: StaticArray<i32, 4> = StaticArray::from([1, 3]);
        assert!(arr < other);
        assert_eq!(arr.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert_eq!(arr.into_iter().rev().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }
}
