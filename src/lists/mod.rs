pub mod index_list;

pub use index_list::{IndexList, IntoIter, Iter, IterMut};

use crate::memory::{HeapStore, InlineStore};

/// Initial slot count of a [`DynamicList`] created with `new`.
pub const DEFAULT_CAPACITY: usize = 10;

/// A fixed-capacity doubly-linked list whose `N` slots live inline.
///
/// `I` is the link index type; `N + 3` must be addressable by it, which is checked
/// at compile time.
///
/// # Examples
/// ```
/// use fixed_collections::StaticList;
///
/// let mut list: StaticList<i32, 4> = StaticList::new();
/// list.add_back(2).unwrap();
/// list.add_front(1).unwrap();
/// assert_eq!(list.to_string(), "StaticList[1,2]");
/// ```
pub type StaticList<T, const N: usize, I = u16> = IndexList<InlineStore<T, N, I>>;

/// A doubly-linked list whose slot pool lives on the heap and grows on demand.
///
/// # Examples
/// ```
/// use fixed_collections::DynamicList;
///
/// let mut list: DynamicList<&str> = DynamicList::with_max_capacity(2);
/// list.add_back("a").unwrap();
/// list.add_back("b").unwrap();
/// assert!(list.add_back("c").is_err());
/// ```
pub type DynamicList<T, I = u32> = IndexList<HeapStore<T, I>>;
