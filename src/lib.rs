//! # Fixed Collections
//!
//! Containers with a capacity known up front, for code that must not allocate after
//! start-up (or at all), plus heap-backed twins with the same API.
//!
//! * [`StaticArray`] / [`DynamicArray`]: contiguous arrays.
//! * [`StaticList`] / [`DynamicList`]: doubly-linked lists that link nodes by slot
//!   index instead of pointer and recycle slots through a free-list allocator.
//! * [`Deque`], [`Queue`], [`Stack`]: adapters over any [`BackingContainer`].
//!
//! ## Key Features
//!
//! * **No panics on misuse:** adds to a full container, reads of an empty one and
//!   out-of-range indices return a [`CollectionError`] and leave the container as it
//!   was. Every rejection is also reported through the `log` facade.
//! * **Compile-Time Safety:** inline containers enforce a 16 KiB size limit, and the
//!   list's slot index type must be able to address `N + 3` slots.
//! * **O(1) slot recycling:** list adds and removals allocate from and release to a
//!   free chain threaded through the node pool; `empty()` returns the whole live
//!   chain with one splice.
//!
//! ## Examples
//!
//! ### StaticList
//!
//! ```rust
//! use fixed_collections::{CollectionError, StaticList};
//!
//! // Capacity 3, links stored as u8.
//! let mut list: StaticList<i32, 3, u8> = StaticList::new();
//! list.add_back(2).unwrap();
//! list.add_back(3).unwrap();
//! list.add_front(1).unwrap();
//!
//! assert_eq!(list.add_back(4), Err(CollectionError::CapacityExceeded { capacity: 3 }));
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//! ```
//!
//! ### StaticArray
//!
//! ```rust
//! use fixed_collections::StaticArray;
//!
//! let mut arr: StaticArray<i32, 8> = StaticArray::from([1, 5]);
//! arr.append(1, &[2, 3, 4]).unwrap();
//! arr.remove_range(0, 1).unwrap();
//! assert_eq!(arr.as_slice(), &[3, 4, 5]);
//! assert_eq!(arr.index_of(&4), Some(1));
//! ```
//!
//! ### Queue
//!
//! ```rust
//! use fixed_collections::{Queue, StaticList};
//!
//! let mut queue: Queue<&str, StaticList<&str, 4>> = Queue::new();
//! queue.add("first").unwrap();
//! queue.add("second").unwrap();
//! assert_eq!(queue.pop(), Ok("first"));
//! ```

// --- Module Declarations ---

pub mod adapters;
pub mod error;
pub mod lists;
pub mod memory;
pub mod utils;
pub mod vecs;

// --- Re-exports ---

pub use adapters::{BackingContainer, Deque, Queue, Stack};
pub use error::CollectionError;
pub use lists::{DynamicList, IndexList, StaticList};
pub use memory::{FreeList, HeapStore, InlineStore, SlotStore};
pub use utils::index_type::IndexType;
pub use vecs::{DynamicArray, StaticArray};
