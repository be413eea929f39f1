//! Slot storage and the free-list allocator behind the index-linked lists.

pub mod free_list;
pub mod node;

pub use free_list::{FreeChain, FreeList};
pub use node::{HeapStore, InlineStore, Links, SlotStore};
