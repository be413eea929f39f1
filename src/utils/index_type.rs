//! Compact slot index types for the index-linked lists.

use core::hash::Hash;
use std::fmt::Debug;

/// A sealed-style trait for integer types used as **slot indices** inside a node pool.
///
/// Instead of pointer-based links, the lists store indices into a fixed backing store.
/// This keeps the structure free of pointer-lifetime issues and shrinks each link to
/// one or two bytes for small pools.
///
/// Index `0` doubles as the "null" link: it is the `head` sentinel, which can never
/// appear inside the free chain, so a `next` of `0` terminates that chain.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// The zero index (the `head` sentinel, and the free-chain terminator).
    const ZERO: Self;

    /// The number of distinct slots this type can address, sentinels included.
    const MAX_SLOTS: usize;

    /// Converts this index to a `usize` for array access.
    fn as_usize(self) -> usize;

    /// Converts a `usize` slot index to this compact type.
    ///
    /// Callers guarantee `i < MAX_SLOTS`; stores check that bound when they are
    /// created or grown.
    fn from_usize(i: usize) -> Self;

    /// Returns true if the index is zero.
    fn is_zero(self) -> bool;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                const ZERO: Self = 0;
                const MAX_SLOTS: usize = match (<$ty>::MAX as usize).checked_add(1) {
                    Some(slots) => slots,
                    None => usize::MAX,
                };
                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }
                #[inline(always)]
                fn from_usize(i: usize) -> Self {
                    debug_assert!(i < Self::MAX_SLOTS, "slot index {i} does not fit");
                    i as $ty
                }
                #[inline(always)]
                fn is_zero(self) -> bool {
                    self == 0
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32, usize);
