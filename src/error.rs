//! Error type shared by every container in the crate.
//!
//! No container operation panics or aborts on misuse. Rejected operations return a
//! [`CollectionError`] and leave the container exactly as it was.

use thiserror::Error;

/// Why a container operation was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionError {
    /// An add, append or slot allocation would exceed the container's maximum.
    #[error("capacity exceeded (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// An index-based access fell outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `front`, `back` or a pop was called on an empty container.
    #[error("container is empty")]
    EmptyContainer,

    /// A slot handed back to the allocator was a sentinel, out of range, or already free.
    #[error("slot {index} is not a live data slot")]
    InvalidSlot { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CollectionError::CapacityExceeded { capacity: 5 }.to_string(),
            "capacity exceeded (capacity 5)"
        );
        assert_eq!(
            CollectionError::IndexOutOfRange { index: 7, len: 2 }.to_string(),
            "index 7 out of range for length 2"
        );
        assert_eq!(CollectionError::EmptyContainer.to_string(), "container is empty");
        assert_eq!(
            CollectionError::InvalidSlot { index: 1 }.to_string(),
            "slot 1 is not a live data slot"
        );
    }
}
