//! Deque, queue and stack adapters over a pluggable backing container.

pub mod backing;
pub mod deque;
pub mod queue;
pub mod stack;

pub use backing::BackingContainer;
pub use deque::Deque;
pub use queue::Queue;
pub use stack::Stack;
