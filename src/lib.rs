//! A binary min-heap priority queue with lazy heapification
//!
//! This crate provides [`PriorityQueue`], a `Vec`-backed binary min-heap over
//! any element type implementing [`HasPriority`]. Elements report their own
//! integer priority and are served smallest first.
//!
//! # Features
//!
//! - **Lazy heapification**: raw appends and bulk loads are plain pushes; the
//!   first operation that needs heap order rebuilds it in O(n)
//! - **Arbitrary removal**: [`PriorityQueue::remove_at`] deletes any heap
//!   position in O(log n)
//! - **Heterogeneous elements**: [`DynPriorityQueue`] holds boxed elements of
//!   unrelated types side by side
//! - **Explicit errors**: out-of-range positions and empty extraction are
//!   reported through [`QueueError`], never by panicking
//!
//! The queue is not synchronized. Wrap it in a mutex to share it between
//! threads.
//!
//! # Example
//!
//! ```rust
//! use pqueue::{HasPriority, PriorityQueue};
//!
//! #[derive(Debug)]
//! struct Alert {
//!     level: i64,
//!     message: &'static str,
//! }
//!
//! impl HasPriority for Alert {
//!     fn priority(&self) -> i64 {
//!         self.level
//!     }
//! }
//!
//! let mut queue = PriorityQueue::new();
//! queue.insert(Alert { level: 7, message: "debug foo" });
//! queue.insert(Alert { level: 0, message: "this is foobar" });
//! queue.insert(Alert { level: 3, message: "error baz" });
//!
//! assert_eq!(queue.extract_min().unwrap().message, "this is foobar");
//! assert_eq!(queue.len(), 2);
//! ```

pub mod prioritized;
pub mod queue;
pub mod traits;

// Re-export the main types for convenience
pub use queue::{DynPriorityQueue, HeapState, PriorityQueue, DEFAULT_CAPACITY};
pub use traits::{HasPriority, Priority, QueueError};
