//! Common traits and errors for the priority queue
//!
//! - [`HasPriority`]: the single capability an element needs to be queued
//! - [`QueueError`]: the failures a queue operation can report
//!
//! The capability is checked at compile time through the `T: HasPriority`
//! bound on [`PriorityQueue`](crate::queue::PriorityQueue), so there is no
//! runtime "not comparable" failure.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// The priority type. Smaller values are served first.
pub type Priority = i64;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The requested position is past the end of the storage
    OutOfBounds {
        /// The position that was asked for
        index: usize,
        /// The number of elements at the time of the request
        len: usize,
    },
    /// An element was requested from a queue with no elements
    EmptyQueue,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::OutOfBounds { index, len } => {
                write!(f, "index {} is out of bounds for queue of length {}", index, len)
            }
            QueueError::EmptyQueue => write!(f, "queue is empty"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A value that can be placed in a [`PriorityQueue`](crate::queue::PriorityQueue)
///
/// The queue only ever looks at an element through this accessor; it never
/// inspects or copies anything else about it.
///
/// # Example
///
/// ```rust
/// use pqueue::{HasPriority, PriorityQueue};
///
/// struct Job {
///     urgency: i64,
///     name: &'static str,
/// }
///
/// impl HasPriority for Job {
///     fn priority(&self) -> i64 {
///         self.urgency
///     }
/// }
///
/// let mut queue = PriorityQueue::new();
/// queue.insert(Job { urgency: 4, name: "backup" });
/// queue.insert(Job { urgency: 1, name: "page oncall" });
/// assert_eq!(queue.extract_min().unwrap().name, "page oncall");
/// ```
pub trait HasPriority {
    /// Returns this element's priority. Lower is served first.
    fn priority(&self) -> Priority;
}

impl<T: HasPriority + ?Sized> HasPriority for &T {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: HasPriority + ?Sized> HasPriority for &mut T {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: HasPriority + ?Sized> HasPriority for Box<T> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: HasPriority + ?Sized> HasPriority for Rc<T> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

impl<T: HasPriority + ?Sized> HasPriority for Arc<T> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }
}

// Integers that widen losslessly into `Priority` are their own priority.
macro_rules! impl_has_priority_for_int {
    ($($t:ty),*) => {
        $(
            impl HasPriority for $t {
                fn priority(&self) -> Priority {
                    Priority::from(*self)
                }
            }
        )*
    };
}

impl_has_priority_for_int!(i8, i16, i32, i64, u8, u16, u32);
