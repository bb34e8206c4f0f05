//! Attaching a priority to values that do not carry one
//!
//! [`Prioritized`] pairs an explicit priority with an arbitrary item, the way
//! a `(priority, item)` heap entry would, so plain values can be queued
//! without implementing [`HasPriority`] themselves.
//!
//! # Example
//!
//! ```rust
//! use pqueue::prioritized::Prioritized;
//! use pqueue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.insert(Prioritized::new(3, "three"));
//! queue.insert(Prioritized::new(1, "one"));
//! queue.insert((2, "two").into());
//!
//! let order: Vec<_> = queue.drain_sorted().map(Prioritized::into_inner).collect();
//! assert_eq!(order, vec!["one", "two", "three"]);
//! ```

use crate::traits::{HasPriority, Priority};

/// An item queued under an explicit priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prioritized<T> {
    pub priority: Priority,
    pub item: T,
}

impl<T> Prioritized<T> {
    pub fn new(priority: Priority, item: T) -> Self {
        Self { priority, item }
    }

    /// Discards the priority, returning the item
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> HasPriority for Prioritized<T> {
    fn priority(&self) -> Priority {
        self.priority
    }
}

impl<T> From<(Priority, T)> for Prioritized<T> {
    fn from((priority, item): (Priority, T)) -> Self {
        Self::new(priority, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::PriorityQueue;

    #[test]
    fn test_priority_comes_from_pair() {
        let entry = Prioritized::new(-5, "urgent");
        assert_eq!(entry.priority(), -5);
        assert_eq!(entry.into_inner(), "urgent");
    }

    #[test]
    fn test_items_need_no_ordering() {
        // `Vec<f64>` has no `Ord`; only the attached priority matters.
        let mut queue = PriorityQueue::new();
        queue.insert(Prioritized::new(2, vec![2.5f64]));
        queue.insert(Prioritized::new(0, vec![0.5f64]));
        queue.insert(Prioritized::new(1, vec![1.5f64]));

        let firsts: Vec<f64> = queue.drain_sorted().map(|p| p.item[0]).collect();
        assert_eq!(firsts, vec![0.5, 1.5, 2.5]);
    }
}
