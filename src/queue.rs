//! Lazily heapified binary min-heap
//!
//! [`PriorityQueue`] keeps its elements in a `Vec` laid out as an implicit
//! binary tree: the children of index `i` live at `2i + 1` and `2i + 2`.
//! Elements are ordered by [`HasPriority::priority`], smallest first.
//!
//! Heap order is built lazily. Appending through
//! [`raw_append`](PriorityQueue::raw_append) or
//! [`bulk_load`](PriorityQueue::bulk_load) is a plain push and leaves the queue
//! [`HeapState::Unordered`]; the next operation that depends on heap order
//! rebuilds the whole heap bottom-up in O(n) and then keeps it ordered
//! incrementally. Loading a batch and then extracting is therefore one linear
//! heapify instead of k logarithmic inserts.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity                                  |
//! |----------------|---------------------------------------------|
//! | `insert`       | O(log n), plus one O(n) heapify if unordered |
//! | `extract_min`  | O(log n), plus one O(n) heapify if unordered |
//! | `remove_at`    | O(log n), plus one O(n) heapify if unordered |
//! | `raw_append`   | O(1) amortized                              |
//! | `bulk_load`    | O(k) for k items                            |
//! | `member_at`    | O(1)                                        |
//! | `sort_snapshot`| O(n log n)                                  |
//!
//! # Example
//!
//! ```rust
//! use pqueue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.bulk_load(vec![8, 3, 9, 1]);
//! queue.insert(2);
//!
//! assert_eq!(queue.extract_min(), Ok(1));
//! assert_eq!(queue.extract_min(), Ok(2));
//! assert_eq!(queue.len(), 3);
//! ```

use crate::traits::{HasPriority, QueueError};
use std::iter::FusedIterator;

/// Capacity reserved by [`PriorityQueue::new`]
pub const DEFAULT_CAPACITY: usize = 100;

/// Whether the storage of a [`PriorityQueue`] is currently in heap order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapState {
    /// Elements are in insertion (or otherwise arbitrary) order. The next
    /// heap-dependent operation runs a full heapify.
    Unordered,
    /// Storage satisfies the min-heap property.
    HeapOrdered,
}

/// A priority queue whose elements may be of different concrete types
///
/// Each element is boxed, so every comparison goes through a virtual call and
/// every element costs one allocation. Use a concrete `PriorityQueue<T>` when
/// all elements share one type.
///
/// ```rust
/// use pqueue::{DynPriorityQueue, HasPriority};
///
/// struct Alert(i64);
/// struct Log(i64);
///
/// impl HasPriority for Alert {
///     fn priority(&self) -> i64 { self.0 }
/// }
/// impl HasPriority for Log {
///     fn priority(&self) -> i64 { self.0 }
/// }
///
/// let mut queue = DynPriorityQueue::new();
/// queue.insert(Box::new(Log(4)));
/// queue.insert(Box::new(Alert(1)));
/// assert_eq!(queue.extract_min().map(|m| m.priority()), Ok(1));
/// ```
pub type DynPriorityQueue<'a> = PriorityQueue<Box<dyn HasPriority + 'a>>;

/// A binary min-heap keyed on each element's own priority
///
/// Equal priorities have no defined relative order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    /// Elements, in heap order when `state` is `HeapOrdered`
    data: Vec<T>,
    state: HeapState,
}

impl<T: HasPriority> PriorityQueue<T> {
    /// Creates an empty queue with room for [`DEFAULT_CAPACITY`] elements
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            state: HeapState::Unordered,
        }
    }

    /// Returns the number of elements in the queue
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the queue holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current ordering state of the storage
    pub fn state(&self) -> HeapState {
        self.state
    }

    /// Returns true if the storage is known to be in heap order
    pub fn is_heap_ordered(&self) -> bool {
        self.state == HeapState::HeapOrdered
    }

    /// Appends an element without restoring heap order
    ///
    /// The queue becomes [`HeapState::Unordered`]; the next heap-dependent
    /// operation heapifies everything at once.
    pub fn raw_append(&mut self, item: T) {
        self.data.push(item);
        self.state = HeapState::Unordered;
    }

    /// Appends every item without restoring heap order
    ///
    /// This is the batch path: O(k) here, then a single O(n) heapify on the
    /// next [`insert`](Self::insert), [`extract_min`](Self::extract_min),
    /// [`remove_at`](Self::remove_at) or [`peek_min`](Self::peek_min).
    pub fn bulk_load<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.data.len();
        self.data.extend(items);
        if self.data.len() != before {
            self.state = HeapState::Unordered;
        }
    }

    /// Returns the element at storage position `index`
    ///
    /// The position refers to the current storage order, which is heap order
    /// only if [`is_heap_ordered`](Self::is_heap_ordered) is true.
    pub fn member_at(&self, index: usize) -> Result<&T, QueueError> {
        self.data.get(index).ok_or(QueueError::OutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    /// Returns the storage in its current order
    ///
    /// Do not assume heap or sorted order unless [`ensure_heap`](Self::ensure_heap)
    /// or [`sort_snapshot`](Self::sort_snapshot) was called last.
    pub fn snapshot(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the elements in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the queue, returning the storage in its current order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Puts the storage into heap order if it is not already
    ///
    /// Idempotent: once ordered, this is a no-op until the next raw append,
    /// bulk load, swap or sort.
    pub fn ensure_heap(&mut self) {
        if self.state == HeapState::Unordered {
            self.heapify_all();
            self.state = HeapState::HeapOrdered;
        }
    }

    /// Inserts an element, keeping heap order
    pub fn insert(&mut self, item: T) {
        self.ensure_heap();
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Returns the element with the smallest priority without removing it
    pub fn peek_min(&mut self) -> Option<&T> {
        self.ensure_heap();
        self.data.first()
    }

    /// Removes and returns the element with the smallest priority
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if there are no elements.
    pub fn extract_min(&mut self) -> Result<T, QueueError> {
        self.ensure_heap();
        if self.data.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop().ok_or(QueueError::EmptyQueue)?;

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Ok(result)
    }

    /// Removes and returns the element at heap position `index`
    ///
    /// The storage is heapified first if needed, so `index` always refers to
    /// heap order. The last element takes the vacated slot and is moved
    /// down or up, whichever restores the heap.
    ///
    /// # Errors
    /// Returns [`QueueError::OutOfBounds`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, QueueError> {
        let len = self.data.len();
        if index >= len {
            return Err(QueueError::OutOfBounds { index, len });
        }
        self.ensure_heap();

        let last_idx = len - 1;
        self.data.swap(index, last_idx);
        let result = self.data.pop().ok_or(QueueError::EmptyQueue)?;

        if index < self.data.len() && !self.sift_down(index) {
            self.sift_up(index);
        }

        Ok(result)
    }

    /// Sorts the storage by ascending priority
    ///
    /// Afterwards [`snapshot`](Self::snapshot) and [`member_at`](Self::member_at)
    /// see a total order. The queue is left [`HeapState::Unordered`].
    pub fn sort_snapshot(&mut self) {
        self.data.sort_by_key(|item| item.priority());
        self.state = HeapState::Unordered;
    }

    /// Returns whether the element at `i` has a strictly smaller priority
    /// than the element at `j`
    pub fn less(&self, i: usize, j: usize) -> Result<bool, QueueError> {
        Ok(self.member_at(i)?.priority() < self.member_at(j)?.priority())
    }

    /// Exchanges the elements at storage positions `i` and `j`
    ///
    /// The queue is left [`HeapState::Unordered`].
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), QueueError> {
        let len = self.data.len();
        for index in [i, j] {
            if index >= len {
                return Err(QueueError::OutOfBounds { index, len });
            }
        }
        self.data.swap(i, j);
        self.state = HeapState::Unordered;
        Ok(())
    }

    /// Removes the last element in storage order without reordering
    ///
    /// Dropping the last leaf of a heap leaves a heap, so the state is kept.
    pub fn pop_last(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns an iterator that extracts elements in ascending priority order
    ///
    /// Elements not yielded before the iterator is dropped stay in the queue.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T> {
        DrainSorted { queue: self }
    }

    /// Consumes the queue, returning its elements in ascending priority order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.sort_snapshot();
        self.data
    }

    /// Checks the min-heap property over the current storage
    ///
    /// This inspects the storage as it is; an `Unordered` queue may or may
    /// not happen to satisfy it.
    pub fn satisfies_heap_property(&self) -> bool {
        (1..self.data.len())
            .all(|child| self.data[(child - 1) / 2].priority() <= self.data[child].priority())
    }

    /// Rebuilds heap order over the whole storage, bottom-up
    fn heapify_all(&mut self) {
        let len = self.data.len();
        log::trace!("heapifying {} queued elements", len);

        for index in (0..len / 2).rev() {
            self.sift_down(index);
        }

        debug_assert!(self.satisfies_heap_property());
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].priority() < self.data[parent].priority() {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    ///
    /// Returns true if the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let len = self.data.len();
        let mut index = start;
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left].priority() < self.data[smallest].priority() {
                smallest = left;
            }
            if right < len && self.data[right].priority() < self.data[smallest].priority() {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
        index != start
    }
}

impl<T: HasPriority> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasPriority> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.bulk_load(iter);
    }
}

impl<T: HasPriority> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.bulk_load(iter);
        queue
    }
}

impl<T> IntoIterator for PriorityQueue<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Yields the elements in storage order
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Iterator returned by [`PriorityQueue::drain_sorted`]
#[derive(Debug)]
pub struct DrainSorted<'a, T: HasPriority> {
    queue: &'a mut PriorityQueue<T>,
}

impl<T: HasPriority> Iterator for DrainSorted<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.extract_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<T: HasPriority> ExactSizeIterator for DrainSorted<'_, T> {}

impl<T: HasPriority> FusedIterator for DrainSorted<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn priorities<T: HasPriority>(queue: &PriorityQueue<T>) -> Vec<i64> {
        queue.iter().map(|item| item.priority()).collect()
    }

    #[test]
    fn test_basic_operations() {
        let mut queue = PriorityQueue::new();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.state(), HeapState::Unordered);

        queue.insert(3);
        queue.insert(1);
        queue.insert(2);

        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 3);
        assert!(queue.is_heap_ordered());
        assert_eq!(queue.peek_min(), Some(&1));

        assert_eq!(queue.extract_min(), Ok(1));
        assert_eq!(queue.extract_min(), Ok(2));
        assert_eq!(queue.extract_min(), Ok(3));
        assert_eq!(queue.extract_min(), Err(QueueError::EmptyQueue));
    }

    #[test]
    fn test_new_reserves_default_capacity() {
        let queue: PriorityQueue<i32> = PriorityQueue::new();
        assert!(queue.data.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn test_raw_append_defers_ordering() {
        let mut queue = PriorityQueue::new();
        queue.raw_append(5);
        queue.raw_append(4);
        queue.raw_append(3);

        assert_eq!(priorities(&queue), vec![5, 4, 3]);
        assert_eq!(queue.state(), HeapState::Unordered);

        queue.ensure_heap();
        assert!(queue.is_heap_ordered());
        assert_eq!(queue.member_at(0), Ok(&3));

        // Appending after heapify drops back to unordered
        queue.raw_append(1);
        assert_eq!(queue.state(), HeapState::Unordered);
        assert_eq!(queue.extract_min(), Ok(1));
    }

    #[test]
    fn test_ensure_heap_is_idempotent() {
        let mut queue: PriorityQueue<i32> = vec![9, 2, 7, 4].into_iter().collect();
        queue.ensure_heap();
        let first = priorities(&queue);
        queue.ensure_heap();
        assert_eq!(priorities(&queue), first);
        assert!(queue.satisfies_heap_property());
    }

    #[test]
    fn test_bulk_load_empty_keeps_state() {
        let mut queue = PriorityQueue::new();
        queue.insert(1);
        queue.bulk_load(Vec::<i32>::new());
        assert!(queue.is_heap_ordered());
        queue.bulk_load(vec![0]);
        assert!(!queue.is_heap_ordered());
    }

    #[test]
    fn test_member_at_bounds() {
        let mut queue = PriorityQueue::new();
        assert_eq!(
            queue.member_at(0),
            Err(QueueError::OutOfBounds { index: 0, len: 0 })
        );

        queue.insert(10);
        queue.insert(20);
        assert!(queue.member_at(1).is_ok());
        assert_eq!(
            queue.member_at(2),
            Err(QueueError::OutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_remove_at() {
        let mut queue: PriorityQueue<i32> = (0..10).rev().collect();
        queue.ensure_heap();

        let removed = queue.remove_at(4).unwrap();
        assert_eq!(queue.len(), 9);
        assert!(queue.satisfies_heap_property());
        assert!(!queue.iter().any(|&p| p == removed));

        // Removing the last slot needs no repair
        let last = *queue.member_at(queue.len() - 1).unwrap();
        assert_eq!(queue.remove_at(queue.len() - 1), Ok(last));
        assert!(queue.satisfies_heap_property());

        assert_eq!(
            queue.remove_at(8),
            Err(QueueError::OutOfBounds { index: 8, len: 8 })
        );
    }

    #[test]
    fn test_remove_at_sifts_replacement_up() {
        // Already a heap; the last leaf (4) replaces 12 under a parent of 10.
        let mut queue = PriorityQueue::new();
        queue.bulk_load(vec![0, 10, 1, 11, 12, 2, 3, 13, 14, 15, 16, 4]);
        queue.ensure_heap();
        assert_eq!(queue.member_at(4), Ok(&12));

        assert_eq!(queue.remove_at(4), Ok(12));
        assert!(queue.satisfies_heap_property());
        assert_eq!(queue.member_at(1), Ok(&4));
        assert_eq!(queue.member_at(4), Ok(&10));
        assert_eq!(queue.len(), 11);
    }

    #[test]
    fn test_remove_only_element() {
        let mut queue = PriorityQueue::new();
        queue.insert(7);
        assert_eq!(queue.remove_at(0), Ok(7));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sort_snapshot() {
        let mut queue: PriorityQueue<i32> = vec![5, -1, 3, 3, 0].into_iter().collect();
        queue.ensure_heap();
        queue.sort_snapshot();

        assert_eq!(priorities(&queue), vec![-1, 0, 3, 3, 5]);
        assert_eq!(queue.state(), HeapState::Unordered);
        assert_eq!(queue.extract_min(), Ok(-1));
    }

    #[test]
    fn test_less_and_swap() {
        let mut queue = PriorityQueue::new();
        queue.raw_append(132);
        queue.raw_append(256);

        assert_eq!(queue.less(0, 1), Ok(true));
        assert_eq!(queue.less(1, 0), Ok(false));
        assert_eq!(
            queue.less(0, 2),
            Err(QueueError::OutOfBounds { index: 2, len: 2 })
        );

        queue.ensure_heap();
        queue.swap(0, 1).unwrap();
        assert_eq!(queue.member_at(0), Ok(&256));
        assert_eq!(queue.member_at(1), Ok(&132));
        assert_eq!(queue.state(), HeapState::Unordered);
        assert_eq!(
            queue.swap(1, 5),
            Err(QueueError::OutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_pop_last_is_raw() {
        let mut queue = PriorityQueue::new();
        queue.raw_append(128);
        queue.raw_append(256);
        queue.raw_append(512);

        assert_eq!(queue.pop_last(), Some(512));
        assert_eq!(queue.len(), 2);

        queue.ensure_heap();
        queue.pop_last();
        assert!(queue.is_heap_ordered());
        assert!(queue.satisfies_heap_property());
    }

    #[test]
    fn test_drain_sorted_partial() {
        let mut queue: PriorityQueue<i32> = vec![4, 2, 8, 6].into_iter().collect();

        let drained: Vec<i32> = queue.drain_sorted().take(2).collect();
        assert_eq!(drained, vec![2, 4]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain_sorted().len(), 2);
    }

    #[test]
    fn test_into_sorted_vec() {
        let queue: PriorityQueue<i32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(queue.into_sorted_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_extend_and_into_vec() {
        let mut queue = PriorityQueue::new();
        queue.insert(5);
        queue.extend(vec![1, 9]);
        assert!(!queue.is_heap_ordered());

        let mut storage = queue.clone().into_vec();
        storage.sort_unstable();
        assert_eq!(storage, vec![1, 5, 9]);

        let mut owned: Vec<i32> = queue.into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned, vec![1, 5, 9]);
    }

    #[test]
    fn test_clear() {
        let mut queue: PriorityQueue<i32> = (0..5).collect();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(), Err(QueueError::EmptyQueue));
    }

    #[test]
    fn test_duplicate_priorities() {
        let mut queue = PriorityQueue::new();
        queue.insert(1);
        queue.insert(1);
        queue.insert(1);

        assert_eq!(queue.len(), 3);
        for _ in 0..3 {
            assert_eq!(queue.extract_min(), Ok(1));
        }
    }

    #[test]
    fn test_ascending_insertion() {
        let mut queue = PriorityQueue::new();
        for i in 0..100 {
            queue.insert(i);
        }
        for i in 0..100 {
            assert_eq!(queue.extract_min(), Ok(i));
        }
    }

    #[test]
    fn test_descending_insertion() {
        let mut queue = PriorityQueue::new();
        for i in (0..100).rev() {
            queue.insert(i);
        }
        for i in 0..100 {
            assert_eq!(queue.extract_min(), Ok(i));
        }
    }
}
