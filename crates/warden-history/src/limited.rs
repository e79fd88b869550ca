//! Fixed-capacity, insertion-ordered buffer.
//!
//! [`LimitedList`] keeps at most `capacity` items. Pushing into a full list
//! evicts the oldest item first. Items are never modified in place: the only
//! mutations are push-to-back, evict-from-front, and pop-from-back.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Upper bound on the slots reserved up front; large limits grow on demand.
const MAX_PREALLOCATED: usize = 16;

/// A FIFO buffer bounded by a capacity fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitedList<T> {
    items: VecDeque<T>,
    capacity: NonZeroUsize,
}

impl<T> LimitedList<T> {
    /// Create an empty list holding at most `capacity` items.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.get().min(MAX_PREALLOCATED)),
            capacity,
        }
    }

    /// Maximum number of items the list retains.
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item, evicting the oldest one if the list is full.
    ///
    /// Returns the evicted item, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity.get() {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// The most recently pushed item.
    pub fn peek_last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Swap the most recently pushed item for `item`.
    ///
    /// On an empty list this is a plain push. Returns the replaced item.
    pub fn replace_last(&mut self, item: T) -> Option<T> {
        let replaced = self.items.pop_back();
        self.items.push_back(item);
        replaced
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> LimitedList<T> {
    /// Copy the items into a `Vec`, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
    }

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut list = LimitedList::new(cap(3));
        assert_eq!(list.push(1), None);
        assert_eq!(list.push(2), None);
        assert_eq!(list.to_vec(), vec![1, 2]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn push_beyond_capacity_evicts_oldest() {
        let mut list = LimitedList::new(cap(3));
        for n in 1..=3 {
            list.push(n);
        }
        assert_eq!(list.push(4), Some(1));
        assert_eq!(list.push(5), Some(2));
        assert_eq!(list.to_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut list = LimitedList::new(cap(4));
        for n in 0..100 {
            list.push(n);
            assert!(list.len() <= list.capacity().get());
        }
        assert_eq!(list.to_vec(), vec![96, 97, 98, 99]);
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut list = LimitedList::new(NonZeroUsize::MIN);
        list.push("a");
        list.push("b");
        assert_eq!(list.to_vec(), vec!["b"]);
    }

    #[test]
    fn replace_last_keeps_length() {
        let mut list = LimitedList::new(cap(2));
        list.push(1);
        list.push(2);
        assert_eq!(list.replace_last(3), Some(2));
        assert_eq!(list.to_vec(), vec![1, 3]);
    }

    #[test]
    fn replace_last_on_empty_pushes() {
        let mut list = LimitedList::new(cap(2));
        assert_eq!(list.replace_last(7), None);
        assert_eq!(list.to_vec(), vec![7]);
    }

    #[test]
    fn peek_last_tracks_newest() {
        let mut list = LimitedList::new(cap(2));
        assert!(list.peek_last().is_none());
        list.push(1);
        list.push(2);
        assert_eq!(list.peek_last(), Some(&2));
        list.push(3);
        assert_eq!(list.peek_last(), Some(&3));
    }

    #[test]
    fn snapshot_is_independent() {
        let mut list = LimitedList::new(cap(2));
        list.push(1);
        let snapshot = list.to_vec();
        list.push(2);
        list.push(3);
        assert_eq!(snapshot, vec![1]);
    }
}
