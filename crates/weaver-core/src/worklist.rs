//! Deduplicating FIFO worklist.
//!
//! An item is accepted at most once for the lifetime of the worklist, even
//! after it has been taken. Adding while draining is supported, which is what
//! makes the structure suitable for on-demand graph discovery.

use std::hash::Hash;

use indexmap::IndexSet;

#[derive(Clone, Debug)]
pub struct Worklist<T> {
    /// Every item ever accepted, in acceptance order.
    items: IndexSet<T>,
    /// Index of the next item to hand out.
    next: usize,
}

impl<T> Default for Worklist<T> {
    fn default() -> Self {
        Self {
            items: IndexSet::new(),
            next: 0,
        }
    }
}

impl<T: Hash + Eq> Worklist<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `item` unless it was ever accepted before. Returns whether it was accepted.
    pub fn add(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Dequeue the oldest pending item.
    pub fn take(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let item = self.items.get_index(self.next)?.clone();
        self.next += 1;
        Some(item)
    }

    /// Whether no items are pending. Previously taken items do not count.
    pub fn is_empty(&self) -> bool {
        self.next >= self.items.len()
    }

    /// Whether `item` was ever accepted (pending or already taken).
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of pending items.
    pub fn pending(&self) -> usize {
        self.items.len() - self.next
    }

    /// Number of items ever accepted.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Hash + Eq> Extend<T> for Worklist<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for Worklist<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut worklist = Self::new();
        worklist.extend(iter);
        worklist
    }
}
