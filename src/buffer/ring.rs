//! Circular array storage shared by the FIFO buffers.
//!
//! `slots` always holds one more slot than the usable capacity so that
//! `head == tail` can only mean "empty". Every index movement goes through
//! [`wrap_index`]; nothing else in this module applies `%` directly.
//!
//! The store itself has no overflow policy: [`CircularArrayStore::push_back`]
//! hands the item back when full and the caller decides whether to grow,
//! reject or evict.

use super::error::BufferError;
use std::iter::FusedIterator;

/// Maps a possibly out-of-range index back into `[0, len)`.
///
/// Callers moving backwards add `len` before subtracting so the argument
/// never underflows.
#[inline]
pub fn wrap_index(index: usize, len: usize) -> usize {
    index % len
}

pub struct CircularArrayStore<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
}

impl<T> CircularArrayStore<T> {
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity { capacity });
        }
        Ok(Self::allocate(capacity))
    }

    pub(crate) fn allocate(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.resize_with(capacity + 1, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn len(&self) -> usize {
        let slot_count = self.slots.len();
        wrap_index(self.tail + slot_count - self.head, slot_count)
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    #[inline]
    fn next_index(&self, index: usize) -> usize {
        wrap_index(index + 1, self.slots.len())
    }

    #[inline]
    fn prev_index(&self, index: usize) -> usize {
        let slot_count = self.slots.len();
        wrap_index(index + slot_count - 1, slot_count)
    }

    #[inline]
    fn physical(&self, logical: usize) -> usize {
        wrap_index(self.head + logical, self.slots.len())
    }

    /// Appends at the tail, handing the item back if there is no free slot.
    pub fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.slots[self.tail] = Some(item);
        self.tail = self.next_index(self.tail);
        Ok(())
    }

    /// Doubles the usable capacity, compacting the live elements so the
    /// oldest one lands at index 0.
    pub fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2).max(1);
        let len = self.len();

        let mut slots: Vec<Option<T>> = Vec::with_capacity(new_capacity + 1);
        let mut index = self.head;
        while index != self.tail {
            slots.push(self.slots[index].take());
            index = self.next_index(index);
        }
        slots.resize_with(new_capacity + 1, || None);

        self.slots = slots;
        self.head = 0;
        self.tail = len;

        tracing::debug!(old_capacity, new_capacity, len, "Grew circular array store");
    }

    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = self.next_index(self.head);
        item
    }

    /// Element at logical offset `index` from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    /// Removes the element at logical offset `index`.
    ///
    /// Only the shorter side of the gap is shifted: elements between the head
    /// and the gap move one slot towards the tail, or elements between the gap
    /// and the tail move one slot towards the head. Either walk may cross the
    /// end of `slots`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }

        let gap = self.physical(index);
        let removed = self.slots[gap].take();

        if index < len - index - 1 {
            let mut current = gap;
            while current != self.head {
                let prev = self.prev_index(current);
                self.slots[current] = self.slots[prev].take();
                current = prev;
            }
            self.head = self.next_index(self.head);
        } else {
            let mut current = gap;
            loop {
                let next = self.next_index(current);
                if next == self.tail {
                    break;
                }
                self.slots[current] = self.slots[next].take();
                current = next;
            }
            self.tail = self.prev_index(self.tail);
        }

        removed
    }

    /// Logical offset of the first element matching `predicate`, scanning
    /// from the head.
    pub fn position<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(|item| predicate(item))
    }

    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
        self.tail = 0;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            store: self,
            front: 0,
            back: self.len(),
        }
    }

    /// A cursor that can remove the element it last returned.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor {
            store: self,
            next: 0,
            last: None,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CircularArrayStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularArrayStore")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Clone> Clone for CircularArrayStore<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            head: self.head,
            tail: self.tail,
        }
    }
}

/// Head-to-tail iterator over a [`CircularArrayStore`].
pub struct Iter<'a, T> {
    store: &'a CircularArrayStore<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.store.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.store.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Walks a store head to tail and can remove the element last returned.
///
/// The cursor tracks a logical position, so it stays correct whichever side
/// of the gap [`CircularArrayStore::remove_at`] decides to shift.
pub struct Cursor<'a, T> {
    store: &'a mut CircularArrayStore<T>,
    next: usize,
    last: Option<usize>,
}

impl<T> Cursor<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        if self.next >= self.store.len() {
            self.last = None;
            return None;
        }
        let index = self.next;
        self.last = Some(index);
        self.next += 1;
        self.store.get(index)
    }

    /// Removes the element returned by the last call to `next`.
    ///
    /// Returns `None` when `next` has not been called since the last removal.
    pub fn remove_current(&mut self) -> Option<T> {
        let index = self.last.take()?;
        let removed = self.store.remove_at(index);
        self.next = index;
        removed
    }
}
