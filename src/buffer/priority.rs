//! Binary heap priority buffer.
//!
//! Heap positions are 1-based (`parent = pos / 2`, children `2 * pos` and
//! `2 * pos + 1`); position `pos` lives at `elements[pos - 1]`. The ordering
//! function is composed once at construction, so descending order never
//! shows up as a branch at a comparison site.

use super::error::BufferError;
use super::fifo::DEFAULT_CAPACITY;
use super::traits::Buffer;
use std::cmp::Ordering;

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

pub struct PriorityBuffer<T> {
    elements: Vec<T>,
    ascending: bool,
    compare: Comparator<T>,
}

fn compose<T, F>(ascending: bool, compare: F) -> Comparator<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    if ascending {
        Box::new(compare)
    } else {
        Box::new(move |a, b| compare(a, b).reverse())
    }
}

impl<T: Ord + 'static> PriorityBuffer<T> {
    /// Natural ordering, smallest element first.
    pub fn new() -> Self {
        Self::with_order(true)
    }

    /// Natural ordering; `ascending = false` yields the largest element first.
    pub fn with_order(ascending: bool) -> Self {
        Self::build(
            Vec::with_capacity(DEFAULT_CAPACITY),
            ascending,
            compose(ascending, T::cmp),
        )
    }

    pub fn with_capacity(capacity: usize, ascending: bool) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity { capacity });
        }
        Ok(Self::build(
            Vec::with_capacity(capacity),
            ascending,
            compose(ascending, T::cmp),
        ))
    }

    /// Heapifies `items` in place.
    pub fn from_vec(items: Vec<T>, ascending: bool) -> Self {
        let mut buffer = Self::build(items, ascending, compose(ascending, T::cmp));
        buffer.heapify();
        buffer
    }
}

impl<T: Ord + 'static> Default for PriorityBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityBuffer<T> {
    /// Orders by `compare` instead of `Ord`; `ascending = false` reverses it.
    pub fn with_comparator<F>(ascending: bool, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::build(
            Vec::with_capacity(DEFAULT_CAPACITY),
            ascending,
            compose(ascending, compare),
        )
    }

    fn build(elements: Vec<T>, ascending: bool, compare: Comparator<T>) -> Self {
        Self {
            elements,
            ascending,
            compare,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Does the element at heap position `a` belong above the one at `b`?
    #[inline]
    fn precedes(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elements[a - 1], &self.elements[b - 1]) == Ordering::Less
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a - 1, b - 1);
    }

    /// Moves the element at `pos` towards the root. Returns whether it moved.
    fn sift_up(&mut self, mut pos: usize) -> bool {
        let start = pos;
        while pos > 1 {
            let parent = pos / 2;
            if !self.precedes(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos != start
    }

    /// Moves the element at `pos` towards the leaves until both children
    /// order no better than it.
    fn sift_down(&mut self, mut pos: usize) {
        let size = self.elements.len();
        loop {
            let left = 2 * pos;
            if left > size {
                break;
            }
            let right = left + 1;
            let child = if right <= size && self.precedes(right, left) {
                right
            } else {
                left
            };
            if !self.precedes(child, pos) {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    fn heapify(&mut self) {
        for pos in (1..=self.elements.len() / 2).rev() {
            self.sift_down(pos);
        }
    }

    /// Removes the element at heap position `pos` by moving the last element
    /// into its place and repairing in whichever direction is needed.
    fn remove_position(&mut self, pos: usize) -> T {
        let removed = self.elements.swap_remove(pos - 1);
        if pos <= self.elements.len() && !self.sift_up(pos) {
            self.sift_down(pos);
        }
        removed
    }

    /// Removes the first element equal to `item`. Returns whether one was found.
    pub fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.elements.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.remove_position(index + 1);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.contains(item)
    }

    /// Keeps only the elements for which `keep` returns true, then restores
    /// the heap once.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.elements.len();
        self.elements.retain(keep);
        if self.elements.len() != before {
            self.heapify();
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Iterates in heap array order, not priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Drains the buffer in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.elements.len());
        while !self.elements.is_empty() {
            sorted.push(self.remove_position(1));
        }
        sorted
    }
}

impl<T> Buffer<T> for PriorityBuffer<T> {
    fn add(&mut self, item: T) -> Result<(), BufferError> {
        self.elements.push(item);
        let last = self.elements.len();
        self.sift_up(last);
        Ok(())
    }

    fn get(&self) -> Result<&T, BufferError> {
        self.elements.first().ok_or_else(BufferError::empty)
    }

    fn remove(&mut self) -> Result<T, BufferError> {
        if self.elements.is_empty() {
            return Err(BufferError::empty());
        }
        Ok(self.remove_position(1))
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PriorityBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityBuffer")
            .field("ascending", &self.ascending)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}
