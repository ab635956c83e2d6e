use super::error::BufferError;
use super::ring::{CircularArrayStore, Cursor, Iter};
use super::traits::Buffer;
use serde::{Deserialize, Serialize};

/// Capacity used when none is requested.
pub const DEFAULT_CAPACITY: usize = 32;

/// What a [`FifoBuffer`] does with an insert when every slot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Reallocate at double capacity (unbounded buffer).
    Grow,
    /// Fail with [`BufferError::Overflow`] (bounded buffer).
    Reject,
    /// Evict the oldest element first (circular buffer).
    Overwrite,
}

/// First-in-first-out buffer over a [`CircularArrayStore`].
///
/// The three FIFO flavours differ only in their [`OverflowPolicy`]:
///
/// ```
/// use rask_buffer::{Buffer, FifoBuffer};
///
/// let mut ring = FifoBuffer::circular(3).unwrap();
/// for item in ["a", "b", "c", "d"] {
///     ring.add(item).unwrap();
/// }
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["b", "c", "d"]);
/// assert!(ring.remove_item(&"c"));
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["b", "d"]);
/// ```
#[derive(Debug, Clone)]
pub struct FifoBuffer<T> {
    store: CircularArrayStore<T>,
    policy: OverflowPolicy,
}

impl<T> FifoBuffer<T> {
    pub fn with_policy(capacity: usize, policy: OverflowPolicy) -> Result<Self, BufferError> {
        Ok(Self {
            store: CircularArrayStore::with_capacity(capacity)?,
            policy,
        })
    }

    /// Growable buffer starting at [`DEFAULT_CAPACITY`].
    pub fn unbounded() -> Self {
        Self {
            store: CircularArrayStore::allocate(DEFAULT_CAPACITY),
            policy: OverflowPolicy::Grow,
        }
    }

    pub fn unbounded_with_capacity(initial_capacity: usize) -> Result<Self, BufferError> {
        Self::with_policy(initial_capacity, OverflowPolicy::Grow)
    }

    pub fn bounded(capacity: usize) -> Result<Self, BufferError> {
        Self::with_policy(capacity, OverflowPolicy::Reject)
    }

    pub fn circular(capacity: usize) -> Result<Self, BufferError> {
        Self::with_policy(capacity, OverflowPolicy::Overwrite)
    }

    /// Bounded buffer sized to, and filled with, `items`.
    pub fn bounded_from(items: Vec<T>) -> Result<Self, BufferError> {
        Self::filled(items, OverflowPolicy::Reject)
    }

    /// Circular buffer sized to, and filled with, `items`.
    pub fn circular_from(items: Vec<T>) -> Result<Self, BufferError> {
        Self::filled(items, OverflowPolicy::Overwrite)
    }

    fn filled(items: Vec<T>, policy: OverflowPolicy) -> Result<Self, BufferError> {
        let mut buffer = Self::with_policy(items.len(), policy)?;
        for item in items {
            buffer.push(item)?;
        }
        Ok(buffer)
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Current number of usable slots. Only changes under [`OverflowPolicy::Grow`].
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// A growable buffer is never full.
    pub fn is_full(&self) -> bool {
        self.policy != OverflowPolicy::Grow && self.store.is_full()
    }

    fn push(&mut self, item: T) -> Result<(), BufferError> {
        if self.store.is_full() {
            match self.policy {
                OverflowPolicy::Grow => self.store.grow(),
                OverflowPolicy::Reject => {
                    return Err(BufferError::Overflow {
                        capacity: self.store.capacity(),
                    });
                }
                OverflowPolicy::Overwrite => {
                    self.store.pop_front();
                    tracing::trace!(capacity = self.store.capacity(), "Evicted oldest element");
                }
            }
        }
        let capacity = self.store.capacity();
        self.store
            .push_back(item)
            .map_err(|_| BufferError::Overflow { capacity })
    }

    /// Element at `index` positions from the head.
    pub fn get_at(&self, index: usize) -> Result<&T, BufferError> {
        self.store.get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })
    }

    /// Removes the element at `index` positions from the head.
    pub fn remove_at(&mut self, index: usize) -> Result<T, BufferError> {
        let len = self.store.len();
        self.store
            .remove_at(index)
            .ok_or(BufferError::IndexOutOfRange { index, len })
    }

    /// Removes the first element equal to `item`. Returns whether one was found.
    pub fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.store.position(|candidate| candidate == item) {
            Some(index) => self.store.remove_at(index).is_some(),
            None => false,
        }
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.store.iter().any(|candidate| candidate == item)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.store.iter()
    }

    pub fn cursor(&mut self) -> Cursor<'_, T> {
        self.store.cursor()
    }
}

impl<T> Default for FifoBuffer<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> Buffer<T> for FifoBuffer<T> {
    fn add(&mut self, item: T) -> Result<(), BufferError> {
        self.push(item)
    }

    /// A bounded buffer either takes every item or none of them.
    fn add_all(&mut self, items: Vec<T>) -> Result<bool, BufferError> {
        if self.policy == OverflowPolicy::Reject
            && self.store.len() + items.len() > self.store.capacity()
        {
            return Err(BufferError::Overflow {
                capacity: self.store.capacity(),
            });
        }
        let changed = !items.is_empty();
        for item in items {
            self.push(item)?;
        }
        Ok(changed)
    }

    fn get(&self) -> Result<&T, BufferError> {
        self.store.front().ok_or_else(BufferError::empty)
    }

    fn remove(&mut self) -> Result<T, BufferError> {
        self.store.pop_front().ok_or_else(BufferError::empty)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a FifoBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
