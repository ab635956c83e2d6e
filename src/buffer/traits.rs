use super::error::BufferError;

/// The capability set shared by every buffer in this crate.
///
/// A buffer is an ordered collection with a well-defined "next" element:
/// insertion order for the FIFO buffers, priority order for
/// [`PriorityBuffer`](super::PriorityBuffer). Implementations are not
/// synchronized; wrap them in [`BlockingBuffer`](super::BlockingBuffer) to
/// share one between threads.
pub trait Buffer<T> {
    /// Inserts `item`, failing with [`BufferError::Overflow`] when a bounded
    /// buffer has no room left.
    fn add(&mut self, item: T) -> Result<(), BufferError>;

    /// Inserts every item in order. Returns `Ok(true)` if the buffer changed.
    fn add_all(&mut self, items: Vec<T>) -> Result<bool, BufferError> {
        let changed = !items.is_empty();
        for item in items {
            self.add(item)?;
        }
        Ok(changed)
    }

    /// Returns the next element without removing it.
    fn get(&self) -> Result<&T, BufferError>;

    /// Removes and returns the next element.
    fn remove(&mut self) -> Result<T, BufferError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, B> Buffer<T> for Box<B>
where
    B: Buffer<T> + ?Sized,
{
    fn add(&mut self, item: T) -> Result<(), BufferError> {
        (**self).add(item)
    }

    fn add_all(&mut self, items: Vec<T>) -> Result<bool, BufferError> {
        (**self).add_all(items)
    }

    fn get(&self) -> Result<&T, BufferError> {
        (**self).get()
    }

    fn remove(&mut self) -> Result<T, BufferError> {
        (**self).remove()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}
