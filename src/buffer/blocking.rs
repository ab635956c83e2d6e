//! Blocking decorator for sharing a buffer between producer and consumer
//! threads.
//!
//! One mutex guards the wrapped buffer and one condition variable signals
//! "an element may be available". Every successful insert wakes all waiters;
//! each waiter re-checks emptiness after waking because another consumer may
//! have taken the element first. Waiters are not served in arrival order.
//!
//! ```
//! use rask_buffer::{BlockingBuffer, FifoBuffer};
//! use std::thread;
//!
//! let buffer: BlockingBuffer<&str, _> = BlockingBuffer::new(FifoBuffer::unbounded());
//! let consumer = {
//!     let buffer = buffer.clone();
//!     thread::spawn(move || buffer.remove())
//! };
//! buffer.add("job").unwrap();
//! assert_eq!(consumer.join().unwrap(), Ok("job"));
//! ```

use super::error::{BufferError, UnderflowReason};
use super::metrics::{BufferMetrics, BufferMetricsCollector};
use super::traits::Buffer;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct State<B> {
    buffer: B,
    /// Bumped by `interrupt_waiters`; a waiter that sees it change gives up.
    interrupt_epoch: u64,
}

struct Monitor<B> {
    state: Mutex<State<B>>,
    available: Condvar,
    default_timeout: Option<Duration>,
    metrics: BufferMetricsCollector,
}

/// Thread-safe handle around a [`Buffer`] whose `get`/`remove` wait for an
/// element instead of failing on an empty buffer.
///
/// Clones share the same buffer and monitor.
pub struct BlockingBuffer<T, B> {
    monitor: Arc<Monitor<B>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, B> Clone for BlockingBuffer<T, B> {
    fn clone(&self) -> Self {
        Self {
            monitor: Arc::clone(&self.monitor),
            _marker: PhantomData,
        }
    }
}

impl<T, B: Buffer<T>> BlockingBuffer<T, B> {
    /// `get`/`remove` wait indefinitely.
    pub fn new(buffer: B) -> Self {
        Self::build(buffer, None)
    }

    /// `get`/`remove` wait at most `timeout` before failing with underflow.
    pub fn with_timeout(buffer: B, timeout: Duration) -> Self {
        Self::build(buffer, Some(timeout))
    }

    fn build(buffer: B, default_timeout: Option<Duration>) -> Self {
        Self {
            monitor: Arc::new(Monitor {
                state: Mutex::new(State {
                    buffer,
                    interrupt_epoch: 0,
                }),
                available: Condvar::new(),
                default_timeout,
                metrics: BufferMetricsCollector::new(),
            }),
            _marker: PhantomData,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.monitor.default_timeout
    }

    pub fn add(&self, item: T) -> Result<(), BufferError> {
        let mut state = self.monitor.state.lock();
        state.buffer.add(item)?;
        self.monitor.metrics.record_added(1);
        self.monitor.available.notify_all();
        Ok(())
    }

    pub fn add_all(&self, items: Vec<T>) -> Result<bool, BufferError> {
        let count = items.len() as u64;
        let mut state = self.monitor.state.lock();
        let changed = state.buffer.add_all(items)?;
        self.monitor.metrics.record_added(count);
        self.monitor.available.notify_all();
        Ok(changed)
    }

    /// Returns a copy of the next element, waiting for one to arrive.
    pub fn get(&self) -> Result<T, BufferError>
    where
        T: Clone,
    {
        let state = self.await_element(self.monitor.default_timeout)?;
        state.buffer.get().cloned()
    }

    pub fn get_timeout(&self, timeout: Duration) -> Result<T, BufferError>
    where
        T: Clone,
    {
        let state = self.await_element(Some(timeout))?;
        state.buffer.get().cloned()
    }

    /// Removes the next element, waiting for one to arrive.
    pub fn remove(&self) -> Result<T, BufferError> {
        self.remove_within(self.monitor.default_timeout)
    }

    pub fn remove_timeout(&self, timeout: Duration) -> Result<T, BufferError> {
        self.remove_within(Some(timeout))
    }

    fn remove_within(&self, timeout: Option<Duration>) -> Result<T, BufferError> {
        let mut state = self.await_element(timeout)?;
        let item = state.buffer.remove()?;
        self.monitor.metrics.record_removed();
        Ok(item)
    }

    /// Blocks until the buffer is non-empty and returns the held lock.
    ///
    /// With a timeout, the time already spent waiting is deducted before
    /// every re-wait.
    fn await_element(
        &self,
        timeout: Option<Duration>,
    ) -> Result<MutexGuard<'_, State<B>>, BufferError> {
        let mut state = self.monitor.state.lock();
        let epoch = state.interrupt_epoch;
        let started = Instant::now();

        while state.buffer.is_empty() {
            match timeout {
                None => {
                    self.monitor.metrics.record_wait();
                    self.monitor.available.wait(&mut state);
                }
                Some(timeout) => {
                    let remaining = timeout.saturating_sub(started.elapsed());
                    if remaining.is_zero() {
                        self.monitor.metrics.record_timeout();
                        tracing::debug!(?timeout, "Timed out waiting for a buffer element");
                        return Err(BufferError::Underflow {
                            reason: UnderflowReason::TimedOut,
                        });
                    }
                    self.monitor.metrics.record_wait();
                    let _ = self.monitor.available.wait_for(&mut state, remaining);
                }
            }

            if state.interrupt_epoch != epoch {
                self.monitor.metrics.record_interrupt();
                tracing::debug!("Buffer waiter interrupted");
                return Err(BufferError::Underflow {
                    reason: UnderflowReason::Interrupted,
                });
            }
            tracing::trace!(empty = state.buffer.is_empty(), "Buffer waiter woke");
        }

        Ok(state)
    }

    /// Fails every `get`/`remove` currently blocked on this buffer with an
    /// interrupted underflow. Calls that start afterwards are unaffected and
    /// the buffer contents are untouched.
    pub fn interrupt_waiters(&self) {
        let mut state = self.monitor.state.lock();
        state.interrupt_epoch = state.interrupt_epoch.wrapping_add(1);
        self.monitor.available.notify_all();
    }

    pub fn len(&self) -> usize {
        self.monitor.state.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitor.state.lock().buffer.is_empty()
    }

    /// Runs `f` against the wrapped buffer under the lock, for operations the
    /// [`Buffer`] trait does not cover (indexed access, removal by value,
    /// iteration). Waiters are woken afterwards in case `f` inserted.
    pub fn with_inner<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut B) -> R,
    {
        let mut state = self.monitor.state.lock();
        let result = f(&mut state.buffer);
        self.monitor.available.notify_all();
        result
    }

    pub fn metrics(&self) -> BufferMetrics {
        self.monitor.metrics.snapshot()
    }

    /// Recovers the wrapped buffer once this is the last handle.
    pub fn into_inner(self) -> Result<B, Self> {
        match Arc::try_unwrap(self.monitor) {
            Ok(monitor) => Ok(monitor.state.into_inner().buffer),
            Err(monitor) => Err(Self {
                monitor,
                _marker: PhantomData,
            }),
        }
    }
}

impl<T, B> std::fmt::Debug for BlockingBuffer<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingBuffer")
            .field("default_timeout", &self.monitor.default_timeout)
            .field("handles", &Arc::strong_count(&self.monitor))
            .finish_non_exhaustive()
    }
}
