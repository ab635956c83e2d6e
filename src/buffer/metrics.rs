use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct BufferMetrics {
    pub elements_added: u64,
    pub elements_removed: u64,
    pub waits: u64,
    pub timeouts: u64,
    pub interrupts: u64,
    pub uptime: Duration,
}

/// Counters for a [`BlockingBuffer`](super::BlockingBuffer).
///
/// Updated while the monitor lock is held, read without it.
#[derive(Debug)]
pub struct BufferMetricsCollector {
    elements_added: AtomicU64,
    elements_removed: AtomicU64,
    waits: AtomicU64,
    timeouts: AtomicU64,
    interrupts: AtomicU64,
    start_time: Instant,
}

impl BufferMetricsCollector {
    pub fn new() -> Self {
        Self {
            elements_added: AtomicU64::new(0),
            elements_removed: AtomicU64::new(0),
            waits: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            interrupts: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn snapshot(&self) -> BufferMetrics {
        BufferMetrics {
            elements_added: self.elements_added.load(Ordering::Relaxed),
            elements_removed: self.elements_removed.load(Ordering::Relaxed),
            waits: self.waits.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            interrupts: self.interrupts.load(Ordering::Relaxed),
            uptime: self.start_time.elapsed(),
        }
    }

    pub(crate) fn record_added(&self, count: u64) {
        self.elements_added.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_removed(&self) {
        self.elements_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_wait(&self) {
        self.waits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_interrupt(&self) {
        self.interrupts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.elements_added.store(0, Ordering::Relaxed);
        self.elements_removed.store(0, Ordering::Relaxed);
        self.waits.store(0, Ordering::Relaxed);
        self.timeouts.store(0, Ordering::Relaxed);
        self.interrupts.store(0, Ordering::Relaxed);
    }
}

impl Default for BufferMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
