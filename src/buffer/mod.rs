pub mod blocking;
pub mod error;
pub mod fifo;
pub mod metrics;
pub mod priority;
pub mod ring;
pub mod traits;

pub use blocking::BlockingBuffer;
pub use error::{BufferError, ErrorRecovery, UnderflowReason, safe_buffer_operation};
pub use fifo::{DEFAULT_CAPACITY, FifoBuffer, OverflowPolicy};
pub use metrics::{BufferMetrics, BufferMetricsCollector};
pub use priority::PriorityBuffer;
pub use ring::{CircularArrayStore, wrap_index};
pub use traits::Buffer;
