#![deny(warnings)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_possible_truncation, // Millisecond counts fit in u64
    clippy::missing_errors_doc,       // Error variants are documented on BufferError
    clippy::missing_panics_doc,       // Internal API
    clippy::module_name_repetitions,  // e.g. BufferError in buffer module
    clippy::must_use_candidate,       // Annotated selectively on critical APIs
    clippy::len_without_is_empty,     // is_empty lives on the Buffer trait
    clippy::doc_markdown              // Internal API
)]

pub mod buffer;
pub mod config;
pub mod logging;

// Re-export main types for easy access
pub use buffer::{
    BlockingBuffer, Buffer, BufferError, CircularArrayStore, FifoBuffer, OverflowPolicy,
    PriorityBuffer, UnderflowReason,
};
pub use config::{BufferConfig, BufferKind, ConfigError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
