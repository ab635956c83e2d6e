use thiserror::Error;

/// Why a `get`/`remove` came back empty-handed.
///
/// Timeouts and interruptions on the blocking decorator are not separate
/// error kinds; they are underflows that carry their cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderflowReason {
    Empty,
    TimedOut,
    Interrupted,
}

impl std::fmt::Display for UnderflowReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnderflowReason::Empty => f.write_str("buffer is empty"),
            UnderflowReason::TimedOut => f.write_str("timed out waiting for an element"),
            UnderflowReason::Interrupted => f.write_str("interrupted while waiting"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Buffer underflow: {reason}")]
    Underflow { reason: UnderflowReason },

    #[error("Buffer overflow: capacity {capacity} exhausted")]
    Overflow { capacity: usize },

    #[error("Invalid buffer capacity: {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("Index {index} out of range for buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

// Error recovery and fallback mechanisms
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorRecovery {
    /// Wait for the buffer state to change, then retry
    RetryAfterWait,
    /// Caller should pick a different argument
    UseFallback,
    /// Fail permanently
    Fail,
}

impl BufferError {
    pub fn empty() -> Self {
        BufferError::Underflow {
            reason: UnderflowReason::Empty,
        }
    }

    pub fn is_underflow(&self) -> bool {
        matches!(self, BufferError::Underflow { .. })
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            BufferError::Underflow { .. }
            | BufferError::Overflow { .. }
            | BufferError::IndexOutOfRange { .. } => true,
            BufferError::InvalidCapacity { .. } => false,
        }
    }

    /// An interrupted wait is a cancellation and is never worth repeating.
    pub fn recovery_strategy(&self) -> ErrorRecovery {
        match self {
            BufferError::Underflow {
                reason: UnderflowReason::Interrupted,
            }
            | BufferError::InvalidCapacity { .. } => ErrorRecovery::Fail,
            BufferError::Underflow { .. } | BufferError::Overflow { .. } => {
                ErrorRecovery::RetryAfterWait
            }
            BufferError::IndexOutOfRange { .. } => ErrorRecovery::UseFallback,
        }
    }
}

/// Runs `operation` exactly once.
///
/// A failure is traced together with its recovery strategy and handed back
/// unchanged; acting on the strategy is up to the caller.
pub fn safe_buffer_operation<T, F>(operation: F) -> Result<T, BufferError>
where
    F: FnOnce() -> Result<T, BufferError>,
{
    operation().inspect_err(|error| {
        tracing::debug!(
            %error,
            strategy = ?error.recovery_strategy(),
            "Buffer operation failed"
        );
    })
}
