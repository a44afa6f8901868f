//! Host-side error type for the envhost import surface.
//!
//! Every `HostError` that escapes a host call is fatal for the run: the
//! sandbox traps the guest and the CLI reports `ABORT: <message>`. The only
//! exception is interactive input, which re-prompts on the errors for which
//! [`HostError::is_recoverable`] holds.

/// Error returned by host import implementations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Input ended before a complete line was read.
    #[error("no more input")]
    NoMoreInput,

    /// The input line is not a number. Carries the line verbatim.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// The input parsed as a number but does not fit the requested width.
    #[error("number out of range: {0}")]
    OutOfRange(String),

    /// The input line exceeded the configured maximum length.
    #[error("input line too long (limit is {limit} bytes)")]
    LineTooLong { limit: usize },

    /// An `(offset, length)` pair from the guest lies outside linear memory.
    #[error("memory access out of bounds")]
    BadPointer,

    /// The guest has neither an exported nor an imported linear memory.
    #[error("no linear memory available")]
    MissingMemory,

    /// The guest called `abort` with this message.
    #[error("{0}")]
    Abort(String),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    /// Whether an interactive prompt may ask again instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber(_) | Self::OutOfRange(_) | Self::LineTooLong { .. }
        )
    }
}
