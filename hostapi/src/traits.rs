//! Host I/O traits — the two capabilities a guest module can reach.
//!
//! The sandbox owns one `OutputSink` and one `InputSource` per run and
//! routes every `env` import through them. Implementations work with Rust
//! strings; pointer validation and UTF-8 decoding of guest memory happen in
//! the sandbox before these are called.

use crate::error::HostError;

/// Destination for everything the guest prints.
pub trait OutputSink: Send {
    /// Write one line of normal output. The sink appends the newline.
    fn write_line(&mut self, line: &str) -> Result<(), HostError>;

    /// Write one line to the error channel. The sink appends the newline.
    fn write_error(&mut self, line: &str) -> Result<(), HostError>;

    /// Show an input prompt. No newline is appended and the text must be
    /// visible before the host blocks on input.
    fn prompt(&mut self, text: &str) -> Result<(), HostError>;
}

/// Source of input lines for `input_i32` / `input_i64`.
pub trait InputSource: Send {
    /// Read one line without its terminator.
    ///
    /// Returns `Err(NoMoreInput)` if input ends before a newline and
    /// `Err(LineTooLong)` if the line exceeds the source's limit.
    fn read_line(&mut self) -> Result<String, HostError>;
}
