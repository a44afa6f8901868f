//! In-memory output sink.
//!
//! `BufferSink` keeps printed lines, error lines and prompts as a log instead
//! of writing them to a terminal. Clones share the same log, so a caller can
//! hand one clone to the sandbox and read the transcript from another after
//! the run. Useful for embedding the harness behind a UI and for tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::HostError;
use crate::traits::OutputSink;

#[derive(Debug, Default)]
struct Transcript {
    lines: Vec<String>,
    errors: Vec<String>,
    prompts: Vec<String>,
}

/// Shared, cloneable in-memory `OutputSink`.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    transcript: Arc<Mutex<Transcript>>,
}

impl BufferSink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lines of normal output, in the order written.
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    /// Lines written to the error channel.
    pub fn errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }

    /// Prompts shown, one entry per input attempt.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Normal output rendered the way a console would show it.
    pub fn stdout_text(&self) -> String {
        self.lock()
            .lines
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, line: &str) -> Result<(), HostError> {
        self.lock().lines.push(line.to_owned());
        Ok(())
    }

    fn write_error(&mut self, line: &str) -> Result<(), HostError> {
        self.lock().errors.push(line.to_owned());
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), HostError> {
        self.lock().prompts.push(text.to_owned());
        Ok(())
    }
}
