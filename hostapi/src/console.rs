//! Console output sink.

use std::io::{self, Stderr, Stdout, Write};

use crate::error::HostError;
use crate::traits::OutputSink;

/// `OutputSink` over two writers: normal output and the error channel.
///
/// Every call flushes, so output and prompts appear in call order even when
/// stdout is a pipe.
#[derive(Debug)]
pub struct ConsoleSink<W, E> {
    out: W,
    err: E,
}

impl ConsoleSink<Stdout, Stderr> {
    /// Sink bound to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> ConsoleSink<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the sink and return its writers.
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write + Send, E: Write + Send> OutputSink for ConsoleSink<W, E> {
    fn write_line(&mut self, line: &str) -> Result<(), HostError> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    fn write_error(&mut self, line: &str) -> Result<(), HostError> {
        writeln!(self.err, "{}", line)?;
        self.err.flush()?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<(), HostError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}
