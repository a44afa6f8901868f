//! Per-run mutable state held in the Wasmtime Store.
//!
//! `HostState` owns the output sink, the input source and the handle to the
//! shared memory for the duration of one `Sandbox::run`. Host functions in
//! `linker.rs` only unpack arguments and call the methods here, so the
//! behavior behind every import can be tested without a guest module.

use envhost_hostapi::{
    number, BufferSink, ConsoleSink, HostError, InputSource, LineReader, OutputSink, RunMode,
    INPUT_PROMPT,
};
use wasmtime::Memory;

/// The I/O endpoints a run is wired to.
pub struct HostIo {
    pub output: Box<dyn OutputSink>,
    pub input: Box<dyn InputSource>,
}

impl HostIo {
    pub fn new(output: impl OutputSink + 'static, input: impl InputSource + 'static) -> Self {
        Self {
            output: Box::new(output),
            input: Box::new(input),
        }
    }

    /// Process stdout/stderr for output, stdin for input.
    pub fn stdio(max_line_len: usize) -> Self {
        Self::new(ConsoleSink::stdio(), LineReader::stdin(max_line_len))
    }

    /// In-memory output with `input` as the full stdin contents.
    ///
    /// Returns the sink handle to read the transcript after the run.
    pub fn buffered(input: impl Into<Vec<u8>>, max_line_len: usize) -> (Self, BufferSink) {
        let sink = BufferSink::new();
        let reader = LineReader::new(std::io::Cursor::new(input.into()), max_line_len);
        (Self::new(sink.clone(), reader), sink)
    }
}

/// Per-run host state.
///
/// Created fresh for each `Sandbox::run` call and dropped with the Store.
pub struct HostState {
    /// Input policy, fixed for the whole run.
    pub mode: RunMode,
    /// Where printed lines and prompts go.
    pub output: Box<dyn OutputSink>,
    /// Where input lines come from.
    pub input: Box<dyn InputSource>,
    /// Shared memory offered as `env.memory`. Set once it has been created.
    pub memory: Option<Memory>,
    /// Lines written to normal output.
    pub lines_written: usize,
    /// Lines written to the error channel.
    pub errors_written: usize,
    /// Integer reads that returned a value.
    pub inputs_served: usize,
}

impl HostState {
    pub fn new(mode: RunMode, io: HostIo) -> Self {
        Self {
            mode,
            output: io.output,
            input: io.input,
            memory: None,
            lines_written: 0,
            errors_written: 0,
            inputs_served: 0,
        }
    }

    /// Write one line of normal output.
    pub fn print_line(&mut self, line: &str) -> Result<(), HostError> {
        self.output.write_line(line)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write one `ERROR:`-prefixed line to the error channel.
    pub fn print_error(&mut self, message: &str) -> Result<(), HostError> {
        self.output.write_error(&format!("ERROR: {}", message))?;
        self.errors_written += 1;
        Ok(())
    }

    /// Prompt for and read one integer.
    ///
    /// In console mode any failure is returned. In interactive mode lines
    /// that are not usable numbers are answered with another prompt; running
    /// out of input is still fatal.
    pub fn read_int<T>(
        &mut self,
        parse: fn(&str) -> Result<T, HostError>,
    ) -> Result<T, HostError> {
        loop {
            self.output.prompt(INPUT_PROMPT)?;
            match self.input.read_line().and_then(|line| parse(&line)) {
                Ok(value) => {
                    self.inputs_served += 1;
                    return Ok(value);
                }
                Err(e) if self.mode.reprompts() && e.is_recoverable() => {
                    tracing::debug!(error = %e, "rejected input, prompting again");
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn read_i32(&mut self) -> Result<i32, HostError> {
        self.read_int(number::parse_i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, HostError> {
        self.read_int(number::parse_i64)
    }
}
