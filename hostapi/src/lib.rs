//! `envhost-hostapi` — host I/O surface for the envhost WASM harness.
//!
//! This crate is independent of the execution engine. It defines what the
//! host does when a guest module calls one of its `env` imports:
//!
//! - `OutputSink` trait — where printed lines and prompts go
//! - `ConsoleSink` — stdout/stderr sink for command-line runs
//! - `BufferSink` — in-memory sink (log view) for embedding and tests
//! - `InputSource` trait and `LineReader` — byte-at-a-time line input
//! - `RunMode` — console vs interactive input policy
//! - `number` — integer parsing with flooring, float rendering
//! - `HostError` — every way a host call can fail

pub mod error;
pub mod types;
pub mod traits;
pub mod console;
pub mod buffer_sink;
pub mod line_reader;
pub mod number;

// Re-export commonly used types at the crate root.
pub use error::HostError;
pub use types::{RunMode, DEFAULT_MAX_LINE_LEN, INPUT_PROMPT};
pub use traits::{InputSource, OutputSink};
pub use console::ConsoleSink;
pub use buffer_sink::BufferSink;
pub use line_reader::LineReader;
