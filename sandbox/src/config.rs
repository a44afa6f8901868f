//! Sandbox configuration.

use envhost_hostapi::{RunMode, DEFAULT_MAX_LINE_LEN};

use crate::error::SandboxError;
use crate::memory::MAX_PAGES;

/// Default initial size of the shared memory (10 pages = 640 KiB).
pub const DEFAULT_INITIAL_PAGES: u32 = 10;

/// Default maximum size of the shared memory (100 pages = 6.25 MiB).
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Default name of the exported entry point.
pub const DEFAULT_ENTRY_POINT: &str = "main";

/// Configuration for loading and running one module.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Initial size of the `env.memory` the host provides (1 page = 64 KiB).
    pub initial_memory_pages: u32,

    /// Hard maximum the shared memory may grow to.
    pub max_memory_pages: u32,

    /// Longest accepted input line in bytes, newline excluded.
    pub max_line_len: usize,

    /// Exported zero-argument function invoked after instantiation.
    pub entry_point: String,

    /// Input policy for `input_i32` / `input_i64`.
    pub mode: RunMode,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            initial_memory_pages: DEFAULT_INITIAL_PAGES,
            max_memory_pages: DEFAULT_MAX_PAGES,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            entry_point: DEFAULT_ENTRY_POINT.to_owned(),
            mode: RunMode::Console,
        }
    }
}

impl SandboxConfig {
    /// Reject settings no run could use.
    pub fn validate(&self) -> Result<(), SandboxError> {
        if self.max_memory_pages > MAX_PAGES {
            return Err(SandboxError::InvalidConfig(format!(
                "max memory pages {} exceeds the 32-bit limit of {}",
                self.max_memory_pages, MAX_PAGES
            )));
        }
        if self.initial_memory_pages > self.max_memory_pages {
            return Err(SandboxError::InvalidConfig(format!(
                "initial memory pages {} exceed maximum {}",
                self.initial_memory_pages, self.max_memory_pages
            )));
        }
        if self.max_line_len == 0 {
            return Err(SandboxError::InvalidConfig(
                "max line length must be at least 1 byte".into(),
            ));
        }
        if self.entry_point.is_empty() {
            return Err(SandboxError::InvalidConfig(
                "entry point name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
