//! Run mode and input constants.

use std::fmt;
use std::str::FromStr;

/// Prompt written before each integer read.
pub const INPUT_PROMPT: &str = "input int: ";

/// Default maximum length of one input line in bytes (newline excluded).
pub const DEFAULT_MAX_LINE_LEN: usize = 256;

/// How integer input behaves when a line cannot be used.
///
/// Chosen once at startup and handed to the host state; host functions never
/// inspect the environment themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Non-interactive: a bad line aborts the run.
    #[default]
    Console,
    /// A person is typing: a bad line is reported and the prompt repeats.
    Interactive,
}

impl RunMode {
    /// Pick a mode from whether stdin is attached to a terminal.
    pub fn detect(stdin_is_terminal: bool) -> Self {
        if stdin_is_terminal {
            Self::Interactive
        } else {
            Self::Console
        }
    }

    /// Whether a recoverable input error leads to another prompt.
    pub fn reprompts(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("console"),
            Self::Interactive => f.write_str("interactive"),
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "interactive" => Ok(Self::Interactive),
            other => Err(format!(
                "unknown run mode '{}' (expected 'console' or 'interactive')",
                other
            )),
        }
    }
}
