//! Shared test helpers for integration tests.
//!
//! Provides WAT module builders for the `env` import table and helpers that
//! run a module against in-memory I/O.

#![allow(dead_code)]

use envhost_hostapi::{BufferSink, RunMode};
use envhost_sandbox::{HostIo, RunOutcome, Sandbox, SandboxConfig, SandboxError};

/// Import declarations for the whole `env` table, with `$name` ids.
pub const ENV_IMPORTS: &str = r#"
    (import "env" "memory" (memory 1))
    (import "env" "print" (func $print (param i32 i32)))
    (import "env" "print_err" (func $print_err (param i32 i32)))
    (import "env" "print_i32" (func $print_i32 (param i32)))
    (import "env" "print_i64" (func $print_i64 (param i64)))
    (import "env" "print_f32" (func $print_f32 (param f32)))
    (import "env" "print_f64" (func $print_f64 (param f64)))
    (import "env" "print_bool" (func $print_bool (param i32)))
    (import "env" "input_i32" (func $input_i32 (result i32)))
    (import "env" "input_i64" (func $input_i64 (result i64)))
    (import "env" "abort" (func $abort (param i32 i32)))
"#;

/// Build a module that imports the full `env` table.
///
/// `body` is placed inside the module after the imports and may define data
/// segments and functions. It must export `main`.
pub fn env_module(body: &str) -> String {
    format!("(module {} {})", ENV_IMPORTS, body)
}

/// Build a module whose `main` consists of `instrs`.
pub fn main_module(instrs: &str) -> String {
    env_module(&format!(r#"(func (export "main") {})"#, instrs))
}

/// Result of one in-memory run.
pub struct Run {
    pub result: Result<RunOutcome, SandboxError>,
    pub output: BufferSink,
}

impl Run {
    pub fn lines(&self) -> Vec<String> {
        self.output.lines()
    }

    pub fn unwrap(&self) -> RunOutcome {
        match &self.result {
            Ok(outcome) => *outcome,
            Err(e) => panic!("run failed: {:?}", e),
        }
    }

    pub fn unwrap_err(&self) -> &SandboxError {
        match &self.result {
            Ok(outcome) => panic!("run succeeded unexpectedly: {:?}", outcome),
            Err(e) => e,
        }
    }
}

/// Run `wat` in the given mode with `input` as the complete stdin.
pub fn run_in_mode(wat: &str, input: &str, mode: RunMode) -> Run {
    let config = SandboxConfig {
        mode,
        ..SandboxConfig::default()
    };
    let max_line_len = config.max_line_len;
    let sandbox = Sandbox::new(wat.as_bytes(), config).expect("module should load");
    let (io, output) = HostIo::buffered(input, max_line_len);
    Run {
        result: sandbox.run(io),
        output,
    }
}

/// Run `wat` in console mode with `input` as the complete stdin.
pub fn run_with_input(wat: &str, input: &str) -> Run {
    run_in_mode(wat, input, RunMode::Console)
}

/// Run `wat` in console mode with no input.
pub fn run(wat: &str) -> Run {
    run_with_input(wat, "")
}
