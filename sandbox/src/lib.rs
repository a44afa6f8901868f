//! `envhost-sandbox` — Wasmtime host harness for small compiled programs.
//!
//! This crate loads a WASM module, offers it a fixed `env` import table and
//! calls its entry point. The import table covers:
//!
//! - **Text output:** `print`, `print_err` read UTF-8 from linear memory
//! - **Number output:** `print_i32`, `print_i64`, `print_f32`, `print_f64`, `print_bool`
//! - **Integer input:** `input_i32`, `input_i64` read one line per call
//! - **Abort:** `abort` ends the run with the guest's message
//! - **Shared memory:** `env.memory`, bounded by `SandboxConfig`
//!
//! Modules are validated against that table before any instance exists.
//! The primary entry point is [`Sandbox::run`].

pub mod error;
pub mod config;
pub mod memory;
pub mod host_impl;
pub mod validation;
pub mod linker;
pub mod runtime;

pub use error::SandboxError;
pub use config::SandboxConfig;
pub use host_impl::HostIo;
pub use runtime::{RunOutcome, Sandbox};
