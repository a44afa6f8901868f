//! Sandbox error types.

use envhost_hostapi::HostError;

/// Top-level error type for the sandbox crate.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// Wasmtime engine or compilation error.
    #[error("wasmtime error: {0}")]
    Wasmtime(#[from] anyhow::Error),

    /// Configuration values that cannot describe a run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Module validation failed (missing entry point, unknown imports, etc.).
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Linking or instantiation failed.
    #[error("instantiation failed: {0}")]
    InstantiationFailed(String),

    /// The configured entry point is not an exported function.
    #[error("entry point '{0}' is not exported")]
    MissingEntryPoint(String),

    /// Shared memory could not be created.
    #[error("memory error: {0}")]
    MemoryError(String),

    /// A host import failed fatally (bad input, `abort`, out-of-bounds print).
    #[error("{0}")]
    Aborted(HostError),

    /// WASM guest trapped on its own (unreachable, division by zero, ...).
    #[error("guest trapped: {0}")]
    GuestTrapped(String),

    /// Reading the module file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
