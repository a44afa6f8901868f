//! Sandbox runtime — Wasmtime engine, module loading, and entry point invocation.
//!
//! The `Sandbox` struct is the main entry point. It compiles a module,
//! validates its imports and entry point, and provides `run` for executing
//! it against a set of host I/O endpoints.

use std::path::Path;

use envhost_hostapi::HostError;
use wasmtime::{Config, Engine, Linker, Module, Store, Val};

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::host_impl::{HostIo, HostState};
use crate::linker::{register_host_functions, IMPORT_MODULE, MEMORY_IMPORT};
use crate::memory::create_shared_memory;
use crate::validation::validate_module;

/// Counters describing what a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutcome {
    /// Lines written to normal output.
    pub lines_written: usize,
    /// Lines written to the error channel via `print_err`.
    pub errors_written: usize,
    /// Integer reads that returned a value.
    pub inputs_served: usize,
}

/// A validated module, ready to run.
///
/// Each `run` creates a fresh Store, shared memory and instance, so one
/// `Sandbox` can run the same module any number of times.
pub struct Sandbox {
    engine: Engine,
    module: Module,
    config: SandboxConfig,
}

impl Sandbox {
    /// Create a new sandbox from WASM bytecode (binary or text format).
    ///
    /// Validates the configuration and the module's imports and entry point
    /// before accepting.
    pub fn new(wasm_bytes: &[u8], config: SandboxConfig) -> Result<Self, SandboxError> {
        config.validate()?;
        let engine = create_engine()?;
        let module = Module::new(&engine, wasm_bytes)?;
        tracing::debug!(
            imports = module.imports().len(),
            exports = module.exports().len(),
            "compiled module"
        );
        validate_module(&module, &config)?;
        Ok(Self {
            engine,
            module,
            config,
        })
    }

    /// Load from a `.wasm` (or `.wat`) file path.
    pub fn from_file(path: &Path, config: SandboxConfig) -> Result<Self, SandboxError> {
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "read module file");
        Self::new(&bytes, config)
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Instantiate the module against the `env` imports and call its entry
    /// point once with no arguments.
    ///
    /// Whatever the entry point returns is discarded. Any failure, including
    /// a fatal host error raised from inside an import, is returned.
    pub fn run(&self, io: HostIo) -> Result<RunOutcome, SandboxError> {
        // 1. Fresh store with this run's I/O
        let mut store = Store::new(&self.engine, HostState::new(self.config.mode, io));

        // 2. Shared memory
        let memory = create_shared_memory(&mut store, &self.config)?;
        store.data_mut().memory = Some(memory);

        // 3. Import table
        let mut linker = Linker::new(&self.engine);
        register_host_functions(&mut linker)?;
        linker.define(&store, IMPORT_MODULE, MEMORY_IMPORT, memory)?;

        // 4. Instantiate (runs the module's start function, if any)
        let instance = linker
            .instantiate(&mut store, &self.module)
            .map_err(|e| match e.downcast::<HostError>() {
                Ok(host) => SandboxError::Aborted(host),
                Err(e) => SandboxError::InstantiationFailed(format!("{:#}", e)),
            })?;
        tracing::debug!("instantiated module");

        // 5. Entry point
        let entry_point = self.config.entry_point.as_str();
        let entry = instance
            .get_func(&mut store, entry_point)
            .ok_or_else(|| SandboxError::MissingEntryPoint(entry_point.to_owned()))?;
        let result_count = entry.ty(&store).results().len();
        let mut results = vec![Val::I32(0); result_count];

        tracing::info!(entry_point, mode = %self.config.mode, "invoking entry point");
        handle_trap(entry.call(&mut store, &[], &mut results))?;

        let state = store.data();
        let outcome = RunOutcome {
            lines_written: state.lines_written,
            errors_written: state.errors_written,
            inputs_served: state.inputs_served,
        };
        tracing::info!(?outcome, "entry point returned");
        Ok(outcome)
    }
}

/// Create the Wasmtime engine. Modules get exactly one linear memory.
fn create_engine() -> Result<Engine, SandboxError> {
    let mut wasm_config = Config::new();
    wasm_config.wasm_multi_memory(false);
    wasm_config.wasm_threads(false);
    Ok(Engine::new(&wasm_config)?)
}

/// Convert a failed guest call into a `SandboxError`.
///
/// Errors raised by host imports come back wrapped in the trap; they are
/// unwrapped into `SandboxError::Aborted`. Anything else is a guest trap.
fn handle_trap<R>(result: Result<R, anyhow::Error>) -> Result<R, SandboxError> {
    match result {
        Ok(val) => Ok(val),
        Err(e) => match e.downcast::<HostError>() {
            Ok(host) => Err(SandboxError::Aborted(host)),
            Err(e) => Err(SandboxError::GuestTrapped(format!("{:#}", e))),
        },
    }
}
