//! Host function registration via Wasmtime linker.
//!
//! Registers the `env` import table. Each function:
//! 1. Unpacks its arguments (reading guest memory where needed)
//! 2. Calls the matching `HostState` method
//! 3. Turns a `HostError` into a trap, which ends the run
//!
//! The shared memory itself is defined separately by the runtime, since it
//! must be created inside the run's Store.

use envhost_hostapi::{number, HostError};
use wasmtime::{Caller, Extern, Linker, Memory};

use crate::error::SandboxError;
use crate::host_impl::HostState;
use crate::memory;

/// Namespace every host import lives in.
pub const IMPORT_MODULE: &str = "env";

/// Name of the shared memory import.
pub const MEMORY_IMPORT: &str = "memory";

/// Memory the guest means when it passes an offset.
///
/// A module that exports its own memory is read through that export; any
/// other module uses the shared memory the host provided.
fn guest_memory(caller: &mut Caller<'_, HostState>) -> Result<Memory, HostError> {
    caller
        .get_export("memory")
        .and_then(Extern::into_memory)
        .or(caller.data().memory)
        .ok_or(HostError::MissingMemory)
}

/// Decode `[ptr, ptr+len)` of guest memory as text.
fn guest_text(caller: &mut Caller<'_, HostState>, ptr: i32, len: i32) -> Result<String, HostError> {
    let mem = guest_memory(caller)?;
    let text = memory::read_text(mem.data(&*caller), ptr, len)?;
    Ok(text.into_owned())
}

/// Register all `env` host functions with the linker.
pub fn register_host_functions(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    register_print(linker)?;
    register_print_err(linker)?;
    register_print_numbers(linker)?;
    register_print_bool(linker)?;
    register_input(linker)?;
    register_abort(linker)?;
    Ok(())
}

// ── Text output ──

fn register_print(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "print",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> wasmtime::Result<()> {
            let text = guest_text(&mut caller, ptr, len)?;
            tracing::trace!(ptr, len, "print");
            caller.data_mut().print_line(&text)?;
            Ok(())
        },
    )?;
    Ok(())
}

fn register_print_err(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "print_err",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> wasmtime::Result<()> {
            let text = guest_text(&mut caller, ptr, len)?;
            tracing::trace!(ptr, len, "print_err");
            caller.data_mut().print_error(&text)?;
            Ok(())
        },
    )?;
    Ok(())
}

// ── Number output ──
//
// The four widths only differ in how the guest passes the value; all of
// them end up in `print_line`.

fn register_print_numbers(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "print_i32",
        |mut caller: Caller<'_, HostState>, value: i32| -> wasmtime::Result<()> {
            caller.data_mut().print_line(&value.to_string())?;
            Ok(())
        },
    )?;
    linker.func_wrap(
        IMPORT_MODULE,
        "print_i64",
        |mut caller: Caller<'_, HostState>, value: i64| -> wasmtime::Result<()> {
            caller.data_mut().print_line(&value.to_string())?;
            Ok(())
        },
    )?;
    linker.func_wrap(
        IMPORT_MODULE,
        "print_f32",
        |mut caller: Caller<'_, HostState>, value: f32| -> wasmtime::Result<()> {
            caller.data_mut().print_line(&number::format_f32(value))?;
            Ok(())
        },
    )?;
    linker.func_wrap(
        IMPORT_MODULE,
        "print_f64",
        |mut caller: Caller<'_, HostState>, value: f64| -> wasmtime::Result<()> {
            caller.data_mut().print_line(&number::format_f64(value))?;
            Ok(())
        },
    )?;
    Ok(())
}

fn register_print_bool(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "print_bool",
        |mut caller: Caller<'_, HostState>, value: i32| -> wasmtime::Result<()> {
            caller.data_mut().print_line(number::format_bool(value))?;
            Ok(())
        },
    )?;
    Ok(())
}

// ── Input ──

fn register_input(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "input_i32",
        |mut caller: Caller<'_, HostState>| -> wasmtime::Result<i32> {
            let value = caller.data_mut().read_i32()?;
            tracing::trace!(value, "input_i32");
            Ok(value)
        },
    )?;
    linker.func_wrap(
        IMPORT_MODULE,
        "input_i64",
        |mut caller: Caller<'_, HostState>| -> wasmtime::Result<i64> {
            let value = caller.data_mut().read_i64()?;
            tracing::trace!(value, "input_i64");
            Ok(value)
        },
    )?;
    Ok(())
}

// ── Abort ──

fn register_abort(linker: &mut Linker<HostState>) -> Result<(), SandboxError> {
    linker.func_wrap(
        IMPORT_MODULE,
        "abort",
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> wasmtime::Result<()> {
            let message = guest_text(&mut caller, ptr, len)?;
            Err(HostError::Abort(message).into())
        },
    )?;
    Ok(())
}
