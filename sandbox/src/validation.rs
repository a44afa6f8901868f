//! WASM module validation — import/export compatibility checks.
//!
//! Validates that a compiled module can be run by the harness before any
//! Store is created. Checks:
//!
//! 1. The entry point is an exported function taking no parameters
//! 2. All imports come from the `env` namespace
//! 3. Function imports match a host function name and signature exactly
//! 4. A memory import is `env.memory` and fits the configured page limits
//!
//! Wasmtime would reject most of these at instantiation as well; checking
//! here gives an error naming the offending import.

use wasmtime::{ExternType, FuncType, MemoryType, Module, ValType};

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::linker::{IMPORT_MODULE, MEMORY_IMPORT};

/// Numeric value types used by the host ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    I32,
    I64,
    F32,
    F64,
}

impl AbiType {
    fn of(vt: &ValType) -> Option<Self> {
        match vt {
            ValType::I32 => Some(Self::I32),
            ValType::I64 => Some(Self::I64),
            ValType::F32 => Some(Self::F32),
            ValType::F64 => Some(Self::F64),
            _ => None,
        }
    }
}

use AbiType::{F32, F64, I32, I64};

/// Host function table: (name, params, results).
pub const HOST_FUNCTIONS: &[(&str, &[AbiType], &[AbiType])] = &[
    ("print", &[I32, I32], &[]),
    ("print_err", &[I32, I32], &[]),
    ("print_i32", &[I32], &[]),
    ("print_i64", &[I64], &[]),
    ("print_f32", &[F32], &[]),
    ("print_f64", &[F64], &[]),
    ("print_bool", &[I32], &[]),
    ("input_i32", &[], &[I32]),
    ("input_i64", &[], &[I64]),
    ("abort", &[I32, I32], &[]),
];

/// Validate that a module can be linked against the host and invoked.
pub fn validate_module(module: &Module, config: &SandboxConfig) -> Result<(), SandboxError> {
    validate_entry_point(module, &config.entry_point)?;
    validate_imports(module, config)?;
    Ok(())
}

/// Check that the entry point is exported as a zero-parameter function.
///
/// Results are allowed and ignored.
fn validate_entry_point(module: &Module, entry_point: &str) -> Result<(), SandboxError> {
    let export = module
        .exports()
        .find(|e| e.name() == entry_point)
        .ok_or_else(|| SandboxError::MissingEntryPoint(entry_point.to_owned()))?;

    let func_ty = match export.ty() {
        ExternType::Func(ft) => ft,
        _ => {
            return Err(SandboxError::ValidationError(format!(
                "export '{}' must be a function",
                entry_point
            )));
        }
    };

    let param_count = func_ty.params().len();
    if param_count != 0 {
        return Err(SandboxError::ValidationError(format!(
            "entry point '{}' must take no parameters, takes {}",
            entry_point, param_count
        )));
    }
    Ok(())
}

/// Check every import against the host table.
fn validate_imports(module: &Module, config: &SandboxConfig) -> Result<(), SandboxError> {
    for import in module.imports() {
        let module_name = import.module();
        let name = import.name();

        if module_name != IMPORT_MODULE {
            return Err(SandboxError::ValidationError(format!(
                "import from unknown module '{}' (only '{}' is provided): {}",
                module_name, IMPORT_MODULE, name
            )));
        }

        match import.ty() {
            ExternType::Func(ft) => validate_func_import(name, &ft)?,
            ExternType::Memory(mt) if name == MEMORY_IMPORT => {
                validate_memory_import(&mt, config)?
            }
            _ => {
                return Err(SandboxError::ValidationError(format!(
                    "unsupported import {}::{} (host provides functions and '{}' only)",
                    module_name, name, MEMORY_IMPORT
                )));
            }
        }
    }
    Ok(())
}

fn validate_func_import(name: &str, ft: &FuncType) -> Result<(), SandboxError> {
    let &(_, params, results) = HOST_FUNCTIONS
        .iter()
        .find(|(host_name, _, _)| *host_name == name)
        .ok_or_else(|| {
            SandboxError::ValidationError(format!(
                "unknown host function: {}::{}",
                IMPORT_MODULE, name
            ))
        })?;

    let got_params: Vec<Option<AbiType>> = ft.params().map(|vt| AbiType::of(&vt)).collect();
    let got_results: Vec<Option<AbiType>> = ft.results().map(|vt| AbiType::of(&vt)).collect();
    let want_params: Vec<Option<AbiType>> = params.iter().copied().map(Some).collect();
    let want_results: Vec<Option<AbiType>> = results.iter().copied().map(Some).collect();

    if got_params != want_params || got_results != want_results {
        return Err(SandboxError::ValidationError(format!(
            "import {}::{} has signature {:?} -> {:?}, host provides {:?} -> {:?}",
            IMPORT_MODULE, name, got_params, got_results, params, results
        )));
    }
    Ok(())
}

/// The host memory has `initial` pages and may grow to `max`. An import
/// accepts it when its minimum is at most `initial` and its maximum, if
/// any, is at least `max`.
fn validate_memory_import(mt: &MemoryType, config: &SandboxConfig) -> Result<(), SandboxError> {
    if mt.is_64() || mt.is_shared() {
        return Err(SandboxError::ValidationError(
            "env.memory must be a 32-bit unshared memory".into(),
        ));
    }
    let initial = u64::from(config.initial_memory_pages);
    let max = u64::from(config.max_memory_pages);
    if mt.minimum() > initial {
        return Err(SandboxError::ValidationError(format!(
            "env.memory requires at least {} pages, host provides {} \
             (raise --initial-pages and --max-pages)",
            mt.minimum(),
            initial
        )));
    }
    if let Some(import_max) = mt.maximum() {
        if import_max < max {
            return Err(SandboxError::ValidationError(format!(
                "env.memory allows at most {} pages, host memory may grow to {} \
                 (lower --max-pages)",
                import_max, max
            )));
        }
    }
    Ok(())
}
