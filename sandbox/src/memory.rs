//! Bounds-checked reads from guest linear memory.
//!
//! The host never writes into guest memory; it only reads `(offset, length)`
//! ranges the guest hands to `print`, `print_err` and `abort`. Every range is
//! checked against the current memory size before slicing. Out-of-bounds
//! access returns `HostError::BadPointer`.

use std::borrow::Cow;

use envhost_hostapi::HostError;
use wasmtime::{AsContextMut, Memory, MemoryType};

use crate::config::SandboxConfig;
use crate::error::SandboxError;

/// Size of one WASM page in bytes.
pub const WASM_PAGE_SIZE: usize = 65536;

/// Page count of a full 32-bit address space (4 GiB).
pub const MAX_PAGES: u32 = 65536;

/// Validate that `[ptr, ptr+len)` lies within `mem_size` bytes.
///
/// Negative values are rejected rather than reinterpreted as unsigned.
pub fn validate_range(mem_size: usize, ptr: i32, len: i32) -> Result<(usize, usize), HostError> {
    if ptr < 0 || len < 0 {
        return Err(HostError::BadPointer);
    }
    let start = ptr as usize;
    let end = start
        .checked_add(len as usize)
        .ok_or(HostError::BadPointer)?;
    if end > mem_size {
        return Err(HostError::BadPointer);
    }
    Ok((start, end))
}

/// Borrow `len` bytes of guest memory starting at `ptr`.
pub fn read_bytes(mem: &[u8], ptr: i32, len: i32) -> Result<&[u8], HostError> {
    let (start, end) = validate_range(mem.len(), ptr, len)?;
    Ok(&mem[start..end])
}

/// Read a guest string, replacing malformed UTF-8 with U+FFFD.
pub fn read_text(mem: &[u8], ptr: i32, len: i32) -> Result<Cow<'_, str>, HostError> {
    Ok(String::from_utf8_lossy(read_bytes(mem, ptr, len)?))
}

/// Create the shared `env.memory` for one run.
pub fn create_shared_memory(
    store: impl AsContextMut,
    config: &SandboxConfig,
) -> Result<Memory, SandboxError> {
    let ty = MemoryType::new(config.initial_memory_pages, Some(config.max_memory_pages));
    Memory::new(store, ty).map_err(|e| {
        SandboxError::MemoryError(format!(
            "cannot allocate {} pages (max {}): {}",
            config.initial_memory_pages, config.max_memory_pages, e
        ))
    })
}
