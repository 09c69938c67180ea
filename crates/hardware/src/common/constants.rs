//! Global machine constants.
//!
//! This module defines the fixed dimensions of the simulated machine. It includes:
//! 1. **Memory Constants:** Address-space size shared by program and data.
//! 2. **Register Constants:** Architectural and physical register file sizes.
//! 3. **Latency Constants:** Default cycle counts for the functional units.

/// Number of memory cells in the flat address space.
///
/// Program and data share this space; the assembled image is loaded at
/// address 0.
pub const MEMORY_SIZE: usize = 32_000;

/// Number of architectural registers (R0..R13).
pub const ARCH_REG_COUNT: usize = 14;

/// Number of physical registers (P0..P56) backing the architectural names.
pub const PHYS_REG_COUNT: usize = 57;

/// Default latency of a load or store, in cycles.
///
/// Counted from the cycle the memory action enters the MEM-stage queue.
pub const MEM_LATENCY_CYCLES: u64 = 100;

/// Latency of a multiply or divide, in cycles.
pub const MUL_DIV_LATENCY_CYCLES: u64 = 10;

/// Latency of every other ALU operation, in cycles.
pub const ALU_LATENCY_CYCLES: u64 = 1;
