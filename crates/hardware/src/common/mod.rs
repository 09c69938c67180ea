//! Common types shared across the simulator.
//!
//! This module provides the fundamental building blocks used by every
//! component. It includes:
//! 1. **Constants:** Machine dimensions and default latencies.
//! 2. **Words:** The 128-bit machine word and its arithmetic helpers.
//! 3. **Registers:** Architectural and physical name spaces.
//! 4. **Errors:** Assembly diagnostics and runtime faults.

/// Machine dimensions and default latencies.
pub mod constants;

/// Assembly and simulation error types.
pub mod error;

/// Architectural and physical register names.
pub mod reg;

/// The machine word and arithmetic helpers.
pub mod word;

pub use constants::{ARCH_REG_COUNT, MEMORY_SIZE, PHYS_REG_COUNT};
pub use error::{AsmError, RenameStall, SimError};
pub use reg::{ArchReg, PhysReg, Reg};
pub use word::Word;
