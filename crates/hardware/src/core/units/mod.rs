//! Functional units.
//!
//! The four units that advance in lockstep each cycle:
//! 1. **Control:** PC, IR, fetch/decode, and control-flow execution.
//! 2. **ALU:** logic and arithmetic with per-op latency.
//! 3. **Memory:** the address space and the multi-cycle load/store engine.
//! 4. **Write-back:** the pending-write queue that retires one result per
//!    cycle into the register file.

/// ALU unit.
pub mod alu;
/// Control unit.
pub mod control;
/// Memory unit.
pub mod memory;
/// Write-back unit.
pub mod writeback;

pub use alu::AluUnit;
pub use control::{ControlUnit, CtrlExec};
pub use memory::{Cell, MemoryAction, MemoryUnit};
pub use writeback::{WriteBack, WriteBackAction};
