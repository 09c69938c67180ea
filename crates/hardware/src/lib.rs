//! Cycle-accurate simulator of an in-order scalar pipeline.
//!
//! This crate implements a five-stage (Fetch, Decode, Execute, Memory,
//! Write-Back) scalar processor model with the following:
//! 1. **Renaming:** 14 architectural names over 57 physical registers via a
//!    register alias table and free list.
//! 2. **Hazards:** data-hazard detection with operand forwarding out of the
//!    EX/MEM slot and the MEM/WB queue; structural stalls on occupied units.
//! 3. **Branches:** always-not-taken prediction with IR squash on a taken
//!    branch; unconditional jumps resolve early at decode.
//! 4. **Timing:** single-cycle ALU ops, 10-cycle multiply/divide, 100-cycle
//!    memory accesses, one write-back retirement per cycle.
//! 5. **Assembler:** line-oriented textual assembly to a symbolic
//!    instruction/data image loaded at address 0.

/// Assembler: text to memory image.
pub mod asm;
/// Common types (words, registers, errors, constants).
pub mod common;
/// Simulator configuration.
pub mod config;
/// The machine: clock, register file, functional units.
pub mod core;
/// Instruction set definition.
pub mod isa;
/// The processor driver and run loop.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// Assemble source text into a memory image.
pub use crate::asm::assemble;
/// Assembly and runtime error types.
pub use crate::common::error::{AsmError, SimError};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level processor; owns the clock and every functional unit.
pub use crate::sim::Processor;
/// Run statistics and the end-of-run report.
pub use crate::stats::SimStats;
