//! ALU unit: single-cycle logic/arithmetic, 10-cycle multiply/divide.
//!
//! A completed result is not written back directly: it is deposited into
//! the memory unit's forwarding slot and travels through MEM to WB, which
//! keeps all commits flowing through the same in-order path. If that slot
//! chain is busy the ALU holds its latch and retries next cycle.

use crate::common::error::SimError;
use crate::core::clock::Clock;
use crate::core::regfile::RegisterFile;
use crate::core::units::memory::MemoryUnit;
use crate::isa::AluInst;

/// The ALU stage.
#[derive(Debug, Default)]
pub struct AluUnit {
    current: Option<AluInst>,
    finish_at: Option<u64>,
}

impl AluUnit {
    /// Creates an idle ALU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches an instruction for execution.
    pub fn give_instruction(&mut self, inst: AluInst) {
        debug_assert!(self.current.is_none(), "ALU latch occupied");
        self.current = Some(inst);
    }

    /// True when no instruction is latched.
    pub fn is_available(&self) -> bool {
        self.current.is_none()
    }

    /// The latched instruction, if any.
    pub fn current(&self) -> Option<&AluInst> {
        self.current.as_ref()
    }

    /// Advances the latched instruction one cycle.
    ///
    /// The first call arms the completion timer at `now + latency`. Once
    /// the timer expires the result is computed and pushed into the memory
    /// unit's forwarding slot; a busy memory unit stalls the ALU with the
    /// latch held. Returns whether the instruction finished.
    pub fn execute(
        &mut self,
        clock: &Clock,
        regs: &RegisterFile,
        mem: &mut MemoryUnit,
    ) -> Result<bool, SimError> {
        let Some(inst) = &self.current else {
            return Ok(false);
        };
        tracing::debug!("ALU execute: {inst}");

        if self.finish_at.is_none() {
            self.finish_at = Some(clock.time() + inst.latency());
        }

        if self.finish_at.is_some_and(|finish| clock.time() + 1 >= finish) {
            let action = inst.execute(regs)?;
            if mem.is_mem_busy() {
                tracing::debug!("ALU stalling: memory unit busy");
                return Ok(false);
            }
            tracing::debug!("ALU forward through MEM: {} <- {}", action.reg, action.data);
            mem.pass_to_wb(action);
            self.current = None;
            self.finish_at = None;
            return Ok(true);
        }
        Ok(false)
    }
}
