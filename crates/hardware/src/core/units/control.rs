//! Control unit: PC, instruction register, fetch, decode, and control
//! execution.
//!
//! Decode runs in two phases within a cycle. `check_hazards` renames
//! source operands, scans the pipeline for writers of anything the
//! instruction reads, and resolves unconditional jumps early. `decode`
//! renames the destination and dispatches to a functional unit when every
//! unit latch is free and no hazard is outstanding. An instruction held in
//! the IR re-enters both phases on later cycles; already-renamed operands
//! mark the re-entry so branches are not counted twice.

use crate::common::error::{RenameStall, SimError};
use crate::common::reg::Reg;
use crate::config::Config;
use crate::core::regfile::RegisterFile;
use crate::core::units::alu::AluUnit;
use crate::core::units::memory::{Cell, MemoryUnit};
use crate::core::units::writeback::WriteBack;
use crate::isa::{word_to_addr, CtrlInst, Inst, MemInst};
use crate::stats::SimStats;

/// Result of the control unit's execute stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlExec {
    /// An instruction finished this cycle.
    pub executed: bool,
    /// A control transfer fired (taken branch, the misprediction path).
    pub pc_changed: bool,
    /// A HALT was executed.
    pub halted: bool,
}

impl CtrlExec {
    const IDLE: Self = Self {
        executed: false,
        pc_changed: false,
        halted: false,
    };
}

/// The control unit.
#[derive(Debug)]
pub struct ControlUnit {
    pc: usize,
    ir: Option<Cell>,
    current: Option<CtrlInst>,
    waiting_for_results: bool,
    halted: bool,
}

impl Default for ControlUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlUnit {
    /// Creates a control unit with PC at zero and empty latches.
    pub fn new() -> Self {
        Self {
            pc: 0,
            ir: None,
            current: None,
            waiting_for_results: false,
            halted: false,
        }
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// True once a HALT has executed.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// True when the control latch is free.
    pub fn is_available(&self) -> bool {
        self.current.is_none()
    }

    /// True when the instruction register is empty.
    pub fn ir_available(&self) -> bool {
        self.ir.is_none()
    }

    /// Discards the speculatively fetched instruction (taken branch, HALT).
    pub fn squash_ir(&mut self) {
        if let Some(cell) = &self.ir {
            tracing::debug!("squashing IR: {cell:?}");
        }
        self.ir = None;
        self.waiting_for_results = false;
    }

    /// Latches a control instruction for execution.
    pub fn give_instruction(&mut self, inst: CtrlInst) {
        debug_assert!(self.current.is_none(), "control latch occupied");
        self.current = Some(inst);
    }

    /// Fetch stage: read `memory[PC]` into the IR.
    ///
    /// Stalls (PC held) while the IR is occupied: decode back-pressure.
    /// An empty cell latches as "no instruction" but still advances the PC,
    /// so the machine walks straight past gaps in the image.
    pub fn instruction_fetch(&mut self, mem: &MemoryUnit) {
        if self.halted {
            tracing::debug!("fetch: halted");
            return;
        }
        if self.ir.is_some() {
            tracing::debug!("fetch: IR occupied, stalling at pc={}", self.pc);
            return;
        }
        tracing::debug!("fetch: pc={}", self.pc);
        let cell = mem.get(self.pc);
        self.ir = match cell {
            Cell::Empty => None,
            other => Some(other),
        };
        self.pc += 1;
    }

    /// Decode phase 1: renaming, hazard detection, early jump resolution.
    ///
    /// Returns `(is_new_branch, jmp_resolved)`. `is_new_branch` is true the
    /// first time a control-transfer instruction passes through (operands
    /// still architectural). `jmp_resolved` is true when an unconditional
    /// jump moved the PC this cycle; the driver must skip fetch so the new
    /// PC is observed only next cycle.
    pub fn check_hazards(
        &mut self,
        cfg: &Config,
        regs: &RegisterFile,
        alu: &AluUnit,
        mem: &MemoryUnit,
        wb: &WriteBack,
    ) -> Result<(bool, bool), SimError> {
        let Some(cell) = self.ir.take() else {
            return Ok((false, false));
        };
        let mut inst = match cell {
            Cell::Inst(inst) => inst,
            other => {
                // data in the IR is diagnosed at decode
                self.ir = Some(other);
                return Ok((false, false));
            }
        };

        let mut is_new_branch = inst.is_branch();
        let src_renamed = inst.sources().first().copied().is_some_and(Reg::is_phys);
        let dst_renamed = inst.dest().is_some_and(Reg::is_phys);
        if src_renamed || dst_renamed {
            // re-entry after a stall: already renamed, already counted
            is_new_branch = false;
        } else {
            inst.rewrite_sources(&regs.rat());
        }

        self.waiting_for_results = false;
        let mut wait_set = inst.sources();
        if !cfg.pipeline.rename_registers {
            if let Some(dest) = inst.dest() {
                wait_set.push(dest);
            }
        }
        for src in wait_set {
            let slot = src.slot();
            let alu_writing = alu
                .current()
                .is_some_and(|i| i.dest().slot() == slot);
            let cu_writing = self
                .current
                .as_ref()
                .and_then(CtrlInst::dest)
                .is_some_and(|d| d.slot() == slot);
            let mem_writing = mem
                .current()
                .and_then(MemInst::dest)
                .is_some_and(|d| d.slot() == slot);

            if alu_writing || cu_writing || mem_writing {
                tracing::debug!("hazard: {src} still executing");
                self.waiting_for_results = true;
            } else if mem.will_change_reg(src) {
                tracing::debug!("hazard: {src} pending in memory action queue");
                self.waiting_for_results = true;
            } else if wb.forward_result(src).or_else(|| mem.forward_result(src)).is_some()
                && !cfg.pipeline.forward_results
            {
                tracing::debug!("hazard: {src} queued but not written back");
                self.waiting_for_results = true;
            }
        }

        // Unconditional jumps resolve here; the value read may predate a
        // pending write.
        let target = match &inst {
            Inst::Ctrl(ctrl) if ctrl.is_jump() => ctrl.evaluate(regs).new_pc,
            _ => None,
        };
        self.ir = Some(Cell::Inst(inst));

        if let Some(target) = target {
            let addr = word_to_addr(target)?;
            let jmp_resolved = addr != self.pc;
            tracing::debug!("jump resolved at decode: pc <- {addr}");
            self.pc = addr;
            return Ok((is_new_branch, jmp_resolved));
        }
        Ok((is_new_branch, false))
    }

    /// Decode phase 2: destination renaming and dispatch.
    ///
    /// Dispatches only when every functional-unit latch is free and no
    /// hazard is outstanding; otherwise the IR is held and fetch stays
    /// stalled. An exhausted free list is a structural stall, not a fault.
    pub fn decode(
        &mut self,
        cfg: &Config,
        regs: &mut RegisterFile,
        alu: &mut AluUnit,
        mem: &mut MemoryUnit,
        stats: &mut SimStats,
    ) -> Result<(), SimError> {
        let Some(cell) = self.ir.take() else {
            return Ok(());
        };
        let mut inst = match cell {
            Cell::Inst(inst) => inst,
            Cell::Data(word) => return Err(SimError::NotAnInstruction { word }),
            Cell::Empty => return Ok(()),
        };
        tracing::debug!("decoding: {inst}");

        if cfg.pipeline.rename_registers {
            if let Some(Reg::Arch(arch)) = inst.dest() {
                match regs.alias(arch) {
                    Ok(fresh) => inst.rewrite_dest(fresh),
                    Err(RenameStall(_)) => {
                        tracing::warn!("rename stall: free list empty, holding {inst}");
                        stats.stalls_structural += 1;
                        self.ir = Some(Cell::Inst(inst));
                        return Ok(());
                    }
                }
            }
        }

        let occupied = [self.is_available(), mem.is_available(), alu.is_available()]
            .iter()
            .filter(|available| !**available)
            .count();

        if occupied == 0 && !self.waiting_for_results {
            debug_assert!(
                inst.sources().iter().all(|r| r.is_phys()),
                "dispatching with un-renamed sources: {inst}"
            );
            match inst {
                Inst::Alu(i) => alu.give_instruction(i),
                Inst::Mem(i) => mem.give_instruction(i),
                Inst::Ctrl(i) => self.give_instruction(i),
            }
        } else {
            if self.waiting_for_results {
                tracing::debug!("waiting for results, can't decode");
                stats.stalls_data += 1;
            } else {
                tracing::debug!("unit occupied, blocking");
                stats.stalls_structural += 1;
            }
            self.ir = Some(Cell::Inst(inst));
        }
        Ok(())
    }

    /// Execute stage for control instructions.
    ///
    /// Jumps resolved at decode are consumed without effect. Everything
    /// else waits for the memory unit to go quiet (in-order commit
    /// discipline) before evaluating.
    pub fn execute(
        &mut self,
        regs: &RegisterFile,
        mem: &MemoryUnit,
    ) -> Result<CtrlExec, SimError> {
        let Some(inst) = &self.current else {
            return Ok(CtrlExec::IDLE);
        };
        tracing::debug!("CU execute: {inst}");

        if inst.is_jump() {
            tracing::debug!("jump already evaluated at decode, doing nothing");
            self.current = None;
            return Ok(CtrlExec {
                executed: true,
                pc_changed: false,
                halted: false,
            });
        }

        if mem.is_mem_busy() {
            return Ok(CtrlExec::IDLE);
        }

        let outcome = inst.evaluate(regs);
        self.current = None;

        if let Some(target) = outcome.new_pc {
            let addr = word_to_addr(target)?;
            if addr != self.pc {
                tracing::debug!("PC value changed: {} -> {addr}", self.pc);
                self.pc = addr;
            }
        }
        if outcome.halt {
            self.halted = true;
        }
        Ok(CtrlExec {
            executed: true,
            pc_changed: outcome.new_pc.is_some(),
            halted: outcome.halt,
        })
    }
}
