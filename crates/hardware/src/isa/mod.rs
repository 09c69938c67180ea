//! Instruction set definition.
//!
//! Instructions are tagged variants grouped by the functional unit that
//! executes them:
//! 1. **ALU:** logic, arithmetic, comparison, and shift operations.
//! 2. **Memory:** word loads and stores in their register/immediate forms.
//! 3. **Control:** jumps, conditional branches, HALT, and NOP.
//!
//! `Inst` is the closed sum of the three groups and carries the shared
//! capability set: destination, sources, latency, and the renaming
//! mutators. Dispatch in decode is a total match over the group, so an
//! instruction without a unit cannot be represented.

/// ALU instructions.
pub mod alu;
/// Control-flow instructions.
pub mod ctrl;
/// Disassembly (`Display`) for trace output.
pub mod disasm;
/// Memory instructions.
pub mod mem;

pub use alu::AluInst;
pub use ctrl::{CtrlInst, CtrlOutcome};
pub use mem::MemInst;

use crate::common::constants::MEMORY_SIZE;
use crate::common::error::SimError;
use crate::common::reg::{PhysReg, Reg};
use crate::common::word::Word;
use crate::common::ARCH_REG_COUNT;

/// Any instruction, tagged by its functional unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// Executes in the ALU.
    Alu(AluInst),
    /// Executes in the memory unit.
    Mem(MemInst),
    /// Executes in the control unit.
    Ctrl(CtrlInst),
}

impl Inst {
    /// The destination register, if the instruction writes one.
    pub fn dest(&self) -> Option<Reg> {
        match self {
            Self::Alu(i) => Some(i.dest()),
            Self::Mem(i) => i.dest(),
            Self::Ctrl(i) => i.dest(),
        }
    }

    /// The register sources, in operand order.
    pub fn sources(&self) -> Vec<Reg> {
        match self {
            Self::Alu(i) => i.sources(),
            Self::Mem(i) => i.sources(),
            Self::Ctrl(i) => i.sources(),
        }
    }

    /// Execution latency in cycles.
    pub fn latency(&self) -> u64 {
        match self {
            Self::Alu(i) => i.latency(),
            Self::Mem(i) => i.latency(),
            Self::Ctrl(i) => i.latency(),
        }
    }

    /// Rewrites architectural sources through the alias table.
    pub fn rewrite_sources(&mut self, rat: &[PhysReg; ARCH_REG_COUNT]) {
        match self {
            Self::Alu(i) => i.rewrite_sources(rat),
            Self::Mem(i) => i.rewrite_sources(rat),
            Self::Ctrl(i) => i.rewrite_sources(rat),
        }
    }

    /// Replaces the destination with a freshly allocated physical register.
    pub fn rewrite_dest(&mut self, fresh: PhysReg) {
        match self {
            Self::Alu(i) => i.rewrite_dest(fresh),
            Self::Mem(i) => i.rewrite_dest(fresh),
            Self::Ctrl(_) => {}
        }
    }

    /// True for every control-transfer instruction (jumps and branches),
    /// the population the prediction-accuracy figure is measured over.
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            Self::Ctrl(
                CtrlInst::Jump(_)
                    | CtrlInst::JumpImm(_)
                    | CtrlInst::Branch(..)
                    | CtrlInst::BranchImm(..)
            )
        )
    }

    /// True for the unconditional jumps resolved early at decode.
    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Ctrl(c) if c.is_jump())
    }
}

/// Converts a word-valued target into a memory address.
pub(crate) fn word_to_addr(value: Word) -> Result<usize, SimError> {
    usize::try_from(value)
        .ok()
        .filter(|addr| *addr < MEMORY_SIZE)
        .ok_or(SimError::AddressOutOfRange { addr: value })
}
