//! ALU instruction variants and their evaluation.
//!
//! Every variant carries its destination first, then its register sources,
//! then any immediate. Evaluation is a pure function of the operand values
//! in the register file; the result is packaged as the writeback action the
//! ALU unit will forward through the memory stage.

use crate::common::constants::{ALU_LATENCY_CYCLES, MUL_DIV_LATENCY_CYCLES};
use crate::common::error::SimError;
use crate::common::reg::{PhysReg, Reg};
use crate::common::word::{Word, floor_div, shift_left, shift_right};
use crate::common::ARCH_REG_COUNT;
use crate::core::regfile::RegisterFile;
use crate::core::units::writeback::WriteBackAction;

/// An arithmetic/logic instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AluInst {
    /// `AND dst a b`: bitwise and.
    And(Reg, Reg, Reg),
    /// `OR dst a b`: bitwise or.
    Or(Reg, Reg, Reg),
    /// `XOR dst a b`: bitwise exclusive or.
    Xor(Reg, Reg, Reg),
    /// `NOT dst a`: bitwise complement.
    Not(Reg, Reg),
    /// `LNOT dst a`: 1 if the operand is zero, else 0.
    LogicalNot(Reg, Reg),
    /// `ADD dst a b`.
    Add(Reg, Reg, Reg),
    /// `ADDI dst a #imm`.
    AddImm(Reg, Reg, Word),
    /// `SUB dst a b`.
    Sub(Reg, Reg, Reg),
    /// `SUBI dst a #imm`.
    SubImm(Reg, Reg, Word),
    /// `MUL dst a b` (10-cycle).
    Mul(Reg, Reg, Reg),
    /// `MULI dst a #imm` (10-cycle).
    MulImm(Reg, Reg, Word),
    /// `DIV dst a b`: floor division (10-cycle).
    Div(Reg, Reg, Reg),
    /// `LT dst a b`: 1 if `a < b`, else 0.
    Lt(Reg, Reg, Reg),
    /// `GT dst a b`: 1 if `a > b`, else 0.
    Gt(Reg, Reg, Reg),
    /// `EQ dst a b`: 1 if `a == b`, else 0.
    Eq(Reg, Reg, Reg),
    /// `LSHIFT dst a b`.
    Lsh(Reg, Reg, Reg),
    /// `LSHIFTI dst a #imm`.
    LshImm(Reg, Reg, Word),
    /// `RSHIFT dst a b`: arithmetic shift.
    Rsh(Reg, Reg, Reg),
    /// `RSHIFTI dst a #imm`: arithmetic shift.
    RshImm(Reg, Reg, Word),
}

impl AluInst {
    /// The destination register.
    pub fn dest(&self) -> Reg {
        match self {
            Self::And(d, _, _)
            | Self::Or(d, _, _)
            | Self::Xor(d, _, _)
            | Self::Add(d, _, _)
            | Self::Sub(d, _, _)
            | Self::Mul(d, _, _)
            | Self::Div(d, _, _)
            | Self::Lt(d, _, _)
            | Self::Gt(d, _, _)
            | Self::Eq(d, _, _)
            | Self::Lsh(d, _, _)
            | Self::Rsh(d, _, _)
            | Self::AddImm(d, _, _)
            | Self::SubImm(d, _, _)
            | Self::MulImm(d, _, _)
            | Self::LshImm(d, _, _)
            | Self::RshImm(d, _, _)
            | Self::Not(d, _)
            | Self::LogicalNot(d, _) => *d,
        }
    }

    /// The register sources, in operand order.
    pub fn sources(&self) -> Vec<Reg> {
        match self {
            Self::And(_, a, b)
            | Self::Or(_, a, b)
            | Self::Xor(_, a, b)
            | Self::Add(_, a, b)
            | Self::Sub(_, a, b)
            | Self::Mul(_, a, b)
            | Self::Div(_, a, b)
            | Self::Lt(_, a, b)
            | Self::Gt(_, a, b)
            | Self::Eq(_, a, b)
            | Self::Lsh(_, a, b)
            | Self::Rsh(_, a, b) => vec![*a, *b],
            Self::AddImm(_, a, _)
            | Self::SubImm(_, a, _)
            | Self::MulImm(_, a, _)
            | Self::LshImm(_, a, _)
            | Self::RshImm(_, a, _)
            | Self::Not(_, a)
            | Self::LogicalNot(_, a) => vec![*a],
        }
    }

    /// Cycles the instruction occupies the ALU.
    pub fn latency(&self) -> u64 {
        match self {
            Self::Mul(..) | Self::MulImm(..) | Self::Div(..) => MUL_DIV_LATENCY_CYCLES,
            _ => ALU_LATENCY_CYCLES,
        }
    }

    /// Rewrites architectural sources through the alias table.
    pub fn rewrite_sources(&mut self, rat: &[PhysReg; ARCH_REG_COUNT]) {
        for src in self.source_slots_mut() {
            if let Reg::Arch(a) = *src {
                *src = Reg::Phys(rat[a.index()]);
            }
        }
    }

    /// Replaces the destination with a freshly allocated physical register.
    pub fn rewrite_dest(&mut self, fresh: PhysReg) {
        match self {
            Self::And(d, _, _)
            | Self::Or(d, _, _)
            | Self::Xor(d, _, _)
            | Self::Add(d, _, _)
            | Self::Sub(d, _, _)
            | Self::Mul(d, _, _)
            | Self::Div(d, _, _)
            | Self::Lt(d, _, _)
            | Self::Gt(d, _, _)
            | Self::Eq(d, _, _)
            | Self::Lsh(d, _, _)
            | Self::Rsh(d, _, _)
            | Self::AddImm(d, _, _)
            | Self::SubImm(d, _, _)
            | Self::MulImm(d, _, _)
            | Self::LshImm(d, _, _)
            | Self::RshImm(d, _, _)
            | Self::Not(d, _)
            | Self::LogicalNot(d, _) => *d = Reg::Phys(fresh),
        }
    }

    /// Computes the result from operand values.
    pub fn execute(&self, regs: &RegisterFile) -> Result<WriteBackAction, SimError> {
        let data = match self {
            Self::And(_, a, b) => regs.read(*a) & regs.read(*b),
            Self::Or(_, a, b) => regs.read(*a) | regs.read(*b),
            Self::Xor(_, a, b) => regs.read(*a) ^ regs.read(*b),
            Self::Not(_, a) => !regs.read(*a),
            Self::LogicalNot(_, a) => Word::from(regs.read(*a) == 0),
            Self::Add(_, a, b) => regs.read(*a).wrapping_add(regs.read(*b)),
            Self::AddImm(_, a, imm) => regs.read(*a).wrapping_add(*imm),
            Self::Sub(_, a, b) => regs.read(*a).wrapping_sub(regs.read(*b)),
            Self::SubImm(_, a, imm) => regs.read(*a).wrapping_sub(*imm),
            Self::Mul(_, a, b) => regs.read(*a).wrapping_mul(regs.read(*b)),
            Self::MulImm(_, a, imm) => regs.read(*a).wrapping_mul(*imm),
            Self::Div(_, a, b) => {
                floor_div(regs.read(*a), regs.read(*b)).ok_or(SimError::DivisionByZero)?
            }
            Self::Lt(_, a, b) => Word::from(regs.read(*a) < regs.read(*b)),
            Self::Gt(_, a, b) => Word::from(regs.read(*a) > regs.read(*b)),
            Self::Eq(_, a, b) => Word::from(regs.read(*a) == regs.read(*b)),
            Self::Lsh(_, a, b) => Self::shl(regs.read(*a), regs.read(*b))?,
            Self::LshImm(_, a, imm) => Self::shl(regs.read(*a), *imm)?,
            Self::Rsh(_, a, b) => Self::shr(regs.read(*a), regs.read(*b))?,
            Self::RshImm(_, a, imm) => Self::shr(regs.read(*a), *imm)?,
        };
        Ok(WriteBackAction {
            reg: self.dest(),
            data,
        })
    }

    fn shl(value: Word, amount: Word) -> Result<Word, SimError> {
        shift_left(value, amount).ok_or(SimError::NegativeShift { amount })
    }

    fn shr(value: Word, amount: Word) -> Result<Word, SimError> {
        shift_right(value, amount).ok_or(SimError::NegativeShift { amount })
    }

    fn source_slots_mut(&mut self) -> Vec<&mut Reg> {
        match self {
            Self::And(_, a, b)
            | Self::Or(_, a, b)
            | Self::Xor(_, a, b)
            | Self::Add(_, a, b)
            | Self::Sub(_, a, b)
            | Self::Mul(_, a, b)
            | Self::Div(_, a, b)
            | Self::Lt(_, a, b)
            | Self::Gt(_, a, b)
            | Self::Eq(_, a, b)
            | Self::Lsh(_, a, b)
            | Self::Rsh(_, a, b) => vec![a, b],
            Self::AddImm(_, a, _)
            | Self::SubImm(_, a, _)
            | Self::MulImm(_, a, _)
            | Self::LshImm(_, a, _)
            | Self::RshImm(_, a, _)
            | Self::Not(_, a)
            | Self::LogicalNot(_, a) => vec![a],
        }
    }
}
