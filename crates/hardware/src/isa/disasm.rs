//! Disassembly: `Display` implementations used by trace output.
//!
//! Immediates print in decimal with a `#` prefix; register operands print
//! as their current (architectural or physical) name, so a traced
//! instruction shows whether it has been renamed yet.

use std::fmt;

use crate::isa::{AluInst, CtrlInst, Inst, MemInst};

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu(i) => i.fmt(f),
            Self::Mem(i) => i.fmt(f),
            Self::Ctrl(i) => i.fmt(f),
        }
    }
}

impl fmt::Display for AluInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(d, a, b) => write!(f, "AND {d} {a} {b}"),
            Self::Or(d, a, b) => write!(f, "OR {d} {a} {b}"),
            Self::Xor(d, a, b) => write!(f, "XOR {d} {a} {b}"),
            Self::Not(d, a) => write!(f, "NOT {d} {a}"),
            Self::LogicalNot(d, a) => write!(f, "LNOT {d} {a}"),
            Self::Add(d, a, b) => write!(f, "ADD {d} {a} {b}"),
            Self::AddImm(d, a, imm) => write!(f, "ADDI {d} {a} #{imm}"),
            Self::Sub(d, a, b) => write!(f, "SUB {d} {a} {b}"),
            Self::SubImm(d, a, imm) => write!(f, "SUBI {d} {a} #{imm}"),
            Self::Mul(d, a, b) => write!(f, "MUL {d} {a} {b}"),
            Self::MulImm(d, a, imm) => write!(f, "MULI {d} {a} #{imm}"),
            Self::Div(d, a, b) => write!(f, "DIV {d} {a} {b}"),
            Self::Lt(d, a, b) => write!(f, "LT {d} {a} {b}"),
            Self::Gt(d, a, b) => write!(f, "GT {d} {a} {b}"),
            Self::Eq(d, a, b) => write!(f, "EQ {d} {a} {b}"),
            Self::Lsh(d, a, b) => write!(f, "LSHIFT {d} {a} {b}"),
            Self::LshImm(d, a, imm) => write!(f, "LSHIFTI {d} {a} #{imm}"),
            Self::Rsh(d, a, b) => write!(f, "RSHIFT {d} {a} {b}"),
            Self::RshImm(d, a, imm) => write!(f, "RSHIFTI {d} {a} #{imm}"),
        }
    }
}

impl fmt::Display for MemInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadWord(d, base, offset) => write!(f, "LDW {d} {base} {offset}"),
            Self::LoadWordImm(d, base, imm) => write!(f, "LDWI {d} {base} #{imm}"),
            Self::LoadWordConst(d, addr) => write!(f, "LDWC {d} {addr}"),
            Self::LoadWordConstImm(d, imm) => write!(f, "LDWIC {d} #{imm}"),
            Self::StoreWord(addr, src) => write!(f, "STW {addr} {src}"),
            Self::StoreWordImm(src, imm) => write!(f, "STWI {src} #{imm}"),
        }
    }
}

impl fmt::Display for CtrlInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jump(loc) => write!(f, "JMP {loc}"),
            Self::JumpImm(addr) => write!(f, "JMPAI #{addr}"),
            Self::Branch(cond, loc) => write!(f, "BRAT {cond} {loc}"),
            Self::BranchImm(cond, addr) => write!(f, "BRATI {cond} #{addr}"),
            Self::Halt => write!(f, "HALT"),
            Self::Nop => write!(f, "NOP"),
        }
    }
}
