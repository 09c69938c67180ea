//! Error types for assembly and simulation.
//!
//! Two families: `AsmError` covers everything the assembler can reject,
//! each variant qualified with its 1-based source line; `SimError` covers
//! runtime faults that propagate out of the main loop and abort the run
//! with a diagnostic. `RenameStall` is not a failure of the run; decode
//! treats it as a structural hazard and holds the instruction register.

use thiserror::Error;

use crate::common::reg::ArchReg;
use crate::common::word::Word;

/// An error raised while assembling source text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AsmError {
    /// More than one `name:` label on a single line.
    #[error("line {line}: only one label may be defined per line")]
    MultipleLabels {
        /// 1-based source line.
        line: usize,
    },

    /// The same label defined twice.
    #[error("line {line}: label `{name}` is already defined")]
    DuplicateLabel {
        /// 1-based source line.
        line: usize,
        /// The offending label name.
        name: String,
    },

    /// An instruction given the wrong number of operands.
    #[error("line {line}: {mnemonic} expects {expected} operands, found {found}")]
    OperandCount {
        /// 1-based source line.
        line: usize,
        /// The instruction mnemonic.
        mnemonic: String,
        /// Operands the mnemonic requires.
        expected: usize,
        /// Operands actually present.
        found: usize,
    },

    /// An immediate operand that is neither a hex value nor a known label.
    #[error("line {line}: cannot interpret immediate value `{token}`")]
    BadImmediate {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A register operand outside `R0..R13`.
    #[error("line {line}: unrecognised register `{token}`")]
    UnknownRegister {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A line that is neither an instruction nor a data word.
    #[error("line {line}: unrecognised instruction `{token}`")]
    UnknownMnemonic {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// A runtime fault inside the simulated machine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Decode found a data word where an instruction was expected.
    #[error("encountered data word {word:#x} where an instruction was expected")]
    NotAnInstruction {
        /// The data word sitting in the instruction register.
        word: Word,
    },

    /// A load touched a cell holding program text.
    #[error("load from address {addr:#x} hit an instruction cell")]
    LoadFromInstruction {
        /// The faulting address.
        addr: usize,
    },

    /// An address computation left the 32 000-cell space.
    #[error("address {addr} is outside the memory space")]
    AddressOutOfRange {
        /// The faulting word value.
        addr: Word,
    },

    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A shift by a negative amount.
    #[error("shift by negative amount {amount}")]
    NegativeShift {
        /// The offending shift amount.
        amount: Word,
    },

    /// The configured cycle limit elapsed without reaching HALT.
    #[error("cycle limit of {limit} exceeded without reaching HALT")]
    CycleLimitExceeded {
        /// The configured limit.
        limit: u64,
    },
}

/// Free-list exhaustion during destination renaming.
///
/// Decode converts this into a structural stall rather than aborting.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no free physical register to rename {0}")]
pub struct RenameStall(pub ArchReg);
