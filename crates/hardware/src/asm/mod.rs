//! Two-pass assembler: textual assembly to a memory image.
//!
//! The source is line-oriented. `;` starts a comment, blank lines are
//! dropped, and mnemonics are case-insensitive. A `NAME:` label (optionally
//! followed by an instruction on the same line) resolves to the line index
//! of the next instruction after blank/comment/label-only-line removal;
//! label names are case-sensitive and may stand wherever an immediate is
//! expected. Immediates are hexadecimal with an optional sign and optional
//! `0x` prefix. A line whose single token parses as hex is stored verbatim
//! as a data word at that address.
//!
//! The image is a dense vector of cells; the loader writes it starting at
//! address 0.

use std::collections::HashMap;

use crate::common::error::AsmError;
use crate::common::reg::{ArchReg, Reg};
use crate::common::word::Word;
use crate::core::units::memory::Cell;
use crate::isa::{AluInst, CtrlInst, Inst, MemInst};

/// Assembles source text into a memory image.
pub fn assemble(src: &str) -> Result<Vec<Cell>, AsmError> {
    // Pass 0: strip comments and blank lines, keeping source line numbers.
    let cleaned: Vec<(usize, &str)> = src
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.split(';').next().unwrap_or("").trim();
            (!text.is_empty()).then_some((i + 1, text))
        })
        .collect();

    // Pass 1: extract labels; a label's value is the index of the next
    // surviving instruction line.
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut program: Vec<(usize, String)> = Vec::new();
    for (line, text) in cleaned {
        match text.matches(':').count() {
            0 => program.push((line, text.to_string())),
            1 => {
                let (name, rest) = text
                    .split_once(':')
                    .unwrap_or_else(|| unreachable!("colon counted"));
                let name = name.trim();
                if labels.contains_key(name) {
                    return Err(AsmError::DuplicateLabel {
                        line,
                        name: name.to_string(),
                    });
                }
                let _ = labels.insert(name.to_string(), program.len());
                let rest = rest.trim();
                if !rest.is_empty() {
                    program.push((line, rest.to_string()));
                }
            }
            _ => return Err(AsmError::MultipleLabels { line }),
        }
    }

    // Pass 2: parse each surviving line into a cell.
    program
        .iter()
        .map(|(line, text)| parse_line(*line, text, &labels))
        .collect()
}

fn parse_line(
    line: usize,
    text: &str,
    labels: &HashMap<String, usize>,
) -> Result<Cell, AsmError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Err(AsmError::UnknownMnemonic {
            line,
            token: String::new(),
        });
    };
    let mnemonic = first.to_ascii_uppercase();

    let operands = &tokens[1..];
    let arity = |expected: usize| -> Result<(), AsmError> {
        if operands.len() == expected {
            Ok(())
        } else {
            Err(AsmError::OperandCount {
                line,
                mnemonic: mnemonic.clone(),
                expected,
                found: operands.len(),
            })
        }
    };
    let reg = |i: usize| parse_reg(operands[i], line);
    let imm = |i: usize| parse_imm(operands[i], labels, line);

    let inst = match mnemonic.as_str() {
        "AND" => {
            arity(3)?;
            Inst::Alu(AluInst::And(reg(0)?, reg(1)?, reg(2)?))
        }
        "OR" => {
            arity(3)?;
            Inst::Alu(AluInst::Or(reg(0)?, reg(1)?, reg(2)?))
        }
        "XOR" => {
            arity(3)?;
            Inst::Alu(AluInst::Xor(reg(0)?, reg(1)?, reg(2)?))
        }
        "NOT" => {
            arity(2)?;
            Inst::Alu(AluInst::Not(reg(0)?, reg(1)?))
        }
        "LNOT" => {
            arity(2)?;
            Inst::Alu(AluInst::LogicalNot(reg(0)?, reg(1)?))
        }
        "ADD" => {
            arity(3)?;
            Inst::Alu(AluInst::Add(reg(0)?, reg(1)?, reg(2)?))
        }
        "ADDI" => {
            arity(3)?;
            Inst::Alu(AluInst::AddImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "SUB" => {
            arity(3)?;
            Inst::Alu(AluInst::Sub(reg(0)?, reg(1)?, reg(2)?))
        }
        "SUBI" => {
            arity(3)?;
            Inst::Alu(AluInst::SubImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "MUL" => {
            arity(3)?;
            Inst::Alu(AluInst::Mul(reg(0)?, reg(1)?, reg(2)?))
        }
        "MULI" => {
            arity(3)?;
            Inst::Alu(AluInst::MulImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "DIV" => {
            arity(3)?;
            Inst::Alu(AluInst::Div(reg(0)?, reg(1)?, reg(2)?))
        }
        "LT" => {
            arity(3)?;
            Inst::Alu(AluInst::Lt(reg(0)?, reg(1)?, reg(2)?))
        }
        "GT" => {
            arity(3)?;
            Inst::Alu(AluInst::Gt(reg(0)?, reg(1)?, reg(2)?))
        }
        "EQ" => {
            arity(3)?;
            Inst::Alu(AluInst::Eq(reg(0)?, reg(1)?, reg(2)?))
        }
        "LSHIFT" => {
            arity(3)?;
            Inst::Alu(AluInst::Lsh(reg(0)?, reg(1)?, reg(2)?))
        }
        "LSHIFTI" => {
            arity(3)?;
            Inst::Alu(AluInst::LshImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "RSHIFT" => {
            arity(3)?;
            Inst::Alu(AluInst::Rsh(reg(0)?, reg(1)?, reg(2)?))
        }
        "RSHIFTI" => {
            arity(3)?;
            Inst::Alu(AluInst::RshImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "JMP" => {
            arity(1)?;
            Inst::Ctrl(CtrlInst::Jump(reg(0)?))
        }
        "JMPAI" => {
            arity(1)?;
            Inst::Ctrl(CtrlInst::JumpImm(imm(0)?))
        }
        "BRAT" => {
            arity(2)?;
            Inst::Ctrl(CtrlInst::Branch(reg(0)?, reg(1)?))
        }
        "BRATI" => {
            arity(2)?;
            Inst::Ctrl(CtrlInst::BranchImm(reg(0)?, imm(1)?))
        }
        "LDW" => {
            arity(3)?;
            Inst::Mem(MemInst::LoadWord(reg(0)?, reg(1)?, reg(2)?))
        }
        "LDWI" => {
            arity(3)?;
            Inst::Mem(MemInst::LoadWordImm(reg(0)?, reg(1)?, imm(2)?))
        }
        "LDWC" => {
            arity(2)?;
            Inst::Mem(MemInst::LoadWordConst(reg(0)?, reg(1)?))
        }
        "LDWIC" => {
            arity(2)?;
            Inst::Mem(MemInst::LoadWordConstImm(reg(0)?, imm(1)?))
        }
        "STW" => {
            arity(2)?;
            Inst::Mem(MemInst::StoreWord(reg(0)?, reg(1)?))
        }
        "STWI" => {
            arity(2)?;
            Inst::Mem(MemInst::StoreWordImm(reg(0)?, imm(1)?))
        }
        "HALT" => {
            arity(0)?;
            Inst::Ctrl(CtrlInst::Halt)
        }
        "NOP" => {
            arity(0)?;
            Inst::Ctrl(CtrlInst::Nop)
        }
        _ => {
            // not a mnemonic: a lone hex token is a data word
            if tokens.len() == 1 {
                if let Ok(word) = parse_imm(first, labels, line) {
                    return Ok(Cell::Data(word));
                }
            }
            return Err(AsmError::UnknownMnemonic {
                line,
                token: (*first).to_string(),
            });
        }
    };
    Ok(Cell::Inst(inst))
}

fn parse_reg(token: &str, line: usize) -> Result<Reg, AsmError> {
    ArchReg::from_name(&token.to_ascii_uppercase())
        .map(Reg::Arch)
        .ok_or_else(|| AsmError::UnknownRegister {
            line,
            token: token.to_string(),
        })
}

fn parse_imm(
    token: &str,
    labels: &HashMap<String, usize>,
    line: usize,
) -> Result<Word, AsmError> {
    if let Some(&idx) = labels.get(token) {
        return Ok(idx as Word);
    }
    parse_hex(token).ok_or_else(|| AsmError::BadImmediate {
        line,
        token: token.to_string(),
    })
}

/// Parses a hex immediate with Python `int(x, 16)` semantics: optional
/// sign, optional `0x` prefix, case-insensitive digits.
fn parse_hex(token: &str) -> Option<Word> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);
    if digits.is_empty() {
        return None;
    }
    Word::from_str_radix(digits, 16)
        .ok()
        .map(|value| if negative { -value } else { value })
}
