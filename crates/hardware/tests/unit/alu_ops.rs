//! ALU operation semantics, one case per operation.
//!
//! Operand values: P1 = 12, P2 = -5, P3 = 2.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pipesim_core::common::reg::{PhysReg, Reg};
use pipesim_core::common::word::Word;
use pipesim_core::core::RegisterFile;
use pipesim_core::isa::AluInst;

fn p(n: u8) -> Reg {
    Reg::Phys(PhysReg::new(n).expect("phys reg"))
}

fn regs() -> RegisterFile {
    let mut regs = RegisterFile::new();
    regs.write(p(1), 12);
    regs.write(p(2), -5);
    regs.write(p(3), 2);
    regs
}

#[rstest]
#[case::and(AluInst::And(p(20), p(1), p(3)), 12 & 2)]
#[case::or(AluInst::Or(p(20), p(1), p(3)), 12 | 2)]
#[case::xor(AluInst::Xor(p(20), p(1), p(3)), 12 ^ 2)]
#[case::not(AluInst::Not(p(20), p(1)), !12)]
#[case::lnot_nonzero(AluInst::LogicalNot(p(20), p(1)), 0)]
#[case::lnot_zero(AluInst::LogicalNot(p(20), p(10)), 1)]
#[case::add(AluInst::Add(p(20), p(1), p(2)), 7)]
#[case::add_imm(AluInst::AddImm(p(20), p(1), 30), 42)]
#[case::sub(AluInst::Sub(p(20), p(1), p(2)), 17)]
#[case::sub_imm(AluInst::SubImm(p(20), p(1), 2), 10)]
#[case::mul(AluInst::Mul(p(20), p(1), p(2)), -60)]
#[case::mul_imm(AluInst::MulImm(p(20), p(1), -3), -36)]
#[case::div_floor_positive(AluInst::Div(p(20), p(1), p(3)), 6)]
#[case::div_floor_negative(AluInst::Div(p(20), p(2), p(3)), -3)]
#[case::lt_false(AluInst::Lt(p(20), p(1), p(2)), 0)]
#[case::lt_true(AluInst::Lt(p(20), p(2), p(1)), 1)]
#[case::gt_true(AluInst::Gt(p(20), p(1), p(2)), 1)]
#[case::eq_false(AluInst::Eq(p(20), p(1), p(2)), 0)]
#[case::eq_true(AluInst::Eq(p(20), p(1), p(1)), 1)]
#[case::lsh(AluInst::Lsh(p(20), p(1), p(3)), 48)]
#[case::lsh_imm(AluInst::LshImm(p(20), p(1), 4), 192)]
#[case::rsh(AluInst::Rsh(p(20), p(1), p(3)), 3)]
#[case::rsh_imm_arithmetic(AluInst::RshImm(p(20), p(2), 1), -3)]
fn test_alu_semantics(#[case] inst: AluInst, #[case] expected: Word) {
    let action = inst.execute(&regs()).expect("pure op");
    assert_eq!(action.reg, p(20));
    assert_eq!(action.data, expected);
}

#[rstest]
#[case::mul_exceeds_64_bits(
    AluInst::Mul(p(20), p(4), p(4)),
    (1_i128 << 80) // (2^40)^2
)]
fn test_wide_multiply(#[case] inst: AluInst, #[case] expected: Word) {
    let mut regs = regs();
    regs.write(p(4), 1_i128 << 40);
    let action = inst.execute(&regs).expect("pure op");
    assert_eq!(action.data, expected);
}
