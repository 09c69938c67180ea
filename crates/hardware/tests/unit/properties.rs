//! Property tests: an assembled straight-line program leaves the same
//! architectural state as a direct interpretation of its semantics,
//! whatever the pipeline does about hazards and forwarding in between.

use proptest::prelude::*;

use super::{r, run_program, run_with};
use pipesim_core::Config;
use pipesim_core::common::word::Word;

/// Registers the generator writes and reads (R0 stays a conventional zero).
const REGS: u8 = 5;

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Xor,
    Lt,
    Gt,
    Eq,
    AddImm,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    op: Op,
    d: u8,
    a: u8,
    b: u8,
    imm: i64,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    (
        prop_oneof![
            Just(Op::Add),
            Just(Op::Sub),
            Just(Op::Mul),
            Just(Op::And),
            Just(Op::Or),
            Just(Op::Xor),
            Just(Op::Lt),
            Just(Op::Gt),
            Just(Op::Eq),
            Just(Op::AddImm),
        ],
        1..=REGS,
        0..=REGS,
        0..=REGS,
        0..=255_i64,
    )
        .prop_map(|(op, d, a, b, imm)| Step { op, d, a, b, imm })
}

fn to_asm(step: &Step) -> String {
    let Step { d, a, b, imm, .. } = *step;
    match step.op {
        Op::Add => format!("ADD R{d} R{a} R{b}"),
        Op::Sub => format!("SUB R{d} R{a} R{b}"),
        Op::Mul => format!("MUL R{d} R{a} R{b}"),
        Op::And => format!("AND R{d} R{a} R{b}"),
        Op::Or => format!("OR R{d} R{a} R{b}"),
        Op::Xor => format!("XOR R{d} R{a} R{b}"),
        Op::Lt => format!("LT R{d} R{a} R{b}"),
        Op::Gt => format!("GT R{d} R{a} R{b}"),
        Op::Eq => format!("EQ R{d} R{a} R{b}"),
        Op::AddImm => format!("ADDI R{d} R{a} {imm:x}"),
    }
}

fn interpret(steps: &[Step]) -> [Word; REGS as usize + 1] {
    let mut regs = [0 as Word; REGS as usize + 1];
    for step in steps {
        let Step { d, a, b, imm, .. } = *step;
        let (a, b) = (regs[a as usize], regs[b as usize]);
        regs[d as usize] = match step.op {
            Op::Add => a.wrapping_add(b),
            Op::Sub => a.wrapping_sub(b),
            Op::Mul => a.wrapping_mul(b),
            Op::And => a & b,
            Op::Or => a | b,
            Op::Xor => a ^ b,
            Op::Lt => Word::from(a < b),
            Op::Gt => Word::from(a > b),
            Op::Eq => Word::from(a == b),
            Op::AddImm => a.wrapping_add(Word::from(imm)),
        };
    }
    regs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_pipeline_matches_direct_interpretation(
        steps in proptest::collection::vec(step_strategy(), 1..12)
    ) {
        let mut src: String = steps.iter().map(|s| to_asm(s) + "\n").collect();
        src.push_str("HALT\n");

        let processor = run_program(&src);
        let expected = interpret(&steps);
        for (i, want) in expected.iter().enumerate() {
            prop_assert_eq!(processor.arch_value(r(i as u8)), *want, "R{}", i);
        }
    }

    #[test]
    fn test_feature_flags_do_not_change_results(
        steps in proptest::collection::vec(step_strategy(), 1..8)
    ) {
        let mut src: String = steps.iter().map(|s| to_asm(s) + "\n").collect();
        src.push_str("HALT\n");

        let baseline = run_program(&src);

        let mut no_forward = Config::default();
        no_forward.pipeline.forward_results = false;
        let strict = run_with(&src, no_forward);

        let mut no_rename = Config::default();
        no_rename.pipeline.rename_registers = false;
        let direct = run_with(&src, no_rename);

        for i in 0..=REGS {
            prop_assert_eq!(baseline.arch_value(r(i)), strict.arch_value(r(i)));
            prop_assert_eq!(baseline.arch_value(r(i)), direct.arch_value(r(i)));
        }
    }
}
