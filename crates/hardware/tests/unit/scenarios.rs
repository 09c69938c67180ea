//! End-to-end program scenarios: assemble, run to HALT, check the
//! architectural state and the counters.

use pretty_assertions::assert_eq;

use super::{r, run_program, run_with};
use pipesim_core::Config;

#[test]
fn test_add_chain_with_forwarding() {
    let p = run_program(
        "ADDI R1 R0 5\n\
         ADDI R2 R0 7\n\
         ADD R3 R1 R2\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(1)), 5);
    assert_eq!(p.arch_value(r(2)), 7);
    assert_eq!(p.arch_value(r(3)), 0xC);
    assert!(p.stats().instructions_retired >= 4);
}

#[test]
fn test_multiply_latency() {
    let p = run_program(
        "ADDI R1 R0 3\n\
         MUL R2 R1 R1\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(2)), 9);
    // fetch + decode + the 10-cycle multiply + drain
    assert!(p.stats().cycles >= 12, "cycles = {}", p.stats().cycles);
}

#[test]
fn test_taken_branch_squashes_wrong_path() {
    let p = run_program(
        "ADDI R1 R0 1\n\
         BRATI R1 5\n\
         ADDI R2 R0 FF\n\
         ADDI R3 R0 1\n\
         HALT\n\
         ADDI R4 R0 2\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(4)), 2);
    // the speculatively fetched ADDI R2 was squashed, never dispatched
    assert_eq!(p.arch_value(r(2)), 0);
    assert_eq!(p.arch_value(r(3)), 0);
    assert_eq!(p.stats().branches, 1);
    assert_eq!(p.stats().mispredictions, 1);
}

#[test]
fn test_untaken_branch_predicted_correctly() {
    let p = run_program(
        "ADDI R1 R0 0\n\
         BRATI R1 5\n\
         ADDI R2 R0 1\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(2)), 1);
    assert_eq!(p.stats().branches, 1);
    assert_eq!(p.stats().mispredictions, 0);
}

#[test]
fn test_store_load_use() {
    let p = run_program(
        "ADDI R1 R0 10\n\
         STWI R1 2A\n\
         LDWIC R2 2A\n\
         ADD R3 R2 R1\n\
         HALT\n",
    );
    assert_eq!(p.mem_word(0x2A), Ok(0x10));
    assert_eq!(p.arch_value(r(2)), 0x10);
    assert_eq!(p.arch_value(r(3)), 0x20);
    // the ADD had to wait for the load to retire
    assert!(p.stats().stalls_data >= 1);
}

#[test]
fn test_rename_gives_each_definition_its_own_register() {
    let p = run_program(
        "ADDI R1 R0 1\n\
         ADD R2 R1 R1\n\
         ADDI R1 R0 9\n\
         ADD R3 R1 R1\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(2)), 2);
    assert_eq!(p.arch_value(r(3)), 18);
    // R1 was renamed away from its identity slot
    assert_ne!(p.regs().rat()[1].index(), 1);
}

#[test]
fn test_label_loop_counts_down() {
    let p = run_program(
        "; count R1 down from 3, accumulating into R2\n\
         ADDI R1 R0 3\n\
         loop:\n\
         ADD R2 R2 R1\n\
         SUBI R1 R1 1\n\
         GT R3 R1 R0\n\
         BRATI R3 loop\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(1)), 0);
    assert_eq!(p.arch_value(r(2)), 6);
    assert_eq!(p.stats().branches, 3);
    // two taken back-edges, one fall-through
    assert_eq!(p.stats().mispredictions, 2);
}

#[test]
fn test_data_words_are_loadable() {
    // a data word sits at address 3; the program loads it
    let p = run_program(
        "LDWIC R1 3\n\
         ADDI R2 R1 1\n\
         HALT\n\
         2A\n",
    );
    assert_eq!(p.arch_value(r(1)), 0x2A);
    assert_eq!(p.arch_value(r(2)), 0x2B);
}

#[test]
fn test_register_addressed_load_and_store() {
    // STW stores through a register address; LDW adds base and offset regs
    let p = run_program(
        "ADDI R1 R0 64\n\
         ADDI R2 R0 7\n\
         STW R1 R2\n\
         ADDI R3 R0 60\n\
         ADDI R4 R0 4\n\
         LDW R5 R3 R4\n\
         HALT\n",
    );
    assert_eq!(p.mem_word(0x64), Ok(7));
    assert_eq!(p.arch_value(r(5)), 7);
}

#[test]
fn test_unpipelined_mode_matches_results_and_is_slower() {
    let src = "ADDI R1 R0 5\n\
               ADDI R2 R0 7\n\
               ADD R3 R1 R2\n\
               HALT\n";
    let pipelined = run_program(src);

    let mut cfg = Config::default();
    cfg.pipeline.pipelined = false;
    let serial = run_with(src, cfg);

    assert_eq!(serial.arch_value(r(3)), pipelined.arch_value(r(3)));
    assert!(serial.stats().cycles > pipelined.stats().cycles);
}

#[test]
fn test_no_forwarding_stalls_until_writeback() {
    let src = "ADDI R1 R0 5\n\
               ADDI R2 R0 7\n\
               ADD R3 R1 R2\n\
               HALT\n";
    let forwarding = run_program(src);

    let mut cfg = Config::default();
    cfg.pipeline.forward_results = false;
    let strict = run_with(src, cfg);

    assert_eq!(strict.arch_value(r(3)), 0xC);
    assert!(strict.stats().cycles > forwarding.stats().cycles);
    assert!(strict.stats().stalls_data > forwarding.stats().stalls_data);
}

#[test]
fn test_no_rename_mode_still_correct() {
    let mut cfg = Config::default();
    cfg.pipeline.rename_registers = false;
    let p = run_with(
        "ADDI R1 R0 1\n\
         ADD R2 R1 R1\n\
         ADDI R1 R0 9\n\
         ADD R3 R1 R1\n\
         HALT\n",
        cfg,
    );
    assert_eq!(p.arch_value(r(2)), 2);
    assert_eq!(p.arch_value(r(3)), 18);
    // without renaming the alias table never moves
    for (i, phys) in p.regs().rat().iter().enumerate() {
        assert_eq!(phys.index(), i);
    }
}
