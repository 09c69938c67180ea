//! Pipeline timing properties: early jump resolution, fetch skipping,
//! structural stalls, and post-HALT drain.

use pretty_assertions::assert_eq;

use super::{r, run_program};

#[test]
fn test_immediate_jump_resolves_at_decode() {
    // the NOP at index 1 must never be fetched into execution
    let p = run_program(
        "JMPAI 2\n\
         NOP\n\
         HALT\n",
    );
    // JMPAI and HALT execute; the skipped NOP does not
    assert_eq!(p.stats().instructions_retired, 2);
    assert_eq!(p.stats().branches, 1);
    // early resolution is not a misprediction
    assert_eq!(p.stats().mispredictions, 0);
}

#[test]
fn test_register_jump_skips_wrong_path() {
    // NOPs space the jump far enough for its operand to retire first
    let p = run_program(
        "ADDI R1 R0 6\n\
         NOP\n\
         NOP\n\
         NOP\n\
         JMP R1\n\
         ADDI R2 R0 1\n\
         HALT\n",
    );
    assert_eq!(p.arch_value(r(2)), 0);
    assert_eq!(p.stats().branches, 1);
    assert_eq!(p.stats().mispredictions, 0);
}

#[test]
fn test_halt_drains_pending_work() {
    // the store is still in flight when HALT executes; the run must not
    // finish until it has committed
    let p = run_program(
        "ADDI R1 R0 5\n\
         STWI R1 40\n\
         HALT\n",
    );
    assert!(p.halted());
    assert_eq!(p.mem_word(0x40), Ok(5));
    // drain dominates: at least the 100-cycle memory latency elapsed
    assert!(p.stats().cycles > 100, "cycles = {}", p.stats().cycles);
}

#[test]
fn test_memory_latency_dominates_load_time() {
    let fast = run_program("ADDI R1 R0 1\nHALT\n");
    let slow = run_program("LDWIC R1 20\nHALT\n");
    assert!(slow.stats().cycles >= fast.stats().cycles + 90);
}

#[test]
fn test_structural_stall_on_busy_alu() {
    // the second multiply cannot decode while the first occupies the ALU
    let p = run_program(
        "MUL R1 R0 R0\n\
         MUL R2 R0 R0\n\
         HALT\n",
    );
    assert!(p.stats().stalls_structural >= 1);
    assert_eq!(p.arch_value(r(1)), 0);
    assert_eq!(p.arch_value(r(2)), 0);
}

#[test]
fn test_cpi_reported() {
    let p = run_program("ADDI R1 R0 1\nHALT\n");
    let stats = p.stats();
    assert!(stats.cycles > 0);
    assert!(stats.instructions_retired >= 2);
    assert!(stats.cpi() >= 1.0);
}
