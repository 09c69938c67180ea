//! Per-area test suites and the shared harness.

mod alu_ops;
mod config;
mod properties;
mod scenarios;
mod timing;

use pipesim_core::common::reg::ArchReg;
use pipesim_core::{Config, Processor};

/// Safety net so a broken pipeline fails the test instead of hanging it.
const TEST_CYCLE_LIMIT: u64 = 100_000;

/// Runs a program to completion under the default configuration.
pub fn run_program(src: &str) -> Processor {
    run_with(src, Config::default())
}

/// Runs a program to completion under a custom configuration.
pub fn run_with(src: &str, mut cfg: Config) -> Processor {
    cfg.general.max_cycles = Some(TEST_CYCLE_LIMIT);
    let mut processor = Processor::new(cfg);
    processor.load_program(src).expect("program assembles");
    processor.run().expect("program runs to HALT");
    processor
}

/// Architectural register shorthand.
pub fn r(n: u8) -> ArchReg {
    ArchReg::new(n).expect("architectural register in range")
}
