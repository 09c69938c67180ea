//! The processor driver: per-cycle orchestration of the pipeline.
//!
//! Stages are invoked in reverse pipeline order each cycle (write-back,
//! memory, execute, decode, fetch, with the hazard check leading), so every
//! stage reads the previous cycle's output before this cycle overwrites
//! it. That ordering is the software equivalent of edge-triggered pipeline
//! registers.
//!
//! Within execute, the unit order {Control, ALU, Memory} is fixed: the
//! ALU may deposit a result into the memory unit's forwarding slot, and
//! the MEM stage (already run this cycle) must only pick it up next cycle.

use crate::asm::assemble;
use crate::common::error::{AsmError, SimError};
use crate::common::reg::ArchReg;
use crate::common::word::Word;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::regfile::RegisterFile;
use crate::core::units::alu::AluUnit;
use crate::core::units::control::{ControlUnit, CtrlExec};
use crate::core::units::memory::{Cell, MemoryUnit};
use crate::core::units::writeback::WriteBack;
use crate::stats::SimStats;

/// The simulated processor: all units, the clock, and the counters.
#[derive(Debug)]
pub struct Processor {
    cfg: Config,
    clock: Clock,
    regs: RegisterFile,
    wb: WriteBack,
    mem: MemoryUnit,
    alu: AluUnit,
    cu: ControlUnit,
    stats: SimStats,
}

impl Processor {
    /// Creates a processor with empty memory.
    pub fn new(cfg: Config) -> Self {
        let clock = Clock::new(cfg.general.speed);
        let mem = MemoryUnit::new(cfg.memory.latency_cycles);
        Self {
            cfg,
            clock,
            regs: RegisterFile::new(),
            wb: WriteBack::new(),
            mem,
            alu: AluUnit::new(),
            cu: ControlUnit::new(),
            stats: SimStats::default(),
        }
    }

    /// Assembles `src` and loads the image at address 0.
    pub fn load_program(&mut self, src: &str) -> Result<(), AsmError> {
        let image = assemble(src)?;
        self.load_image(&image);
        Ok(())
    }

    /// Loads a pre-assembled image at address 0.
    pub fn load_image(&mut self, image: &[Cell]) {
        for (addr, cell) in image.iter().enumerate() {
            self.mem.set(addr, cell.clone());
        }
    }

    /// Runs until HALT has executed and the pipeline has drained.
    ///
    /// Aborts with `CycleLimitExceeded` if `general.max_cycles` elapses
    /// first. A program without a HALT otherwise runs forever.
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        loop {
            if let Some(limit) = self.cfg.general.max_cycles {
                if self.clock.time() >= limit {
                    return Err(SimError::CycleLimitExceeded { limit });
                }
            }
            self.cycle()?;
            if self.cu.halted() && self.drained() {
                break;
            }
        }
        Ok(&self.stats)
    }

    /// Advances the machine by one cycle.
    pub fn cycle(&mut self) -> Result<(), SimError> {
        // Decode phase 1: renaming, hazard scan, early jump resolution.
        let (is_new_branch, jmp_resolved) =
            self.cu
                .check_hazards(&self.cfg, &self.regs, &self.alu, &self.mem, &self.wb)?;
        if is_new_branch {
            self.stats.branches += 1;
        }

        // Write-back stage.
        self.wb.write(&mut self.regs);
        self.stage_tick();

        // Memory stage.
        self.mem.exec_memory_actions(&self.clock, &mut self.wb)?;
        self.stage_tick();

        // Execute stage: Control, then ALU, then Memory.
        let mut exec = CtrlExec {
            executed: false,
            pc_changed: false,
            halted: false,
        };
        if !self.cu.halted() {
            exec = self.cu.execute(&self.regs, &self.mem)?;
            let alu_done = self.alu.execute(&self.clock, &self.regs, &mut self.mem)?;
            let mem_done = self.mem.execute(&self.regs)?;
            self.stats.instructions_retired +=
                u64::from(exec.executed) + u64::from(alu_done) + u64::from(mem_done);
        }
        self.stage_tick();

        // A taken branch or HALT squashes the speculative fetch; the cycle
        // ends here, before fetch and before the tick.
        if exec.pc_changed || exec.halted {
            self.cu.squash_ir();
            self.cu
                .decode(&self.cfg, &mut self.regs, &mut self.alu, &mut self.mem, &mut self.stats)?;
            if exec.pc_changed {
                self.stats.mispredictions += 1;
            }
            self.stats.cycles = self.clock.time();
            return Ok(());
        }

        // Decode phase 2 and fetch. A jump resolved at hazard-check skips
        // fetch so the new PC is observed only next cycle.
        self.cu
            .decode(&self.cfg, &mut self.regs, &mut self.alu, &mut self.mem, &mut self.stats)?;
        self.stage_tick();
        if !jmp_resolved {
            self.cu.instruction_fetch(&self.mem);
        }
        self.stage_tick();

        self.clock.tick();
        self.stats.cycles = self.clock.time();
        self.regs.print(Some(self.clock.time()));
        Ok(())
    }

    /// In unpipelined mode the clock also ticks after every stage step.
    fn stage_tick(&mut self) {
        if !self.cfg.pipeline.pipelined {
            self.clock.tick();
        }
    }

    fn drained(&self) -> bool {
        self.wb.is_available() && self.mem.is_available() && !self.mem.is_mem_busy()
    }

    /// Accumulated statistics.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The architecturally visible value of a register.
    pub fn arch_value(&self, arch: ArchReg) -> Word {
        self.regs.arch_value(arch)
    }

    /// The register file (RAT snapshots, dumps).
    pub fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    /// Reads a data word from memory.
    pub fn mem_word(&self, addr: usize) -> Result<Word, SimError> {
        self.mem.load_word(addr)
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.cu.pc()
    }

    /// True once a HALT has executed.
    pub fn halted(&self) -> bool {
        self.cu.halted()
    }
}
