//! Memory unit: the flat cell array and the multi-cycle load/store engine.
//!
//! The unit owns three pieces of in-flight state besides the cells:
//! the EX-stage instruction latch, the FIFO of memory actions produced by
//! execute, and the one-deep forwarding slot the ALU uses to pass a result
//! through MEM to the write-back queue without touching memory.
//!
//! An action completes `latency` cycles after it entered the FIFO, and only
//! when the write-back queue is free; MEM-to-WB back-pressure is what
//! keeps commits in order.

use std::collections::VecDeque;

use crate::common::constants::MEMORY_SIZE;
use crate::common::error::SimError;
use crate::common::reg::Reg;
use crate::common::word::Word;
use crate::core::clock::Clock;
use crate::core::regfile::RegisterFile;
use crate::core::units::writeback::{WriteBack, WriteBackAction};
use crate::isa::{Inst, MemInst};

/// One cell of the shared instruction/data address space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Uninitialised memory. Reads as zero; fetches as no instruction.
    #[default]
    Empty,
    /// A data word.
    Data(Word),
    /// Program text, held symbolically.
    Inst(Inst),
}

/// A pending memory access. Exactly one of `data` (store) or `register`
/// (load) is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAction {
    /// Cell the access touches.
    pub address: usize,
    /// Data to store.
    pub data: Option<Word>,
    /// Register a load retires to.
    pub register: Option<Reg>,
}

impl MemoryAction {
    /// A load of `address` into `register`.
    pub fn load(address: usize, register: Reg) -> Self {
        Self {
            address,
            data: None,
            register: Some(register),
        }
    }

    /// A store of `data` to `address`.
    pub fn store(address: usize, data: Word) -> Self {
        Self {
            address,
            data: Some(data),
            register: None,
        }
    }
}

/// The memory stage.
#[derive(Debug)]
pub struct MemoryUnit {
    cells: Vec<Cell>,
    current: Option<MemInst>,
    actions: VecDeque<MemoryAction>,
    forward_wb: Option<WriteBackAction>,
    finish_at: Option<u64>,
    latency: u64,
}

impl MemoryUnit {
    /// Creates a zeroed memory with the given access latency.
    pub fn new(latency: u64) -> Self {
        Self {
            cells: vec![Cell::Empty; MEMORY_SIZE],
            current: None,
            actions: VecDeque::new(),
            forward_wb: None,
            finish_at: None,
            latency,
        }
    }

    /// Untimed read of a cell. Out-of-range addresses read as `Empty`.
    ///
    /// Returns a copy: the instruction register must own its instruction
    /// so renaming cannot corrupt the stored program on re-execution.
    pub fn get(&self, addr: usize) -> Cell {
        self.cells.get(addr).cloned().unwrap_or(Cell::Empty)
    }

    /// Untimed write of a cell (used by the loader and store commit).
    pub fn set(&mut self, addr: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(addr) {
            *slot = cell;
        }
    }

    /// Reads a data word for a committed load.
    pub fn load_word(&self, addr: usize) -> Result<Word, SimError> {
        match self.get(addr) {
            Cell::Data(w) => Ok(w),
            Cell::Empty => Ok(0),
            Cell::Inst(_) => Err(SimError::LoadFromInstruction { addr }),
        }
    }

    /// Latches an instruction for the EX stage.
    pub fn give_instruction(&mut self, inst: MemInst) {
        debug_assert!(self.current.is_none(), "memory latch occupied");
        self.current = Some(inst);
    }

    /// True when no instruction is latched.
    pub fn is_available(&self) -> bool {
        self.current.is_none()
    }

    /// The latched instruction, if any.
    pub fn current(&self) -> Option<&MemInst> {
        self.current.as_ref()
    }

    /// True while an access or a forwarded result is still in flight.
    pub fn is_mem_busy(&self) -> bool {
        !self.actions.is_empty() || self.forward_wb.is_some()
    }

    /// EX stage: run the latched instruction's address-compute step.
    ///
    /// Produces one `MemoryAction` and clears the latch; refuses to start
    /// while an earlier access is still draining. Returns whether it fired.
    pub fn execute(&mut self, regs: &RegisterFile) -> Result<bool, SimError> {
        let Some(inst) = &self.current else {
            return Ok(false);
        };
        if self.is_mem_busy() {
            tracing::trace!("memory execute: waiting for earlier access to drain");
            return Ok(false);
        }
        tracing::debug!("memory execute: {inst}");
        let action = inst.execute(regs)?;
        self.actions.push_back(action);
        self.current = None;
        Ok(true)
    }

    /// Deposits an ALU result into the EX→WB forwarding slot.
    pub fn pass_to_wb(&mut self, action: WriteBackAction) {
        debug_assert!(self.forward_wb.is_none(), "forwarding slot occupied");
        self.forward_wb = Some(action);
    }

    /// MEM stage: drain the forwarding slot or age the action queue.
    pub fn exec_memory_actions(
        &mut self,
        clock: &Clock,
        wb: &mut WriteBack,
    ) -> Result<(), SimError> {
        if let Some(action) = self.forward_wb.take() {
            wb.prepare_write(action);
            return Ok(());
        }
        if self.actions.is_empty() {
            return Ok(());
        }
        match self.finish_at {
            None => self.finish_at = Some(clock.time() + self.latency),
            Some(finish) => {
                if clock.time() + 1 >= finish && wb.is_available() {
                    if let Some(action) = self.actions.pop_front() {
                        if let Some(reg) = action.register {
                            let data = self.load_word(action.address)?;
                            tracing::debug!("memory load complete: {reg} <- {data}");
                            wb.prepare_write(WriteBackAction { reg, data });
                        } else if let Some(data) = action.data {
                            tracing::debug!("memory store complete: [{}] <- {data}", action.address);
                            self.set(action.address, Cell::Data(data));
                        }
                    }
                    self.finish_at = None;
                }
            }
        }
        Ok(())
    }

    /// True if a queued action will write the register.
    pub fn will_change_reg(&self, reg: Reg) -> bool {
        self.actions
            .iter()
            .any(|action| action.register.is_some_and(|r| r.slot() == reg.slot()))
    }

    /// The forwarded value waiting in the EX→WB slot, if it targets `reg`.
    pub fn forward_result(&self, reg: Reg) -> Option<Word> {
        self.forward_wb
            .filter(|action| action.reg.slot() == reg.slot())
            .map(|action| action.data)
    }
}
