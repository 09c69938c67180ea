//! Write-back unit: a FIFO of pending register writes.
//!
//! At most one action retires per cycle. While queued, a pending value can
//! be observed by the hazard checker through `forward_result`; the scan
//! returns the oldest match so a later write cannot shadow a still-pending
//! older one.

use std::collections::VecDeque;

use crate::common::reg::Reg;
use crate::common::word::Word;
use crate::core::regfile::RegisterFile;

/// A pending register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteBackAction {
    /// Target register (physical once renaming has run).
    pub reg: Reg,
    /// Value to commit.
    pub data: Word,
}

/// The write-back stage.
#[derive(Debug, Default)]
pub struct WriteBack {
    queue: VecDeque<WriteBackAction>,
}

impl WriteBack {
    /// Creates an empty write-back unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a pending write.
    pub fn prepare_write(&mut self, action: WriteBackAction) {
        self.queue.push_back(action);
    }

    /// True when nothing is pending.
    pub fn is_available(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending writes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when no writes are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The value of the earliest pending write to the register, if any.
    pub fn forward_result(&self, reg: Reg) -> Option<Word> {
        self.queue
            .iter()
            .find(|action| action.reg.slot() == reg.slot())
            .map(|action| action.data)
    }

    /// Retires at most one pending write into the register file.
    pub fn write(&mut self, regs: &mut RegisterFile) {
        if let Some(action) = self.queue.pop_front() {
            tracing::debug!("write-back: {} <- {}", action.reg, action.data);
            regs.write(action.reg, action.data);
        }
    }
}
