//! Register file: value array, alias table, and free list.
//!
//! 57 physical slots back 14 architectural names through the register
//! alias table (RAT). The RAT starts as the identity mapping and the free
//! list holds P14..P56 in ascending order.
//!
//! `read` and `write` index the value array by the operand's raw slot and
//! never consult the RAT: by the time an instruction reaches a functional
//! unit its operands have been renamed, and decode asserts that invariant
//! at dispatch.
//!
//! Reclamation is deliberately imprecise: `alias` returns the previous
//! mapping to the free list at the moment it allocates the new one. Serial
//! issue plus the stall-on-hazard rules keep this safe: a consumer of the
//! old mapping is either already latched or retired before the 42
//! intervening registers cycle around.

use std::collections::VecDeque;

use crate::common::constants::{ARCH_REG_COUNT, PHYS_REG_COUNT};
use crate::common::error::RenameStall;
use crate::common::reg::{ArchReg, PhysReg, Reg};
use crate::common::word::Word;

/// The unified register file.
#[derive(Debug)]
pub struct RegisterFile {
    vals: [Word; PHYS_REG_COUNT],
    rat: [PhysReg; ARCH_REG_COUNT],
    free: VecDeque<PhysReg>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with all values zero, the identity RAT,
    /// and P14..P56 free.
    pub fn new() -> Self {
        let rat = std::array::from_fn(|i| {
            PhysReg::new(i as u8).unwrap_or_else(|| unreachable!("identity RAT in range"))
        });
        let free = (ARCH_REG_COUNT..PHYS_REG_COUNT)
            .filter_map(|i| PhysReg::new(i as u8))
            .collect();
        Self {
            vals: [0; PHYS_REG_COUNT],
            rat,
            free,
        }
    }

    /// Reads the value in the operand's slot.
    pub fn read(&self, reg: Reg) -> Word {
        self.vals[reg.slot()]
    }

    /// Writes the value in the operand's slot.
    pub fn write(&mut self, reg: Reg, value: Word) {
        self.vals[reg.slot()] = value;
    }

    /// Renames an architectural destination.
    ///
    /// The old mapping joins the back of the free list; the front of the
    /// list becomes the new mapping. Fails with `RenameStall` if the free
    /// list is empty; decode treats that as a structural hazard.
    pub fn alias(&mut self, arch: ArchReg) -> Result<PhysReg, RenameStall> {
        if self.free.is_empty() {
            return Err(RenameStall(arch));
        }
        let old = self.rat[arch.index()];
        self.free.push_back(old);
        let fresh = self
            .free
            .pop_front()
            .unwrap_or_else(|| unreachable!("free list checked non-empty"));
        self.rat[arch.index()] = fresh;
        tracing::debug!("renamed {arch}: {old} -> {fresh}");
        Ok(fresh)
    }

    /// A snapshot of the alias table.
    pub fn rat(&self) -> [PhysReg; ARCH_REG_COUNT] {
        self.rat
    }

    /// The architecturally visible value of a register (through the RAT).
    pub fn arch_value(&self, arch: ArchReg) -> Word {
        self.vals[self.rat[arch.index()].index()]
    }

    /// Number of unmapped physical registers.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Prints the architectural register dump to stdout.
    pub fn print(&self, time: Option<u64>) {
        match time {
            Some(t) => println!("Register file at t={t}"),
            None => println!("Register File"),
        }
        for arch in ArchReg::all() {
            let phys = self.rat[arch.index()];
            println!("{arch} ({phys}) = {}", self.vals[phys.index()]);
        }
    }

    #[cfg(test)]
    pub(crate) fn drain_free_for_test(&mut self) {
        self.free.clear();
    }
}
