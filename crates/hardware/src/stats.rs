//! Simulation statistics collection and reporting.

/// Counters accumulated over a run.
#[derive(Default, Debug, Clone)]
pub struct SimStats {
    /// Clock ticks elapsed.
    pub cycles: u64,
    /// Instructions that completed execution in a functional unit.
    pub instructions_retired: u64,
    /// Control-flow instructions seen by the hazard checker.
    pub branches: u64,
    /// Taken branches under the always-not-taken predictor.
    pub mispredictions: u64,
    /// Decode cycles lost waiting for operand results.
    pub stalls_data: u64,
    /// Decode cycles lost to occupied functional units or an empty free list.
    pub stalls_structural: u64,
}

impl SimStats {
    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints the end-of-run report to stdout.
    pub fn print(&self) {
        println!("\n=========================================================");

        println!("\n[General]");
        println!("  Cycles:               {}", self.cycles);
        println!("  Instructions Retired: {}", self.instructions_retired);
        println!("  CPI:                  {:.4}", self.cpi());

        println!("\n[Pipeline Stalls]");
        let total_stalls = self.stalls_data + self.stalls_structural;
        if total_stalls > 0 {
            println!("  Total Stalled Cycles: {total_stalls}");
            println!(
                "    Data Hazards:       {:<10} ({:.2}%)",
                self.stalls_data,
                (self.stalls_data as f64 / total_stalls as f64) * 100.0
            );
            println!(
                "    Structural Hazards: {:<10} ({:.2}%)",
                self.stalls_structural,
                (self.stalls_structural as f64 / total_stalls as f64) * 100.0
            );
        } else {
            println!("  Total Stalled Cycles: 0");
        }

        println!("\n[Branch Prediction]");
        if self.branches > 0 {
            let accuracy = 1.0 - (self.mispredictions as f64 / self.branches as f64);
            println!(
                "  Accuracy:             {:.2}% ({} / {})",
                accuracy * 100.0,
                self.branches - self.mispredictions,
                self.branches
            );
            println!("  Mispredictions:       {}", self.mispredictions);
        } else {
            println!("  No branches executed.");
        }

        println!("=========================================================\n");
    }
}
