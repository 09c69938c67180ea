//! Simulation driver.

/// The processor: owns every unit and runs the per-cycle loop.
pub mod processor;

pub use processor::Processor;
