//! The simulated machine: clock, register file, and functional units.
//!
//! Units own only their local latches and queues; the `Processor` driver
//! in `sim` owns every unit and hands each stage method the peers it
//! consumes. No unit holds a reference to another.

/// Cycle counter and throttle.
pub mod clock;
/// Register file, alias table, and free list.
pub mod regfile;
/// Functional units.
pub mod units;

pub use clock::Clock;
pub use regfile::RegisterFile;
