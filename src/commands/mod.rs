//! Command implementations

pub mod allocate;
pub mod simple;
pub mod simulate;

pub use allocate::{AllocationReport, run_allocate};
pub use simple::run_simple;
pub use simulate::{SimulationSettings, SimulationStatistics, run_simulation};
