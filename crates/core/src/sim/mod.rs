//! The simulator driver: consumes a trace, dispatches reads and writes onto
//! the coherence engine, and surfaces final statistics.

pub mod simulator;

pub use simulator::{Op, SimEvent, Simulator, TraceEntry};
