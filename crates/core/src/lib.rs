//! Directory-based cache coherence simulator library.
//!
//! This crate implements the cycle-accurate coherence engine for a small
//! shared-memory multiprocessor: per-processor private caches, a central
//! directory, and the MSI and MESI protocols that keep them consistent
//! over a unidirectional ring interconnect. It has the following:
//! 1. **Coherence:** line state, per-processor caches, and the MSI/MESI
//!    directory protocols that realize read-miss and write-miss handling.
//! 2. **Stats:** per-event cycle accounting, access classification, and
//!    final report rendering.
//! 3. **Config:** fixed topology defaults and protocol selection.
//! 4. **Common:** address decomposition and the error types surfaced by
//!    trace parsing and simulation setup.
//! 5. **Sim:** the `Simulator` driver that dispatches trace entries onto
//!    the coherence engine and narrates what happened.
//!
//! Trace parsing, CLI argument handling, and output-file formatting live
//! outside this crate, in the `coherence-sim` binary.

/// Common types and constants (address decomposition, error types).
pub mod common;
/// Simulator configuration (topology defaults, protocol selection).
pub mod config;
/// The coherence engine: line state, caches, directories, and protocols.
pub mod coherence;
/// The simulator driver: trace dispatch and final statistics.
pub mod sim;
/// Cycle accounting, access classification, and report rendering.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Top-level simulator; owns the cache bank, directory protocol, and stats ledger.
pub use crate::sim::simulator::Simulator;
