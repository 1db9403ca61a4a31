//! Unit-style integration tests for the coherence engine.

/// The fixed B1-B11 scenarios from the simulator's interface spec,
/// parameterized with `rstest`.
pub mod concrete_scenarios;
/// Property tests over randomly generated traces, checking the universal
/// coherence invariants hold regardless of access pattern.
pub mod invariants;
