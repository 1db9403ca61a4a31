//! Common utilities shared across the coherence simulator.
//!
//! 1. **Addressing:** Decomposition of a 32-bit word address into `(index, tag)`.
//! 2. **Error Handling:** [`SimError`] for trace and I/O failures.

/// Address decomposition (`index`, `tag`) for the direct-mapped cache layout.
pub mod addr;

/// Error types returned by trace parsing and simulation setup.
pub mod error;

pub use addr::{decode, LineAddr};
pub use error::SimError;
