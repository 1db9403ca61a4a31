//! Configuration for the coherence simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline topology and addressing constants.
//! 2. **Structures:** [`SimConfig`], the root configuration.
//! 3. **Enums:** [`Protocol`], selecting MSI vs. MESI.
//!
//! Configuration may be supplied as JSON (`serde_json`) or built with
//! `SimConfig::default()` for the CLI, which only ever overrides
//! [`SimConfig::protocol`] via the `o` trace-file argument.

use serde::Deserialize;

/// Default topology and addressing constants.
mod defaults {
    /// Number of processors on the ring (fixed topology).
    pub const NUM_PROCESSORS: usize = 4;

    /// Lines per direct-mapped private cache (`2^9`, matching the 9
    /// index bits of a 32-bit address).
    pub const NUM_CACHE_LINES: usize = 512;

    /// Block size in bytes. Carried for completeness; changing it has no
    /// effect beyond the fixed address decomposition (`index = addr[10:2]`,
    /// `tag = addr[31:11]`).
    pub const BLOCK_SIZE_BYTES: usize = 4;
}

/// Coherence protocol selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// `{Modified, Shared, Invalid}`. Default; selected unless the CLI's
    /// `o` argument is present.
    #[default]
    Msi,
    /// `{Modified, Exclusive, Shared, Invalid}`. Adds the silent
    /// `Exclusive -> Modified` upgrade and the `Exclusive` read-miss grant.
    Mesi,
}

/// Root simulator configuration: topology and protocol selection.
///
/// # Examples
///
/// ```
/// use coherence_core::config::{SimConfig, Protocol};
///
/// let config = SimConfig::default();
/// assert_eq!(config.num_processors, 4);
/// assert_eq!(config.protocol, Protocol::Msi);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Number of processors on the ring.
    #[serde(default = "SimConfig::default_num_processors")]
    pub num_processors: usize,

    /// Lines per direct-mapped private cache.
    #[serde(default = "SimConfig::default_num_cache_lines")]
    pub num_cache_lines: usize,

    /// Block size in bytes; carried but unused beyond the fixed address
    /// decomposition (see [`crate::common::addr`]).
    #[serde(default = "SimConfig::default_block_size_bytes")]
    pub block_size_bytes: usize,

    /// Coherence protocol to simulate.
    #[serde(default)]
    pub protocol: Protocol,
}

impl SimConfig {
    fn default_num_processors() -> usize {
        defaults::NUM_PROCESSORS
    }

    fn default_num_cache_lines() -> usize {
        defaults::NUM_CACHE_LINES
    }

    fn default_block_size_bytes() -> usize {
        defaults::BLOCK_SIZE_BYTES
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_processors: defaults::NUM_PROCESSORS,
            num_cache_lines: defaults::NUM_CACHE_LINES,
            block_size_bytes: defaults::BLOCK_SIZE_BYTES,
            protocol: Protocol::default(),
        }
    }
}
