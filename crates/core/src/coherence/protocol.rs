//! Strategy interface selecting between MSI and MESI directory behavior.

use crate::coherence::cache::CacheBank;
use crate::coherence::state::LineState;
use crate::stats::Stats;

/// Directory-side handling of a cache miss.
///
/// Implemented once per protocol so [`CacheBank::read`](crate::coherence::cache::CacheBank::read)
/// and [`CacheBank::write`](crate::coherence::cache::CacheBank::write) stay
/// protocol-agnostic: they decode the address, check for a local hit, and
/// otherwise hand off to whichever `Protocol` the simulator was configured
/// with.
pub trait Protocol {
    /// Handles a read miss at `index`/`tag` from `requester`: consults and
    /// mutates directory state, probes or downgrades other caches via
    /// `bank` as needed, and returns the state the requester should install
    /// locally (`Shared` for MSI; `Shared` or `Exclusive` for MESI).
    fn read_miss(
        &mut self,
        bank: &mut CacheBank,
        stats: &mut Stats,
        index: usize,
        tag: u32,
        requester: usize,
    ) -> LineState;

    /// Handles a write miss. `requester_was_invalid` reports the
    /// requester's own line state immediately before the miss: a forwarder
    /// only needs to supply a full cache access when the requester held no
    /// copy at all.
    #[allow(clippy::too_many_arguments)]
    fn write_miss(
        &mut self,
        bank: &mut CacheBank,
        stats: &mut Stats,
        index: usize,
        tag: u32,
        requester: usize,
        requester_was_invalid: bool,
    );

    /// Processors the directory currently believes hold a valid copy of
    /// `index`, however that protocol tracks it (MSI: a bare sharer bitmap;
    /// MESI: per-processor `(state, tag)` replicas). Used to cross-check
    /// invariant 3 — the directory's sharer set must exactly match the
    /// processors whose private line at `index` is non-`Invalid` with a
    /// tag matching the other sharers — against the cache bank.
    fn sharer_set(&self, index: usize) -> Vec<usize>;
}
