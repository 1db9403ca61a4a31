//! Per-processor private caches and the registry that owns all of them.

use crate::common::addr::decode;
use crate::coherence::protocol::Protocol;
use crate::coherence::state::LineState;
use crate::stats::Stats;

/// A single private cache line: coherence state and, when not `Invalid`,
/// the tag that identifies which frame is resident. No data is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheLine {
    pub state: LineState,
    pub tag: Option<u32>,
}

impl CacheLine {
    fn matches(self, tag: u32) -> bool {
        self.tag == Some(tag)
    }
}

/// A processor's private, direct-mapped cache.
///
/// Holds only coherence metadata (`{state, tag}` per line); the directory
/// reaches into it through [`CacheBank`] to probe tags, downgrade state, and
/// deliver invalidations, never through an owned back-reference.
#[derive(Debug, Clone)]
pub struct Cache {
    processor_id: usize,
    lines: Vec<CacheLine>,
}

impl Cache {
    /// Creates a cache of `num_lines` lines, all `Invalid`, for `processor_id`.
    pub fn new(processor_id: usize, num_lines: usize) -> Self {
        Self {
            processor_id,
            lines: vec![CacheLine::default(); num_lines],
        }
    }

    /// The processor this cache belongs to.
    pub fn processor_id(&self) -> usize {
        self.processor_id
    }

    /// Reads the current state and tag of `index` without charging cycles.
    pub fn peek(&self, index: usize) -> CacheLine {
        self.lines[index]
    }

    /// Installs `(state, tag)` at `index`, replacing whatever was there.
    pub fn install(&mut self, index: usize, state: LineState, tag: u32) {
        self.lines[index] = CacheLine {
            state,
            tag: Some(tag),
        };
    }

    /// Overwrites only the state at `index`, keeping the existing tag. Used
    /// for silent `Exclusive -> Modified` upgrades and protocol-driven
    /// downgrades (`Modified`/`Exclusive -> Shared`).
    pub fn set_state(&mut self, index: usize, state: LineState) {
        self.lines[index].state = state;
    }

    /// Invalidation callback issued by the directory. Charges a coherence
    /// writeback if the victim was dirty, then clears the line.
    pub fn invalidate_line(&mut self, stats: &mut Stats, index: usize) {
        let line = &mut self.lines[index];
        if line.state == LineState::Modified {
            stats.coherence_writeback();
        }
        *line = CacheLine::default();
    }
}

/// Owns every processor's private cache and orchestrates `read`/`write` at
/// the top level: decode the address, resolve a local hit, or hand off to
/// the configured [`Protocol`] on a miss.
///
/// This is the "cache registry owned by the simulator" that the directory
/// is handed by reference on every miss, rather than holding its own
/// mutually-owning pointers into it.
#[derive(Debug, Clone)]
pub struct CacheBank {
    caches: Vec<Cache>,
}

impl CacheBank {
    /// Builds a bank of `num_processors` caches, each with `num_lines` lines.
    pub fn new(num_processors: usize, num_lines: usize) -> Self {
        Self {
            caches: (0..num_processors).map(|p| Cache::new(p, num_lines)).collect(),
        }
    }

    /// Number of processors (and caches) in the bank.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Whether the bank holds no caches.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Borrows processor `p`'s cache.
    pub fn get(&self, p: usize) -> &Cache {
        &self.caches[p]
    }

    /// Mutably borrows processor `p`'s cache.
    pub fn get_mut(&mut self, p: usize) -> &mut Cache {
        &mut self.caches[p]
    }

    /// Enforces invariants 1 and 2: at most one cache holds a given index
    /// in `Modified`, and at most one in `Exclusive`, across the whole bank.
    /// A no-op in release builds; a logic bug, not a runtime error, if it
    /// ever fires.
    pub fn debug_assert_invariants(&self, num_lines: usize) {
        if !cfg!(debug_assertions) {
            return;
        }
        for index in 0..num_lines {
            let modified = self.caches.iter().filter(|c| c.peek(index).state == LineState::Modified).count();
            let exclusive = self.caches.iter().filter(|c| c.peek(index).state == LineState::Exclusive).count();
            debug_assert!(modified <= 1, "more than one Modified holder for index {index}");
            debug_assert!(exclusive <= 1, "more than one Exclusive holder for index {index}");
            if modified == 1 {
                debug_assert!(exclusive == 0, "index {index} has both a Modified and an Exclusive holder");
            }
        }
    }

    /// Services a read from processor `processor` at `address`.
    ///
    /// Charges one probe; a hit adds one cache access. A miss hands off to
    /// `protocol`, installs the returned state, then re-issues the read as
    /// a hit (one more probe, one more access).
    pub fn read(&mut self, protocol: &mut dyn Protocol, stats: &mut Stats, processor: usize, address: u32) {
        let addr = decode(address);
        stats.cache_probe();
        let line = self.get(processor).peek(addr.index);

        if line.state.is_hit_state() && line.matches(addr.tag) {
            stats.cache_access();
            return;
        }

        if line.state == LineState::Modified && !line.matches(addr.tag) {
            stats.replacement_writeback();
        }

        let new_state = protocol.read_miss(self, stats, addr.index, addr.tag, processor);
        self.get_mut(processor).install(addr.index, new_state, addr.tag);

        stats.cache_probe();
        stats.cache_access();
    }

    /// Services a write from processor `processor` at `address`.
    ///
    /// Mirrors [`CacheBank::read`], with the extra local upgrade path
    /// (`Exclusive -> Modified`, silent, MESI only) before falling through
    /// to the directory.
    pub fn write(&mut self, protocol: &mut dyn Protocol, stats: &mut Stats, processor: usize, address: u32) {
        let addr = decode(address);
        stats.cache_probe();
        let line = self.get(processor).peek(addr.index);

        if line.state == LineState::Modified && line.matches(addr.tag) {
            stats.cache_access();
            return;
        }

        if line.state == LineState::Exclusive && line.matches(addr.tag) {
            self.get_mut(processor).set_state(addr.index, LineState::Modified);
            stats.cache_access();
            return;
        }

        let requester_was_invalid = line.state == LineState::Invalid;
        if line.state == LineState::Modified && !line.matches(addr.tag) {
            stats.replacement_writeback();
        }

        protocol.write_miss(self, stats, addr.index, addr.tag, processor, requester_was_invalid);
        self.get_mut(processor).install(addr.index, LineState::Modified, addr.tag);

        stats.cache_probe();
        stats.cache_access();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_line_is_invalid_with_no_tag() {
        let cache = Cache::new(0, 4);
        let line = cache.peek(0);
        assert_eq!(line.state, LineState::Invalid);
        assert_eq!(line.tag, None);
    }

    #[test]
    fn install_then_peek_round_trips() {
        let mut cache = Cache::new(0, 4);
        cache.install(2, LineState::Shared, 7);
        let line = cache.peek(2);
        assert_eq!(line.state, LineState::Shared);
        assert_eq!(line.tag, Some(7));
    }

    #[test]
    fn invalidating_modified_line_charges_coherence_writeback() {
        let mut cache = Cache::new(0, 4);
        let mut stats = Stats::new();
        cache.install(0, LineState::Modified, 1);
        cache.invalidate_line(&mut stats, 0);
        assert_eq!(cache.peek(0).state, LineState::Invalid);
        assert_eq!(stats.report().coherence_writebacks, 1);
    }

    #[test]
    fn invalidating_shared_line_charges_no_writeback() {
        let mut cache = Cache::new(0, 4);
        let mut stats = Stats::new();
        cache.install(0, LineState::Shared, 1);
        cache.invalidate_line(&mut stats, 0);
        assert_eq!(stats.report().coherence_writebacks, 0);
    }
}
