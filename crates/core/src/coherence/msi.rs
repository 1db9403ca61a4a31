//! MSI directory: `{Modified, Shared, Invalid}` line state plus a sharer
//! vector per index. Tags are not tracked here — the directory looks one up
//! by probing a sharer's cache whenever it needs to compare against the
//! requester's tag.

use crate::coherence::cache::CacheBank;
use crate::coherence::protocol::Protocol;
use crate::coherence::ring;
use crate::coherence::state::LineState;
use crate::stats::Stats;

#[derive(Debug, Clone)]
struct DirLine {
    state: LineState,
    sharers: Vec<bool>,
}

impl DirLine {
    fn new(num_processors: usize) -> Self {
        Self {
            state: LineState::Invalid,
            sharers: vec![false; num_processors],
        }
    }

    fn sharer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.sharers.iter().enumerate().filter(|&(_, &s)| s).map(|(i, _)| i)
    }

    fn clear_sharers(&mut self) {
        self.sharers.iter_mut().for_each(|s| *s = false);
    }
}

/// Directory-side implementation of the MSI protocol.
pub struct MsiProtocol {
    num_processors: usize,
    lines: Vec<DirLine>,
}

impl MsiProtocol {
    /// Builds a directory with one entry per cache index, all `Invalid`.
    pub fn new(num_processors: usize, num_lines: usize) -> Self {
        Self {
            num_processors,
            lines: (0..num_lines).map(|_| DirLine::new(num_processors)).collect(),
        }
    }
}

impl Protocol for MsiProtocol {
    fn read_miss(
        &mut self,
        bank: &mut CacheBank,
        stats: &mut Stats,
        index: usize,
        tag: u32,
        requester: usize,
    ) -> LineState {
        stats.classify_remote();
        stats.proc_directory_hop();
        stats.directory_access();

        let num_processors = self.num_processors;
        let entry_state = self.lines[index].state;
        // Excludes `requester`: a stale bit left over from an earlier tag at
        // this index must never be treated as its own "closest sharer" (spec
        // §9/§7 — a closest sharer computed as the requester itself is an
        // invariant violation, not a valid forward target).
        let others: Vec<usize> = self.lines[index].sharer_ids().filter(|&s| s != requester).collect();

        let nearest = ring::closest(requester, num_processors, others.iter().copied());
        let nearest_matches = nearest.is_some_and(|c| bank.get(c).peek(index).tag == Some(tag));

        if entry_state == LineState::Invalid || others.is_empty() || !nearest_matches {
            if !others.is_empty() && !nearest_matches {
                for s in &others {
                    bank.get_mut(*s).invalidate_line(stats, index);
                    stats.invalidation_sent();
                }
            }

            stats.memory_latency();
            stats.classify_off_chip();
            stats.proc_directory_hop();

            let entry = &mut self.lines[index];
            entry.clear_sharers();
            entry.sharers[requester] = true;
            entry.state = LineState::Shared;
            return LineState::Shared;
        }

        let closest = nearest.expect("nearest_matches implies a sharer was found");
        stats.proc_directory_hop();
        stats.cache_probe();
        stats.cache_access();
        stats.ring_hops(ring::distance(requester, closest, num_processors));

        if bank.get(closest).peek(index).state == LineState::Modified {
            bank.get_mut(closest).set_state(index, LineState::Shared);
            stats.coherence_writeback();
        }

        let entry = &mut self.lines[index];
        entry.sharers[requester] = true;
        entry.state = LineState::Shared;
        LineState::Shared
    }

    fn write_miss(
        &mut self,
        bank: &mut CacheBank,
        stats: &mut Stats,
        index: usize,
        tag: u32,
        requester: usize,
        requester_was_invalid: bool,
    ) {
        stats.classify_remote();
        stats.proc_directory_hop();
        stats.directory_access();

        let num_processors = self.num_processors;
        let entry_state = self.lines[index].state;
        let others: Vec<usize> = self.lines[index].sharer_ids().filter(|&s| s != requester).collect();

        if others.is_empty() && entry_state == LineState::Invalid {
            stats.memory_latency();
            stats.classify_off_chip();
            stats.proc_directory_hop();

            let entry = &mut self.lines[index];
            entry.clear_sharers();
            entry.sharers[requester] = true;
            entry.state = LineState::Modified;
            return;
        }

        if others.is_empty() {
            // Requester is already the sole occupant of this index (per
            // the directory's bookkeeping); grant the upgrade directly.
            stats.proc_directory_hop();
            self.lines[index].state = LineState::Modified;
            self.lines[index].sharers[requester] = true;
            return;
        }

        stats.proc_directory_hop();
        let closest = ring::closest(requester, num_processors, others.iter().copied())
            .expect("others is non-empty");
        let forward = bank.get(closest).peek(index).tag == Some(tag);
        stats.cache_probe();

        for &s in &others {
            bank.get_mut(s).invalidate_line(stats, index);
            stats.invalidation_sent();
        }

        if requester_was_invalid && forward && others.len() == 1 {
            stats.cache_access();
        }

        let furthest = ring::furthest(requester, num_processors, others.iter().copied())
            .expect("others is non-empty");
        stats.ring_hops(ring::distance(requester, furthest, num_processors));

        let entry = &mut self.lines[index];
        entry.clear_sharers();
        entry.sharers[requester] = true;
        entry.state = LineState::Modified;
    }

    fn sharer_set(&self, index: usize) -> Vec<usize> {
        self.lines[index].sharer_ids().collect()
    }
}
