//! MESI directory: a full `(state, tag)` replica per processor per index,
//! mirroring what each cache believes. This lets the directory tell
//! `Exclusive` apart from `Shared` without a separate probe on the
//! read-miss path.

use crate::coherence::cache::CacheBank;
use crate::coherence::protocol::Protocol;
use crate::coherence::ring;
use crate::coherence::state::LineState;
use crate::stats::Stats;

#[derive(Debug, Clone, Copy, Default)]
struct DirEntry {
    state: LineState,
    tag: Option<u32>,
}

/// Directory-side implementation of the MESI protocol.
pub struct MesiProtocol {
    num_processors: usize,
    /// `lines[index][processor]`.
    lines: Vec<Vec<DirEntry>>,
}

impl MesiProtocol {
    /// Builds a directory with one `(state, tag)` replica per processor per
    /// cache index, all `Invalid`.
    pub fn new(num_processors: usize, num_lines: usize) -> Self {
        Self {
            num_processors,
            lines: (0..num_lines).map(|_| vec![DirEntry::default(); num_processors]).collect(),
        }
    }

    /// Processors other than `requester` whose replica at `index` matches
    /// `tag` and is non-`Invalid` — the definition of "sharer" in MESI.
    fn sharers_of(&self, index: usize, tag: u32, requester: usize) -> Vec<usize> {
        (0..self.num_processors)
            .filter(|&i| i != requester)
            .filter(|&i| {
                let e = self.lines[index][i];
                e.state != LineState::Invalid && e.tag == Some(tag)
            })
            .collect()
    }
}

impl Protocol for MesiProtocol {
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
        let sharers = self.sharers_of(index, tag, requester);

        if sharers.is_empty() {
            stats.memory_latency();
            stats.classify_off_chip();
            stats.proc_directory_hop();

            self.lines[index][requester] = DirEntry {
                state: LineState::Exclusive,
                tag: Some(tag),
            };
            return LineState::Exclusive;
        }

        let closest =
            ring::closest(requester, num_processors, sharers.iter().copied()).expect("sharers is non-empty");
        stats.proc_directory_hop();
        stats.cache_probe();
        stats.cache_access();
        stats.ring_hops(ring::distance(requester, closest, num_processors));

        match self.lines[index][closest].state {
            LineState::Modified => {
                stats.coherence_writeback();
                bank.get_mut(closest).set_state(index, LineState::Shared);
            }
            LineState::Exclusive => {
                bank.get_mut(closest).set_state(index, LineState::Shared);
            }
            _ => {}
        }

        self.lines[index][closest].state = LineState::Shared;
        self.lines[index][requester] = DirEntry {
            state: LineState::Shared,
            tag: Some(tag),
        };
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
        let sharers = self.sharers_of(index, tag, requester);

        if !sharers.is_empty() {
            stats.proc_directory_hop();
            stats.cache_probe();

            for &s in &sharers {
                bank.get_mut(s).invalidate_line(stats, index);
                self.lines[index][s] = DirEntry::default();
                stats.invalidation_sent();
            }

            if requester_was_invalid && sharers.len() == 1 {
                stats.cache_access();
            }

            let furthest =
                ring::furthest(requester, num_processors, sharers.iter().copied()).expect("sharers is non-empty");
            stats.ring_hops(ring::distance(requester, furthest, num_processors));
        } else {
            let own = self.lines[index][requester];
            if own.state == LineState::Shared && own.tag == Some(tag) {
                stats.proc_directory_hop();
            } else {
                stats.memory_latency();
                stats.classify_off_chip();
                stats.proc_directory_hop();
            }
        }

        self.lines[index][requester] = DirEntry {
            state: LineState::Modified,
            tag: Some(tag),
        };
    }

    fn sharer_set(&self, index: usize) -> Vec<usize> {
        (0..self.num_processors).filter(|&p| self.lines[index][p].state != LineState::Invalid).collect()
    }
}
