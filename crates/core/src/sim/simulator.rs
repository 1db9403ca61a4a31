//! Top-level simulator: owns the cache bank and the directory, and drives
//! one trace entry at a time to completion before the next begins.

use crate::coherence::{CacheBank, CacheLine, LineState, MesiProtocol, MsiProtocol, Protocol};
use crate::config::{self, SimConfig};
use crate::stats::{AccessClass, Stats, StatsReport};

/// A memory reference's operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read,
    Write,
}

/// One line of a parsed trace, handed to [`Simulator::execute`].
///
/// Parsing trace text into this type is the CLI's job (`Pk <OP> <addr>` for
/// [`TraceEntry::Access`], single-character directives for the rest); the
/// simulator only ever sees already-validated entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEntry {
    /// `Pk <R|W> <addr>`.
    Access { processor: usize, op: Op, address: u32 },
    /// `v`: toggle verbose narrative logging.
    ToggleVerbose,
    /// `p`: dump all caches.
    DumpCaches,
    /// `h`: print the current hit rate.
    HitRate,
}

/// What happened while executing one [`TraceEntry`], for the driver to
/// narrate or print. The simulator itself performs no I/O.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// A reference completed; its cost has already been committed to the
    /// stats ledger (`save_stats` + `reset` have run).
    Access { processor: usize, op: Op, address: u32, cycles: u64, class: AccessClass },
    /// Verbose logging was toggled to this new value.
    VerboseToggled(bool),
    /// A snapshot of every processor's cache, one `Vec<CacheLine>` per
    /// processor, indexed by cache line index.
    CacheDump(Vec<Vec<CacheLine>>),
    /// The current hit rate over all committed accesses so far.
    HitRate(f64),
}

/// Owns the per-processor caches, the selected directory protocol, and the
/// stats ledger; drives one trace entry to completion before starting the
/// next, per the single-threaded, cooperative scheduling model.
pub struct Simulator {
    config: SimConfig,
    bank: CacheBank,
    protocol: Box<dyn Protocol>,
    stats: Stats,
    verbose: bool,
}

impl Simulator {
    /// Builds a simulator for `config`, with every cache line `Invalid` and
    /// the directory empty.
    pub fn new(config: SimConfig) -> Self {
        let bank = CacheBank::new(config.num_processors, config.num_cache_lines);
        let protocol: Box<dyn Protocol> = match config.protocol {
            config::Protocol::Msi => Box::new(MsiProtocol::new(config.num_processors, config.num_cache_lines)),
            config::Protocol::Mesi => Box::new(MesiProtocol::new(config.num_processors, config.num_cache_lines)),
        };
        Self {
            config,
            bank,
            protocol,
            stats: Stats::new(),
            verbose: false,
        }
    }

    /// Executes one trace entry to completion and reports what happened.
    ///
    /// Runs every directory message and remote probe for an [`TraceEntry::Access`]
    /// atomically before returning, per the cooperative scheduling model:
    /// no other reference is in flight while this one is handled.
    pub fn execute(&mut self, entry: TraceEntry) -> SimEvent {
        match entry {
            TraceEntry::Access { processor, op, address } => {
                debug_assert!(processor < self.config.num_processors, "processor id out of range");
                match op {
                    Op::Read => self.bank.read(self.protocol.as_mut(), &mut self.stats, processor, address),
                    Op::Write => self.bank.write(self.protocol.as_mut(), &mut self.stats, processor, address),
                }
                self.bank.debug_assert_invariants(self.config.num_cache_lines);
                self.debug_assert_directory_matches_caches();

                let cycles = self.stats.cycles();
                let class = self.stats.class();
                self.stats.save_stats();
                self.stats.reset();

                SimEvent::Access { processor, op, address, cycles, class }
            }
            TraceEntry::ToggleVerbose => {
                self.verbose = !self.verbose;
                SimEvent::VerboseToggled(self.verbose)
            }
            TraceEntry::DumpCaches => {
                let dump = (0..self.config.num_processors)
                    .map(|p| (0..self.config.num_cache_lines).map(|i| self.bank.get(p).peek(i)).collect())
                    .collect();
                SimEvent::CacheDump(dump)
            }
            TraceEntry::HitRate => SimEvent::HitRate(self.stats.hit_rate()),
        }
    }

    /// Whether verbose narrative logging is currently enabled.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Aggregated, final statistics over every committed access so far.
    pub fn report(&self) -> StatsReport {
        self.stats.report()
    }

    /// Enforces invariant 3: for every index, the directory's sharer set
    /// must exactly match the processors whose private line at that index
    /// is non-`Invalid` with a tag equal to the other sharers'. A no-op in
    /// release builds; a logic bug, not a runtime error, if it ever fires.
    pub fn debug_assert_directory_matches_caches(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        for index in 0..self.config.num_cache_lines {
            let cached: Vec<(usize, u32)> = (0..self.config.num_processors)
                .filter_map(|p| {
                    let line = self.bank.get(p).peek(index);
                    (line.state != LineState::Invalid)
                        .then(|| (p, line.tag.expect("non-Invalid line has a tag")))
                })
                .collect();
            let mut directory_sharers = self.protocol.sharer_set(index);
            directory_sharers.sort_unstable();

            if cached.is_empty() {
                debug_assert!(
                    directory_sharers.is_empty(),
                    "index {index}: directory reports sharers {directory_sharers:?} but no cache holds a valid line"
                );
                continue;
            }

            let tag = cached[0].1;
            debug_assert!(
                cached.iter().all(|&(_, t)| t == tag),
                "index {index}: cached copies disagree on tag"
            );

            let mut cached_processors: Vec<usize> = cached.iter().map(|&(p, _)| p).collect();
            cached_processors.sort_unstable();
            debug_assert_eq!(
                cached_processors, directory_sharers,
                "index {index}: directory sharer set does not match the caches' tagged, non-Invalid lines"
            );
        }
    }
}
