//! Coherence state shared by both protocols.

use std::fmt;

/// Per-line coherence state.
///
/// MSI never produces [`LineState::Exclusive`]; it is reserved for MESI's
/// extra state distinguishing a clean line with no other sharers from a
/// clean line that is actually shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// No cached copy; tag is undefined.
    #[default]
    Invalid,
    /// Clean, held by exactly one cache, no other sharers (MESI only).
    Exclusive,
    /// Clean, possibly held by more than one cache.
    Shared,
    /// Dirty, held by exactly one cache; all other caches are `Invalid`.
    Modified,
}

impl LineState {
    /// Whether a local access in this state, with a matching tag, can be
    /// served without contacting the directory.
    #[inline]
    pub fn is_hit_state(self) -> bool {
        matches!(self, LineState::Modified | LineState::Shared | LineState::Exclusive)
    }
}

impl fmt::Display for LineState {
    /// Single-letter abbreviation, as used in cache-dump output: `M`, `E`,
    /// `S`, or `I`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LineState::Invalid => "I",
            LineState::Exclusive => "E",
            LineState::Shared => "S",
            LineState::Modified => "M",
        };
        f.write_str(letter)
    }
}
