//! Address decomposition for the directory-coherence simulator.
//!
//! Every reference carries a 32-bit word address. Since no data is modeled,
//! the only thing that matters is how the address maps onto a direct-mapped
//! cache: a two-bit word offset (ignored), a line index, and a tag.

/// Number of index bits for a 512-line direct-mapped cache (`2^9 = 512`).
pub const INDEX_BITS: u32 = 9;

/// Number of word-offset bits for a 4-byte block (ignored; no data is modeled).
pub const OFFSET_BITS: u32 = 2;

/// A decoded cache-line coordinate: which line an address maps to, and the
/// tag that must match for it to be a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineAddr {
    /// Index into the direct-mapped cache (and, identically, the directory).
    pub index: usize,
    /// The remaining high-order bits that disambiguate lines sharing an index.
    pub tag: u32,
}

/// Decomposes a raw word address into `(index, tag)` per the fixed layout:
/// `index = addr[10:2]`, `tag = addr[31:11]`. The low two offset bits are
/// ignored; block size is carried but never changes this decomposition.
#[inline]
pub fn decode(address: u32) -> LineAddr {
    let index = ((address >> OFFSET_BITS) & ((1 << INDEX_BITS) - 1)) as usize;
    let tag = address >> (OFFSET_BITS + INDEX_BITS);
    LineAddr { index, tag }
}
