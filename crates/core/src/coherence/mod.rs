//! The coherence engine.
//!
//! 1. **State:** [`LineState`], the coherence enum shared by caches and directories.
//! 2. **Cache:** [`Cache`] (one per processor) and [`CacheBank`], the registry that
//!    owns all of them and drives `read`/`write` at the top level.
//! 3. **Ring:** hop-distance arithmetic and closest/furthest sharer selection.
//! 4. **Protocol:** the [`Protocol`] strategy interface, and its two
//!    implementations, [`MsiProtocol`] and [`MesiProtocol`].
//!
//! Invariant violations (a closest sharer computed as the requester itself,
//! a write proceeding while the directory disagrees with local state) are
//! bugs, not runtime errors, and are enforced with `debug_assert!` at the
//! sites above rather than surfaced as [`crate::common::SimError`].

pub mod cache;
pub mod mesi;
pub mod msi;
pub mod protocol;
pub mod ring;
pub mod state;

pub use cache::{Cache, CacheBank, CacheLine};
pub use mesi::MesiProtocol;
pub use msi::MsiProtocol;
pub use protocol::Protocol;
pub use state::LineState;
