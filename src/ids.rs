//! Stable integer handles for every entity kind the graph owns.
//!
//! Cross-references between nodes, edges and reads are plain `Copy` ids
//! looked up in the owning [`crate::PanGraph`]'s arenas, rather than raw
//! pointers threaded and repaired by hand. A dangling id (one whose entity
//! has been removed) simply resolves to `None` instead of requiring `Weak`
//! bookkeeping.

use std::fmt;

use derive_more::{From, Into};
use slotmap::new_key_type;

/// Identifier of a locus in the external reference library. Stable across
/// a run.
pub type PrgId = u32;

/// Identifier of a pan-node within the graph.
///
/// Equal to the owning locus's [`PrgId`] until the node is split, at which
/// point the clone is assigned a fresh id by [`crate::graph::PanGraph`]'s
/// `next_id` allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

new_key_type! {
    /// Identifier of a pan-edge within the graph.
    ///
    /// Issued by the edge arena; carries no external meaning.
    pub struct EdgeId;
}

/// Identifier of a read, supplied by the caller (the alignment driver that
/// produced the minimizer hit clusters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct ReadId(pub u32);

impl fmt::Display for ReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
