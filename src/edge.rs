//! Directed, oriented adjacency between two pan-nodes.

use fxhash::FxHashSet;

use crate::ids::{NodeId, ReadId};
use crate::orientation::Orientation;

/// Canonicalize an edge endpoint/orientation triple so that structural
/// equality of the canonical form is exactly reversal-equivalence:
/// `(a, b, o) == (b, a, rev_orient(o))`.
///
/// Folding this into construction means equality becomes plain field
/// comparison instead of a linear scan checking both orientations on
/// every lookup.
pub(crate) fn canonical_form(from: NodeId, to: NodeId, o: Orientation) -> (NodeId, NodeId, Orientation) {
    if from.0 > to.0 {
        (to, from, o.reversed())
    } else if from.0 == to.0 && o.code() > o.reversed().code() {
        (from, to, o.reversed())
    } else {
        (from, to, o)
    }
}

/// A directed, oriented adjacency between two pan-nodes.
///
/// Identity is `(from, to, orientation)` stored in canonical form, so two
/// edges that are equal modulo reversal compare equal by plain field
/// equality.
#[derive(Debug, Clone)]
pub struct PanEdge {
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) orientation: Orientation,
    pub(crate) covg: u32,
    pub(crate) reads: FxHashSet<ReadId>,
}

impl PanEdge {
    pub(crate) fn new(from: NodeId, to: NodeId, orientation: Orientation) -> Self {
        let (from, to, orientation) = canonical_form(from, to, orientation);
        Self {
            from,
            to,
            orientation,
            covg: 0,
            reads: FxHashSet::default(),
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn covg(&self) -> u32 {
        self.covg
    }

    pub fn reads(&self) -> &FxHashSet<ReadId> {
        &self.reads
    }

    /// Whether `n` is one of this edge's two endpoints.
    pub fn has_endpoint(&self, n: NodeId) -> bool {
        self.from == n || self.to == n
    }

    /// `covg` must always equal the number of reads covering this edge.
    pub(crate) fn check_covg_invariant(&self) {
        assert_eq!(
            self.covg as usize,
            self.reads.len(),
            "edge {}->{} covg {} != reads.len() {}",
            self.from,
            self.to,
            self.covg,
            self.reads.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_reversed_construction() {
        let a = NodeId(1);
        let b = NodeId(2);
        // add_edge(1, 2, 1) and add_edge(2, 1, 2) must canonicalize identically.
        let direct = canonical_form(a, b, Orientation::new(1));
        let reversed = canonical_form(b, a, Orientation::new(2));
        assert_eq!(direct, reversed);
    }

    #[test]
    fn self_loop_canonicalizes_deterministically() {
        let a = NodeId(3);
        let direct = canonical_form(a, a, Orientation::new(0));
        let reversed = canonical_form(a, a, Orientation::new(3));
        assert_eq!(direct, reversed);
    }
}
