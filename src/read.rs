//! The read ledger: per-read ordered edge sequence and per-locus hit sets.
//!
//! The graph transformations in [`crate::graph::PanGraph`] are only correct
//! if read-local state is kept in lockstep with graph-global state; every
//! mutation that touches an edge's or a node's read set goes through the
//! methods here, so coverage counters and read-back-reference sets never
//! drift apart.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::edge::PanEdge;
use crate::ids::{EdgeId, NodeId, ReadId};
use crate::kmer::MinimizerHit;

/// A sequencing read: an ordered sequence of edges it traverses, plus the
/// minimizer hits it contributed to each locus it covers.
#[derive(Debug, Clone)]
pub struct Read {
    pub(crate) read_id: ReadId,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) hits: HashMap<NodeId, Vec<MinimizerHit>>,
}

impl Read {
    pub(crate) fn new(read_id: ReadId) -> Self {
        Self {
            read_id,
            edges: Vec::new(),
            hits: HashMap::new(),
        }
    }

    pub fn read_id(&self) -> ReadId {
        self.read_id
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn hits(&self, node_id: NodeId) -> Option<&[MinimizerHit]> {
        self.hits.get(&node_id).map(Vec::as_slice)
    }

    /// Union `cluster` into this read's hit set for `prg_id`.
    pub(crate) fn add_hits(&mut self, prg_id: u32, cluster: impl IntoIterator<Item = MinimizerHit>) {
        let entry = self.hits.entry(NodeId(prg_id)).or_default();
        for hit in cluster {
            if !entry.contains(&hit) {
                entry.push(hit);
            }
        }
    }

    fn position(&self, e: EdgeId) -> Option<usize> {
        self.edges.iter().position(|&x| x == e)
    }

    /// Neighbor of `e` immediately before it in this read's edge list, or
    /// `None` (the end sentinel) if `e` is first or absent.
    pub fn get_previous_edge(&self, e: EdgeId) -> Option<EdgeId> {
        let i = self.position(e)?;
        i.checked_sub(1).map(|j| self.edges[j])
    }

    /// Neighbor of `e` immediately after it in this read's edge list, or
    /// `None` (the end sentinel) if `e` is last or absent.
    pub fn get_next_edge(&self, e: EdgeId) -> Option<EdgeId> {
        let i = self.position(e)?;
        self.edges.get(i + 1).copied()
    }

    /// The edge adjacent to `e` in this read that shares node `n` with `e`.
    pub fn get_other_edge(
        &self,
        e: EdgeId,
        n: NodeId,
        edges: &SlotMap<EdgeId, PanEdge>,
    ) -> Option<EdgeId> {
        let i = self.position(e)?;
        let prev = i.checked_sub(1).and_then(|j| self.edges.get(j));
        let next = self.edges.get(i + 1);
        [prev, next].into_iter().flatten().copied().find(|&cand| {
            edges
                .get(cand)
                .map(|edge| edge.has_endpoint(n))
                .unwrap_or(false)
        })
    }

    /// Substitute every occurrence of `old` with `new` in this read's edge
    /// list, and move this read between `old.reads` and `new.reads`.
    ///
    /// Returns the cursor (index) of the first replaced occurrence, or the
    /// read's end sentinel (`self.edges.len()`) if `old` was not present.
    pub(crate) fn replace_edge(
        &mut self,
        old: EdgeId,
        new: EdgeId,
        edges: &mut SlotMap<EdgeId, PanEdge>,
    ) -> usize {
        let mut first = self.edges.len();
        let mut replaced = false;
        for (i, slot) in self.edges.iter_mut().enumerate() {
            if *slot == old {
                if !replaced {
                    first = i;
                    replaced = true;
                }
                *slot = new;
            }
        }
        if replaced {
            if let Some(e) = edges.get_mut(old) {
                if e.reads.remove(&self.read_id) {
                    e.covg -= 1;
                }
            }
            if let Some(e) = edges.get_mut(new) {
                if e.reads.insert(self.read_id) {
                    e.covg += 1;
                }
            }
        }
        first
    }

    /// Remove every occurrence of `e` from this read's edge list, and strip
    /// this read from `e.reads`.
    ///
    /// **Warning**: this may leave the read's
    /// edge list non-contiguous (two consecutive edges no longer sharing a
    /// node). The caller is responsible for any repair; the engine
    /// tolerates this transiently.
    pub(crate) fn remove_edge(&mut self, e: EdgeId, edges: &mut SlotMap<EdgeId, PanEdge>) {
        let had = self.edges.iter().any(|&x| x == e);
        self.edges.retain(|&x| x != e);
        if had {
            if let Some(edge) = edges.get_mut(e) {
                if edge.reads.remove(&self.read_id) {
                    edge.covg -= 1;
                }
            }
        }
    }

    /// Drop `n` from this read's per-node hit set and from `n.reads`
    /// (the latter performed by the caller, which owns the node arena).
    pub(crate) fn forget_node_hits(&mut self, n: NodeId) {
        self.hits.remove(&n);
    }
}
