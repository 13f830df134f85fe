//! The pangenome graph container and its mutation algebra.
//!
//! Everything that touches more than one arena at once — creating,
//! collapsing, splitting or pruning nodes and edges, or keeping a read's
//! threaded edge list in lockstep with them — lives here.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::path::Path;
use std::rc::Rc;

use fxhash::FxHashSet;
use slotmap::SlotMap;

use crate::edge::{canonical_form, PanEdge};
use crate::error::EmitError;
use crate::ids::{EdgeId, NodeId, ReadId};
use crate::kmer::{KmerGraphTemplate, MinimizerHit, NodeKmerCoverage};
use crate::node::PanNode;
use crate::orientation::{combine_orientations, Orientation};
use crate::read::Read;
use crate::sample::Sample;

/// A pangenome graph: pan-nodes, pan-edges, the reads threaded through them,
/// and the samples that traversed their k-mer sub-graphs.
///
/// Nodes are kept in a `BTreeMap` keyed by [`NodeId`] so that `remove_node`'s
/// cursor and `split_nodes_by_reads`'s iteration order are deterministic.
/// Edges live in a `SlotMap` arena; `edge_order` is a separate
/// insertion-ordered index, since a `SlotMap` has no ordering of its own.
#[derive(Debug, Default)]
pub struct PanGraph {
    pub(crate) nodes: BTreeMap<NodeId, PanNode>,
    pub(crate) edges: SlotMap<EdgeId, PanEdge>,
    pub(crate) edge_order: Vec<EdgeId>,
    pub(crate) reads: HashMap<ReadId, Read>,
    pub(crate) samples: BTreeMap<String, Sample>,
    next_id: u32,
}

fn mirror_endpoints(edge: &PanEdge, old: NodeId, new: NodeId) -> (NodeId, NodeId, Orientation) {
    if edge.from() == old {
        (new, edge.to(), edge.orientation())
    } else if edge.to() == old {
        (edge.from(), new, edge.orientation())
    } else {
        panic!("split_node_by_edges: edge does not touch node {old}")
    }
}

/// Receives one `tuple_size`-window of consecutive edges from a single read,
/// as handed out by [`PanGraph::construct_tuple_graph`].
pub trait TupleSink {
    fn add_tuple(&mut self, window: &[EdgeId], read_id: ReadId);
}

impl PanGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node, edge, read and sample, leaving an empty graph.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&PanNode> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&PanEdge> {
        self.edges.get(id)
    }

    pub fn read(&self, id: ReadId) -> Option<&Read> {
        self.reads.get(&id)
    }

    pub fn sample(&self, name: &str) -> Option<&Sample> {
        self.samples.get(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PanNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &PanEdge> {
        self.edges.values()
    }

    pub fn reads(&self) -> impl Iterator<Item = &Read> {
        self.reads.values()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.values()
    }

    /// Look up the edge for `(from, to, orientation)`, modulo reversal,
    /// scanning `from`'s incident edge list.
    pub fn find_edge(&self, from: NodeId, to: NodeId, orientation: Orientation) -> Option<EdgeId> {
        let (cfrom, cto, corient) = canonical_form(from, to, orientation);
        let node = self.nodes.get(&from)?;
        node.edges.iter().copied().find(|&eid| {
            self.edges
                .get(eid)
                .map(|e| e.from() == cfrom && e.to() == cto && e.orientation() == corient)
                .unwrap_or(false)
        })
    }

    fn next_node_key(&self, n: NodeId) -> Option<NodeId> {
        self.nodes
            .range((Bound::Excluded(n), Bound::Unbounded))
            .next()
            .map(|(&k, _)| k)
    }

    /// Smallest id `>= next_id` not already in use. Not advanced past the
    /// value it returns: the next call re-scans from the same starting
    /// point and will step past it once it is occupied.
    fn alloc_node_id(&mut self) -> NodeId {
        while self.nodes.contains_key(&NodeId(self.next_id)) {
            self.next_id += 1;
        }
        NodeId(self.next_id)
    }

    /// Drop `n` from `read_id`'s hit map and from `n.reads`, decrementing
    /// `n.covg`.
    fn ledger_remove_node(&mut self, read_id: ReadId, n: NodeId) {
        if let Some(read) = self.reads.get_mut(&read_id) {
            read.forget_node_hits(n);
        }
        if let Some(node) = self.nodes.get_mut(&n) {
            if node.reads.remove(&read_id) {
                node.covg -= 1;
            }
        }
    }

    /// `ledger_remove_node(old)` followed by attaching `read_id` to `new`.
    fn ledger_replace_node(&mut self, read_id: ReadId, old: NodeId, new: NodeId) {
        self.ledger_remove_node(read_id, old);
        if let Some(node) = self.nodes.get_mut(&new) {
            if node.reads.insert(read_id) {
                node.covg += 1;
            }
        }
    }

    /// Create, or add coverage to, the pan-node for `prg_id` from a read's
    /// minimizer hit cluster.
    ///
    /// Every hit in `cluster` must belong to `read_id` and `prg_id`; callers
    /// must not report the same `(prg_id, read_id)` pair twice, or the
    /// node's `covg == |reads|` invariant will be violated.
    pub fn add_node(
        &mut self,
        prg_id: u32,
        prg_name: &str,
        read_id: ReadId,
        cluster: Vec<MinimizerHit>,
    ) -> NodeId {
        for hit in &cluster {
            assert_eq!(
                hit.read_id, read_id.0,
                "add_node: hit.read_id {} != read_id {}",
                hit.read_id, read_id.0
            );
            assert_eq!(
                hit.prg_id, prg_id,
                "add_node: hit.prg_id {} != prg_id {}",
                hit.prg_id, prg_id
            );
        }

        let node_id = NodeId(prg_id);
        match self.nodes.get_mut(&node_id) {
            Some(n) => n.covg += 1,
            None => {
                let mut n = PanNode::new(prg_id, node_id, prg_name);
                n.covg = 1;
                self.nodes.insert(node_id, n);
            }
        }

        let read = self.reads.entry(read_id).or_insert_with(|| Read::new(read_id));
        read.add_hits(prg_id, cluster);
        self.nodes.get_mut(&node_id).unwrap().reads.insert(read_id);

        self.nodes[&node_id].check_covg_invariant();
        node_id
    }

    /// Create, or add coverage to, the pan-node for `prg_id` from a sample's
    /// k-mer path traversal. Shares the same `covg` counter as the
    /// hit-based overload but does not touch `node.reads`; the two are
    /// meant to be used in disjoint construction phases.
    pub fn add_node_for_sample(
        &mut self,
        prg_id: u32,
        prg_name: &str,
        sample_name: &str,
        template: &Rc<KmerGraphTemplate>,
        path: crate::kmer::KmerPath,
    ) -> NodeId {
        let node_id = NodeId(prg_id);
        match self.nodes.get_mut(&node_id) {
            Some(n) => n.covg += 1,
            None => {
                let mut n = PanNode::new(prg_id, node_id, prg_name);
                n.covg = 1;
                self.nodes.insert(node_id, n);
            }
        }
        let node = self.nodes.get_mut(&node_id).unwrap();
        node.ensure_kmer_template(template);
        node.samples.insert(sample_name.to_string());
        node.add_path(path.clone());

        let sample = self
            .samples
            .entry(sample_name.to_string())
            .or_insert_with(|| Sample::new(sample_name));
        sample.add_path(node_id, path);

        node_id
    }

    /// Create the edge `(from, to, orientation)`, or add coverage to it if
    /// an equal-modulo-reversal edge already exists.
    ///
    /// # Panics
    /// Panics if either endpoint is not a node already in the graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, orientation: Orientation) -> EdgeId {
        assert!(self.nodes.contains_key(&from), "add_edge: no such node {from}");
        assert!(self.nodes.contains_key(&to), "add_edge: no such node {to}");

        if let Some(existing) = self.find_edge(from, to, orientation) {
            self.edges.get_mut(existing).unwrap().covg += 1;
            return existing;
        }

        let mut edge = PanEdge::new(from, to, orientation);
        edge.covg = 1;
        let (cfrom, cto) = (edge.from(), edge.to());
        let id = self.edges.insert(edge);
        self.edge_order.push(id);
        self.nodes.get_mut(&cfrom).unwrap().edges.push(id);
        self.nodes.get_mut(&cto).unwrap().edges.push(id);
        id
    }

    /// `add_edge`, additionally threading the new (or existing) edge onto
    /// `read_id`'s edge list.
    pub fn add_edge_for_read(
        &mut self,
        from: NodeId,
        to: NodeId,
        orientation: Orientation,
        read_id: ReadId,
    ) -> EdgeId {
        let edge_id = self.add_edge(from, to, orientation);
        let read = self.reads.entry(read_id).or_insert_with(|| Read::new(read_id));
        read.edges.push(edge_id);
        let edge = self.edges.get_mut(edge_id).unwrap();
        edge.reads.insert(read_id);
        self.edges[edge_id].check_covg_invariant();
        edge_id
    }

    /// Remove `e` from the graph: strip it from both endpoints' edge lists,
    /// unthread it from every read that carries it, then drop it from the
    /// edge arena.
    ///
    /// Returns the edge that now occupies `e`'s old slot in insertion order,
    /// or `None` if `e` was last.
    pub fn remove_edge(&mut self, e: EdgeId) -> Option<EdgeId> {
        let edge = self
            .edges
            .get(e)
            .unwrap_or_else(|| panic!("remove_edge: unknown edge"))
            .clone();

        if let Some(n) = self.nodes.get_mut(&edge.from()) {
            n.edges.retain(|&x| x != e);
        }
        if let Some(n) = self.nodes.get_mut(&edge.to()) {
            n.edges.retain(|&x| x != e);
        }

        let affected: Vec<ReadId> = edge.reads().iter().copied().collect();
        for rid in affected {
            if let Some(read) = self.reads.get_mut(&rid) {
                read.remove_edge(e, &mut self.edges);
            }
        }

        self.edges.remove(e);
        let pos = self
            .edge_order
            .iter()
            .position(|&x| x == e)
            .expect("remove_edge: edge missing from edge_order");
        self.edge_order.remove(pos);
        self.edge_order.get(pos).copied()
    }

    /// Remove `n` and every edge incident to it. Incident edges are
    /// removed in reverse incidence order.
    ///
    /// Returns the next node key in `NodeId` order, or `None` if `n` was
    /// last.
    pub fn remove_node(&mut self, n: NodeId) -> Option<NodeId> {
        let next = self.next_node_key(n);
        let incident: Vec<EdgeId> = self
            .nodes
            .get(&n)
            .map(|node| node.edges.clone())
            .unwrap_or_default();
        for &eid in incident.iter().rev() {
            self.remove_edge(eid);
        }
        self.nodes.remove(&n);
        next
    }

    /// Collapse two consecutive edges on `read_id`'s list, `edges[prev_idx]`
    /// and `edges[prev_idx + 1]`, across their shared junction node.
    ///
    /// Returns the cursor into `read_id`'s (now shorter) edge list at which
    /// to resume scanning.
    pub fn add_shortcut_edge(&mut self, read_id: ReadId, prev_idx: usize) -> usize {
        let read = self.reads.get(&read_id).expect("add_shortcut_edge: unknown read");
        let prev_id = read.edges()[prev_idx];
        let curr_id = read.edges()[prev_idx + 1];
        let prev = self.edges.get(prev_id).unwrap().clone();
        let curr = self.edges.get(curr_id).unwrap().clone();

        let mut new_edge: Option<EdgeId> = None;
        let mut node_to_remove: Option<NodeId> = None;

        if prev.to() == curr.from() && prev.from() != curr.to() {
            let o = combine_orientations(prev.orientation(), curr.orientation());
            new_edge = Some(self.add_edge(prev.from(), curr.to(), o));
            node_to_remove = Some(prev.to());
        } else if prev.to() == curr.to() && prev.from() != curr.from() {
            let o = combine_orientations(prev.orientation(), curr.orientation().reversed());
            new_edge = Some(self.add_edge(prev.from(), curr.from(), o));
            node_to_remove = Some(prev.to());
        } else if prev.from() == curr.to() && prev.to() != curr.from() {
            let o = combine_orientations(prev.orientation().reversed(), curr.orientation().reversed());
            new_edge = Some(self.add_edge(prev.to(), curr.from(), o));
            node_to_remove = Some(prev.from());
        } else if prev.from() == curr.from() && prev.to() != curr.to() {
            let o = combine_orientations(prev.orientation().reversed(), curr.orientation());
            new_edge = Some(self.add_edge(prev.to(), curr.to(), o));
            node_to_remove = Some(prev.from());
        } else {
            // Perfect 2-cycle: prev and curr share both endpoints. There is
            // no well-defined shortcut; fall back to whichever neighboring
            // edge on the read tells us which of the two shared nodes is a
            // dead end.
            let read = self.reads.get(&read_id).unwrap();
            let neighbor = read
                .get_previous_edge(prev_id)
                .or_else(|| read.get_next_edge(curr_id));
            if let Some(nb_id) = neighbor {
                let nb = self.edges.get(nb_id).unwrap();
                if nb.has_endpoint(prev.from()) {
                    node_to_remove = Some(prev.to());
                } else if nb.has_endpoint(prev.to()) {
                    node_to_remove = Some(prev.from());
                }
            }
        }

        if let Some(n) = node_to_remove {
            self.ledger_remove_node(read_id, n);
            if let Some(node) = self.nodes.get(&n) {
                node.check_covg_invariant();
            }
        }

        match new_edge {
            Some(eid) => {
                // add_edge's implicit +1 bump assumed a new covering read;
                // undo it here since the shortcut replaces, not adds, a
                // traversal.
                self.edges.get_mut(eid).unwrap().covg -= 1;
                let read = self.reads.get_mut(&read_id).unwrap();
                read.remove_edge(curr_id, &mut self.edges);
                let cursor = read.replace_edge(prev_id, eid, &mut self.edges);
                self.edges.get(eid).unwrap().check_covg_invariant();
                cursor
            }
            None => {
                let read = self.reads.get_mut(&read_id).unwrap();
                read.remove_edge(curr_id, &mut self.edges);
                read.remove_edge(prev_id, &mut self.edges);
                prev_idx
            }
        }
    }

    /// Split `n` into two nodes along `e1`/`e2`: reads that traverse `e1`
    /// (and, greedily, reads whose only edge is `e2`) move to a fresh clone
    /// of `n`.
    ///
    /// Returns the cursor into `n`'s (now shorter) edge list at which to
    /// resume scanning.
    ///
    /// # Panics
    /// Panics if `n` is not an endpoint of `e1`.
    pub fn split_node_by_edges(&mut self, n: NodeId, e1: EdgeId, e2: EdgeId) -> usize {
        assert!(
            self.edges[e1].has_endpoint(n),
            "split_node_by_edges: {n} is not an endpoint of e1"
        );

        let new_id = self.alloc_node_id();
        let mut clone = self.nodes[&n].split_clone(new_id);
        clone.covg = 0;
        self.nodes.insert(new_id, clone);

        let (f1, t1, o1) = mirror_endpoints(&self.edges[e1], n, new_id);
        let e1p = self.add_edge(f1, t1, o1);
        self.edges.get_mut(e1p).unwrap().covg -= 1;

        let (f2, t2, o2) = mirror_endpoints(&self.edges[e2], n, new_id);
        let e2p = self.add_edge(f2, t2, o2);
        self.edges.get_mut(e2p).unwrap().covg -= 1;

        let e1_reads: Vec<ReadId> = self.edges[e1].reads().iter().copied().collect();
        for rid in e1_reads {
            self.ledger_replace_node(rid, n, new_id);
            let read = self.reads.get_mut(&rid).unwrap();
            read.replace_edge(e2, e2p, &mut self.edges);
            read.replace_edge(e1, e1p, &mut self.edges);
        }

        // Reads that only ever touched e2 (never e1) and go nowhere else:
        // greedily pull them onto the clone too, since a single-edge read
        // has no other context to decide which copy it belongs to.
        let e2_reads: Vec<ReadId> = self.edges[e2].reads().iter().copied().collect();
        for rid in e2_reads {
            if self.reads[&rid].edges().len() == 1 {
                self.ledger_replace_node(rid, n, new_id);
                self.reads
                    .get_mut(&rid)
                    .unwrap()
                    .replace_edge(e2, e2p, &mut self.edges);
            }
        }

        if self.edges[e2].covg() == 0 {
            assert!(self.edges[e2].reads().is_empty());
            self.remove_edge(e2);
        }

        assert_eq!(
            self.edges[e1].covg(),
            0,
            "split_node_by_edges: e1 still has coverage after migration"
        );
        assert!(self.edges[e1].reads().is_empty());
        let node = self.nodes.get_mut(&n).unwrap();
        let pos = node
            .edges
            .iter()
            .position(|&x| x == e1)
            .expect("split_node_by_edges: e1 missing from n.edges");
        node.edges.remove(pos);
        self.remove_edge(e1);

        pos
    }

    /// For every node with degree > 2 and coverage above `node_thresh`,
    /// split off any single edge whose coverage is above `edge_thresh` and
    /// whose covering reads agree on exactly one "other" edge at this node.
    pub fn split_nodes_by_reads(&mut self, node_thresh: u32, edge_thresh: u32) {
        tracing::info!(node_thresh, edge_thresh, "split_nodes_by_reads: start");
        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for n in node_ids {
            let (degree, covg) = match self.nodes.get(&n) {
                Some(node) => (node.degree(), node.covg()),
                None => continue,
            };
            if degree <= 2 || covg <= node_thresh {
                continue;
            }

            let mut i = 0;
            while i < self.nodes[&n].edges.len() && self.nodes[&n].edges.len() > 2 {
                let eid = self.nodes[&n].edges[i];
                if self.edges[eid].covg() <= edge_thresh {
                    i += 1;
                    continue;
                }

                let mut distinct: Option<EdgeId> = None;
                let mut ambiguous = false;
                let read_ids: Vec<ReadId> = self.edges[eid].reads().iter().copied().collect();
                for rid in read_ids {
                    if let Some(other) = self.reads[&rid].get_other_edge(eid, n, &self.edges) {
                        match distinct {
                            None => distinct = Some(other),
                            Some(d) if d != other => {
                                ambiguous = true;
                                break;
                            }
                            _ => {}
                        }
                    }
                }

                if !ambiguous {
                    if let Some(other) = distinct {
                        i = self.split_node_by_edges(n, eid, other);
                        continue;
                    }
                }
                i += 1;
            }
        }
        tracing::info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "split_nodes_by_reads: done"
        );
    }

    /// Walk every read's edge list, collapsing consecutive low-coverage
    /// edge pairs with [`Self::add_shortcut_edge`].
    pub fn read_clean(&mut self, thresh: u32) {
        tracing::info!(thresh, edges = self.edge_order.len(), "read_clean: start");
        let read_ids: Vec<ReadId> = self.reads.keys().copied().collect();
        for rid in read_ids {
            let mut prev_idx = 0usize;
            loop {
                let len = match self.reads.get(&rid) {
                    Some(r) => r.edges().len(),
                    None => break,
                };
                if prev_idx + 1 >= len {
                    break;
                }
                let prev_id = self.reads[&rid].edges()[prev_idx];
                let curr_id = self.reads[&rid].edges()[prev_idx + 1];
                let low = self.edges[prev_id].covg() <= thresh && self.edges[curr_id].covg() <= thresh;
                if low {
                    prev_idx = self.add_shortcut_edge(rid, prev_idx);
                } else {
                    prev_idx += 1;
                }
            }
        }
        tracing::info!(edges = self.edge_order.len(), "read_clean: done");
    }

    /// Remove every edge at or below `thresh` coverage.
    pub fn remove_low_covg_edges(&mut self, thresh: u32) {
        tracing::info!(thresh, edges = self.edge_order.len(), "remove_low_covg_edges: start");
        let mut pos = 0;
        while pos < self.edge_order.len() {
            let eid = self.edge_order[pos];
            if self.edges[eid].covg() <= thresh {
                self.remove_edge(eid);
            } else {
                pos += 1;
            }
        }
        tracing::info!(edges = self.edge_order.len(), "remove_low_covg_edges: done");
    }

    /// Remove every node at or below `thresh` coverage, and every
    /// edge-less node once the graph has any edges at all.
    pub fn remove_low_covg_nodes(&mut self, thresh: u32) {
        tracing::info!(thresh, nodes = self.nodes.len(), "remove_low_covg_nodes: start");
        let mut cursor = self.nodes.keys().next().copied();
        while let Some(n) = cursor {
            let node = match self.nodes.get(&n) {
                Some(node) => node,
                None => {
                    cursor = self.next_node_key(n);
                    continue;
                }
            };
            let edges_nonempty = !self.edges.is_empty();
            let should_remove = node.covg() <= thresh || (edges_nonempty && node.edges.is_empty());
            cursor = if should_remove {
                self.remove_node(n)
            } else {
                self.next_node_key(n)
            };
        }
        tracing::info!(nodes = self.nodes.len(), "remove_low_covg_nodes: done");
    }

    /// Run the fixed six-step cleaning schedule: read-clean at four rising
    /// thresholds derived from `coverage`, a coverage-triggered split pass,
    /// one more read-clean, then pruning of low-coverage edges and nodes.
    ///
    /// The scaling factor is computed in integer arithmetic before being
    /// widened to `f64` (a naive floating-point product/quotient would
    /// round differently).
    pub fn clean(&mut self, coverage: u32) {
        let edge_covg: u64 = self.edges.values().map(|e| e.covg() as u64).sum();
        let node_covg: u64 = self.nodes.values().map(|n| n.covg() as u64).sum();
        tracing::info!(edge_covg, node_covg, "clean: coverage totals");

        let f = if node_covg == 0 {
            0.0
        } else {
            ((coverage as u64 * edge_covg) / node_covg) as f64
        };
        tracing::info!(f, "clean: scaling factor");

        self.read_clean((0.025 * f) as u32);
        self.read_clean((0.05 * f) as u32);
        self.read_clean((0.1 * f) as u32);
        self.read_clean((0.2 * f) as u32);

        self.split_nodes_by_reads((1.5 * coverage as f64) as u32, f as u32);
        self.read_clean((0.2 * f) as u32);

        self.remove_low_covg_edges((0.2 * f) as u32);
        self.remove_low_covg_nodes((0.05 * coverage as f64) as u32);
    }

    /// Layer per-locus k-mer sub-graph coverage onto every node that has a
    /// template in `locus_templates`, from the hits its covering reads
    /// recorded.
    pub fn add_hits_to_kmergraphs(&mut self, locus_templates: &HashMap<u32, Rc<KmerGraphTemplate>>) {
        let node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for nid in node_ids {
            let prg_id = self.nodes[&nid].prg_id();
            let template = match locus_templates.get(&prg_id) {
                Some(t) => Rc::clone(t),
                None => continue,
            };
            self.nodes.get_mut(&nid).unwrap().kmer = Some(NodeKmerCoverage::new(template));

            let read_ids: Vec<ReadId> = self.nodes[&nid].reads().iter().copied().collect();
            for rid in read_ids {
                let hits = match self.reads.get(&rid).and_then(|r| r.hits(nid)) {
                    Some(hits) => hits.to_vec(),
                    None => continue,
                };
                let kmer = self.nodes.get_mut(&nid).unwrap().kmer.as_mut().unwrap();
                for hit in &hits {
                    kmer.add_hit(hit.knode_id, hit.strand);
                }
            }

            let covg = self.nodes[&nid].covg();
            self.nodes
                .get_mut(&nid)
                .unwrap()
                .kmer
                .as_mut()
                .unwrap()
                .set_num_reads(covg);
        }
    }

    /// Slide a window of `tuple_size` consecutive edges along every read's
    /// edge list, handing each window to `sink`.
    ///
    /// The window stops one short of the last possible position (`i +
    /// tuple_size < len`, not `<=`): the very last full window on a read
    /// is never emitted.
    pub fn construct_tuple_graph(&self, tuple_size: usize, sink: &mut impl TupleSink) {
        if tuple_size == 0 {
            return;
        }
        for (&rid, read) in &self.reads {
            let len = read.edges().len();
            let mut i = 0;
            while i + tuple_size < len {
                sink.add_tuple(&read.edges()[i..i + tuple_size], rid);
                i += 1;
            }
        }
    }

    /// Assert coverage consistency and adjacency symmetry across the whole
    /// graph: every node/edge's `covg` matches its read set's size, every
    /// edge is listed on both its endpoints' edge lists, and every edge and
    /// the reads that cover it agree on the relationship in both
    /// directions.
    ///
    /// Does not check that every node a read covers has an incident edge
    /// in that read's edge list — that can transiently break mid-mutation
    /// (documented on [`Read::remove_edge`]) — nor node id uniqueness,
    /// which is structurally guaranteed by `BTreeMap`'s key uniqueness.
    pub fn check_invariants(&self) {
        for node in self.nodes.values() {
            node.check_covg_invariant();
            for &eid in &node.edges {
                assert!(
                    self.edges.contains_key(eid),
                    "node {} lists missing edge",
                    node.node_id()
                );
            }
        }
        for (eid, edge) in self.edges.iter() {
            edge.check_covg_invariant();
            assert!(
                self.nodes.get(&edge.from()).map(|n| n.edges.contains(&eid)).unwrap_or(false),
                "edge not listed on its from-node"
            );
            assert!(
                self.nodes.get(&edge.to()).map(|n| n.edges.contains(&eid)).unwrap_or(false),
                "edge not listed on its to-node"
            );
            for rid in edge.reads() {
                assert!(
                    self.reads.get(rid).map(|r| r.edges().contains(&eid)).unwrap_or(false),
                    "edge's read does not list it back"
                );
            }
        }
        for read in self.reads.values() {
            for &eid in read.edges() {
                assert!(
                    self.edges.get(eid).map(|e| e.reads().contains(&read.read_id())).unwrap_or(false),
                    "read's edge does not list it back"
                );
            }
        }
    }

    pub fn write_graph(&self, path: impl AsRef<Path>) -> Result<(), EmitError> {
        crate::emit::write_graph(self, path.as_ref())
    }

    pub fn save_matrix(&self, path: impl AsRef<Path>) -> Result<(), EmitError> {
        crate::emit::save_matrix(self, path.as_ref())
    }
}

impl PartialEq for PanGraph {
    /// Structural equality: same node ids, and the same edge set modulo
    /// reversal. Since edges are canonicalized at construction, comparing
    /// canonical field triples is sufficient — no per-pair reversal check
    /// is needed.
    fn eq(&self, other: &Self) -> bool {
        if self.nodes.len() != other.nodes.len() || self.edges.len() != other.edges.len() {
            return false;
        }
        if self.nodes.keys().any(|k| !other.nodes.contains_key(k)) {
            return false;
        }
        let other_set: FxHashSet<(NodeId, NodeId, Orientation)> = other
            .edges
            .values()
            .map(|e| (e.from(), e.to(), e.orientation()))
            .collect();
        self.edges
            .values()
            .all(|e| other_set.contains(&(e.from(), e.to(), e.orientation())))
    }
}

impl Eq for PanGraph {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;

    fn o(code: u32) -> Orientation {
        Orientation::new(code)
    }

    fn hit(prg_id: u32, read_id: u32, knode: u32) -> MinimizerHit {
        MinimizerHit {
            prg_id,
            read_id,
            knode_id: crate::kmer::KmerNodeId(knode),
            strand: crate::kmer::Strand::Forward,
        }
    }

    #[test]
    fn linear_read_builds_two_nodes_one_edge() {
        let mut g = PanGraph::new();
        g.add_node(1, "locus1", ReadId(0), vec![hit(1, 0, 0)]);
        g.add_node(2, "locus2", ReadId(0), vec![hit(2, 0, 0)]);
        let e = g.add_edge_for_read(NodeId(1), NodeId(2), o(3), ReadId(0));

        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.node(NodeId(1)).unwrap().covg(), 1);
        assert_eq!(g.edge(e).unwrap().covg(), 1);
        g.check_invariants();
    }

    #[test]
    fn coverage_merges_across_identical_reads() {
        let mut g = PanGraph::new();
        for r in 0..5u32 {
            g.add_node(1, "locus1", ReadId(r), vec![hit(1, r, 0)]);
            g.add_node(2, "locus2", ReadId(r), vec![hit(2, r, 0)]);
            g.add_edge_for_read(NodeId(1), NodeId(2), o(3), ReadId(r));
        }
        assert_eq!(g.node(NodeId(1)).unwrap().covg(), 5);
        assert_eq!(g.node(NodeId(2)).unwrap().covg(), 5);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.edges().next().unwrap().covg(), 5);
        g.check_invariants();
    }

    #[test]
    fn shortcut_collapses_two_edges_into_one() {
        let mut g = PanGraph::new();
        g.add_node(1, "a", ReadId(0), vec![]);
        g.add_node(2, "b", ReadId(0), vec![]);
        g.add_node(3, "c", ReadId(0), vec![]);
        g.add_edge_for_read(NodeId(1), NodeId(2), o(3), ReadId(0));
        g.add_edge_for_read(NodeId(2), NodeId(3), o(3), ReadId(0));

        assert_eq!(g.num_edges(), 2);
        let next = g.add_shortcut_edge(ReadId(0), 0);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.read(ReadId(0)).unwrap().edges().len(), 1);
        let shortcut = g.find_edge(NodeId(1), NodeId(3), o(3)).expect("shortcut edge");
        assert_eq!(g.edge(shortcut).unwrap().covg(), 1);
        assert_eq!(next, 0);
        g.check_invariants();
    }

    #[test]
    fn remove_low_covg_edges_prunes_singletons() {
        let mut g = PanGraph::new();
        g.add_node(1, "a", ReadId(0), vec![]);
        g.add_node(2, "b", ReadId(0), vec![]);
        g.add_edge_for_read(NodeId(1), NodeId(2), o(3), ReadId(0));
        assert_eq!(g.num_edges(), 1);
        g.remove_low_covg_edges(1);
        assert_eq!(g.num_edges(), 0);
        g.check_invariants();
    }
}
