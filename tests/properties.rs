//! Randomized mutation-trace property tests.
//!
//! A trace is a short sequence of graph-building and cleaning operations
//! over a small, fixed universe of node ids; invariants are re-checked
//! after every step, the way a fuzzer would catch a one-off bookkeeping
//! bug that a handful of hand-written scenarios might miss.

use pangraph::{NodeId, Orientation, PanGraph, ReadId};
use proptest::prelude::*;

const NODE_UNIVERSE: u32 = 6;

#[derive(Debug, Clone)]
enum Op {
    AddNode { prg_id: u32, read_id: u32 },
    AddEdge { from: u32, to: u32, orientation: u32, read_id: u32 },
    ReadClean { thresh: u32 },
    SplitNodesByReads { node_thresh: u32, edge_thresh: u32 },
    RemoveLowCovgEdges { thresh: u32 },
    RemoveLowCovgNodes { thresh: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NODE_UNIVERSE, 0..4u32).prop_map(|(prg_id, read_id)| Op::AddNode { prg_id, read_id }),
        (0..NODE_UNIVERSE, 0..NODE_UNIVERSE, 0..4u32, 0..4u32).prop_map(
            |(from, to, orientation, read_id)| Op::AddEdge { from, to, orientation, read_id }
        ),
        (0..3u32).prop_map(|thresh| Op::ReadClean { thresh }),
        (0..3u32, 0..3u32)
            .prop_map(|(node_thresh, edge_thresh)| Op::SplitNodesByReads { node_thresh, edge_thresh }),
        (0..3u32).prop_map(|thresh| Op::RemoveLowCovgEdges { thresh }),
        (0..3u32).prop_map(|thresh| Op::RemoveLowCovgNodes { thresh }),
    ]
}

/// Apply one op to `g`, skipping it if its precondition (both endpoints
/// already exist, for `AddEdge`) is not met by this trace so far.
fn apply(g: &mut PanGraph, op: &Op) {
    match *op {
        Op::AddNode { prg_id, read_id } => {
            g.add_node(prg_id, &format!("locus{prg_id}"), ReadId(read_id), Vec::new());
        }
        Op::AddEdge { from, to, orientation, read_id } => {
            if g.node(NodeId(from)).is_some() && g.node(NodeId(to)).is_some() {
                g.add_edge_for_read(NodeId(from), NodeId(to), Orientation::new(orientation), ReadId(read_id));
            }
        }
        Op::ReadClean { thresh } => g.read_clean(thresh),
        Op::SplitNodesByReads { node_thresh, edge_thresh } => g.split_nodes_by_reads(node_thresh, edge_thresh),
        Op::RemoveLowCovgEdges { thresh } => g.remove_low_covg_edges(thresh),
        Op::RemoveLowCovgNodes { thresh } => g.remove_low_covg_nodes(thresh),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_step(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut g = PanGraph::new();
        for op in &ops {
            apply(&mut g, op);
            g.check_invariants();
        }
    }

    #[test]
    fn node_ids_are_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        // graph.nodes keys form a set equal to the node_ids held by its values.
        let mut g = PanGraph::new();
        for op in &ops {
            apply(&mut g, op);
        }
        for node in g.nodes() {
            prop_assert_eq!(g.node(node.node_id()).map(|n| n.node_id()), Some(node.node_id()));
        }
    }
}

#[test]
fn repeated_add_edge_same_orientation_merges_covg() {
    let mut g = PanGraph::new();
    g.add_node(1, "a", ReadId(0), Vec::new());
    g.add_node(2, "b", ReadId(0), Vec::new());
    let e1 = g.add_edge(NodeId(1), NodeId(2), Orientation::new(3));
    let e2 = g.add_edge(NodeId(1), NodeId(2), Orientation::new(3));
    assert_eq!(e1, e2);
    assert_eq!(g.edge(e1).unwrap().covg(), 2);
}

#[test]
fn clean_twice_leaves_counts_unchanged() {
    let mut g = PanGraph::new();
    for r in 0..4u32 {
        g.add_node(1, "a", ReadId(r), Vec::new());
        g.add_node(2, "b", ReadId(r), Vec::new());
        g.add_edge_for_read(NodeId(1), NodeId(2), Orientation::new(3), ReadId(r));
    }
    g.clean(4);
    let (n, e) = (g.num_nodes(), g.num_edges());
    g.clean(4);
    assert_eq!((g.num_nodes(), g.num_edges()), (n, e));
}
