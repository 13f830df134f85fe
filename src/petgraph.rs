//! Implementation of the [`petgraph`] graph-traversal traits over
//! [`PanGraph`], enabled by the `petgraph` feature.
//!
//! Edges carry a stable [`EdgeId`] issued by the `SlotMap` arena, so
//! `PanEdgeRef` just borrows straight from it — no positional-index
//! reconstruction needed.

use petgraph::visit::{Data, EdgeRef as _, GraphBase, GraphRef, IntoEdgeReferences, IntoEdges, IntoNeighbors};

use crate::edge::PanEdge;
use crate::graph::PanGraph;
use crate::ids::{EdgeId, NodeId};
use crate::node::PanNode;

/// A reference to one edge of a [`PanGraph`].
#[derive(Debug, Clone, Copy)]
pub struct PanEdgeRef<'a> {
    id: EdgeId,
    edge: &'a PanEdge,
}

impl<'a> petgraph::visit::EdgeRef for PanEdgeRef<'a> {
    type NodeId = NodeId;
    type EdgeId = EdgeId;
    type Weight = PanEdge;

    fn source(&self) -> NodeId {
        self.edge.from()
    }

    fn target(&self) -> NodeId {
        self.edge.to()
    }

    fn weight(&self) -> &PanEdge {
        self.edge
    }

    fn id(&self) -> EdgeId {
        self.id
    }
}

impl<'a> GraphBase for &'a PanGraph {
    type NodeId = NodeId;
    type EdgeId = EdgeId;
}

impl<'a> GraphRef for &'a PanGraph {}

impl<'a> Data for &'a PanGraph {
    type NodeWeight = PanNode;
    type EdgeWeight = PanEdge;
}

impl<'a> IntoNeighbors for &'a PanGraph {
    type Neighbors = Box<dyn Iterator<Item = NodeId> + 'a>;

    /// Neighbors across every incident edge, in either direction: the
    /// container is undirected.
    fn neighbors(self, n: NodeId) -> Self::Neighbors {
        let edges: &[EdgeId] = match self.node(n) {
            Some(node) => node.edges(),
            None => return Box::new(std::iter::empty()),
        };
        Box::new(edges.iter().filter_map(move |&eid| {
            self.edge(eid)
                .map(|e| if e.from() == n { e.to() } else { e.from() })
        }))
    }
}

impl<'a> IntoEdgeReferences for &'a PanGraph {
    type EdgeRef = PanEdgeRef<'a>;
    type EdgeReferences = Box<dyn Iterator<Item = PanEdgeRef<'a>> + 'a>;

    fn edge_references(self) -> Self::EdgeReferences {
        Box::new(self.edges.iter().map(|(id, edge)| PanEdgeRef { id, edge }))
    }
}

impl<'a> IntoEdges for &'a PanGraph {
    type Edges = Box<dyn Iterator<Item = PanEdgeRef<'a>> + 'a>;

    fn edges(self, n: NodeId) -> Self::Edges {
        let edges: &[EdgeId] = match self.node(n) {
            Some(node) => node.edges(),
            None => return Box::new(std::iter::empty()),
        };
        Box::new(
            edges
                .iter()
                .filter_map(move |&eid| self.edge(eid).map(|edge| PanEdgeRef { id: eid, edge })),
        )
    }
}
