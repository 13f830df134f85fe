//! A single locus instance within the pangenome graph.

use fxhash::FxHashSet;
use std::rc::Rc;

use crate::ids::{EdgeId, NodeId, ReadId};
use crate::kmer::{KmerGraphTemplate, KmerPath, NodeKmerCoverage};

/// One instance of a locus within the graph.
#[derive(Debug, Clone)]
pub struct PanNode {
    /// The source locus this node was instantiated from. Never changes,
    /// even across a split.
    pub(crate) prg_id: u32,
    /// Unique within the graph. Equal to `prg_id` until this node is the
    /// product of a node split.
    pub(crate) node_id: NodeId,
    pub(crate) name: String,
    pub(crate) covg: u32,
    pub(crate) reads: FxHashSet<ReadId>,
    pub(crate) samples: FxHashSet<String>,
    /// Incident edges, both incoming and outgoing (undirected container).
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) kmer: Option<NodeKmerCoverage>,
    pub(crate) paths: Vec<KmerPath>,
}

impl PanNode {
    pub(crate) fn new(prg_id: u32, node_id: NodeId, name: impl Into<String>) -> Self {
        Self {
            prg_id,
            node_id,
            name: name.into(),
            covg: 0,
            reads: FxHashSet::default(),
            samples: FxHashSet::default(),
            edges: Vec::new(),
            kmer: None,
            paths: Vec::new(),
        }
    }

    /// Clone this node's identity-independent fields for a split: same
    /// `prg_id` and `name`, a fresh `node_id`, zero coverage, no edges, no
    /// reads/samples/paths yet, and a fresh coverage vector over the same
    /// shared k-mer template.
    pub(crate) fn split_clone(&self, new_id: NodeId) -> Self {
        let mut clone = Self::new(self.prg_id, new_id, self.name.clone());
        clone.kmer = self
            .kmer
            .as_ref()
            .map(|k| NodeKmerCoverage::new(Rc::clone(k.template())));
        clone
    }

    pub fn prg_id(&self) -> u32 {
        self.prg_id
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn covg(&self) -> u32 {
        self.covg
    }

    pub fn reads(&self) -> &FxHashSet<ReadId> {
        &self.reads
    }

    pub fn samples(&self) -> &FxHashSet<String> {
        &self.samples
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn kmer_coverage(&self) -> Option<&NodeKmerCoverage> {
        self.kmer.as_ref()
    }

    pub fn paths(&self) -> &[KmerPath] {
        &self.paths
    }

    /// Attach the shared k-mer sub-graph template on first sight of this
    /// locus.
    pub(crate) fn ensure_kmer_template(&mut self, template: &Rc<KmerGraphTemplate>) {
        if self.kmer.is_none() {
            self.kmer = Some(NodeKmerCoverage::new(Rc::clone(template)));
        }
    }

    pub(crate) fn add_path(&mut self, path: KmerPath) {
        self.paths.push(path);
    }

    /// `covg` must always equal the number of reads covering this node.
    pub(crate) fn check_covg_invariant(&self) {
        assert_eq!(
            self.covg as usize,
            self.reads.len(),
            "node {} covg {} != reads.len() {}",
            self.node_id,
            self.covg,
            self.reads.len()
        );
    }
}
