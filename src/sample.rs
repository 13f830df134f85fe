//! A biological sample and the k-mer-path traversals it contributes.

use std::collections::HashMap;

use crate::ids::NodeId;
use crate::kmer::KmerPath;

/// A biological sample.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(crate) name: String,
    /// Traversals of each covered node's k-mer sub-graph.
    pub(crate) paths: HashMap<NodeId, Vec<KmerPath>>,
}

impl Sample {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn add_path(&mut self, node_id: NodeId, path: KmerPath) {
        self.paths.entry(node_id).or_default().push(path);
    }

    /// Number of path traversals recorded for `node_id`, or `None` if this
    /// sample never covered it (the presence matrix prints absent loci as
    /// `0`).
    pub fn path_count(&self, node_id: NodeId) -> Option<usize> {
        self.paths.get(&node_id).map(Vec::len)
    }
}
