//! A pangenome graph engine.
//!
//! Builds a graph of pan-nodes (locus instances) and pan-edges (oriented
//! adjacencies) from per-read minimizer hits, threads reads through it,
//! cleans it against read coverage, and emits a GFA-style sequence graph and
//! a sample-by-locus presence matrix.
#![warn(missing_docs)]

pub mod edge;
pub mod emit;
pub mod error;
pub mod graph;
pub mod ids;
pub mod kmer;
pub mod node;
#[cfg(feature = "petgraph")]
pub mod petgraph;
pub mod orientation;
pub mod read;
pub mod sample;

pub use edge::PanEdge;
pub use error::EmitError;
pub use graph::{PanGraph, TupleSink};
pub use ids::{EdgeId, NodeId, PrgId, ReadId};
pub use kmer::{KmerGraphTemplate, KmerNodeId, KmerPath, MinimizerHit, NodeKmerCoverage, Strand};
pub use node::PanNode;
pub use orientation::{combine_orientations, Orientation};
pub use read::Read;
pub use sample::Sample;
