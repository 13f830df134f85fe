//! Text emitters: the GFA-style sequence graph and the per-sample presence
//! matrix.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::error::EmitError;
use crate::graph::PanGraph;

fn wrap_io<T>(what: &'static str, path: &Path, result: io::Result<T>) -> Result<T, EmitError> {
    result.map_err(|source| EmitError::Io {
        what,
        path: path.display().to_string(),
        source,
    })
}

/// Write the sequence graph: one header line, one `S` line per node and one
/// `L` line per edge, in insertion order.
pub(crate) fn write_graph(graph: &PanGraph, path: &Path) -> Result<(), EmitError> {
    let file = wrap_io("sequence graph", path, File::create(path))?;
    let mut w = BufWriter::new(file);

    let body = || -> io::Result<()> {
        writeln!(w, "H\tVN:Z:1.0")?;
        for node in graph.nodes.values() {
            writeln!(w, "S\t{}\tN\tFC:i:{}", node.name(), node.covg())?;
        }
        for &eid in &graph.edge_order {
            let e = &graph.edges[eid];
            let from = &graph.nodes[&e.from()];
            let to = &graph.nodes[&e.to()];
            writeln!(
                w,
                "L\t{}\t{}\t{}\t{}\t0M\tRC:i:{}",
                from.name(),
                e.orientation().from_sign(),
                to.name(),
                e.orientation().to_sign(),
                e.covg(),
            )?;
        }
        Ok(())
    };
    wrap_io("sequence graph", path, body())
}

/// Write the sample-by-node presence matrix: a header row of sample names
/// followed by one row per node, each cell the number of k-mer path
/// traversals that sample recorded for that node (`0` if absent).
pub(crate) fn save_matrix(graph: &PanGraph, path: &Path) -> Result<(), EmitError> {
    let file = wrap_io("presence matrix", path, File::create(path))?;
    let mut w = BufWriter::new(file);

    let body = || -> io::Result<()> {
        writeln!(w, "\t{}", graph.samples.values().map(|s| s.name()).join("\t"))?;
        for node in graph.nodes.values() {
            write!(w, "{}", node.name())?;
            for sample in graph.samples.values() {
                let count = sample.path_count(node.node_id()).unwrap_or(0);
                write!(w, "\t{count}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    };
    wrap_io("presence matrix", path, body())
}
