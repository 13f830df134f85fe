//! `pangraph-clean`: build a graph from a hit log, clean it, and emit the
//! sequence graph and presence matrix.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pangraph::{NodeId, Orientation, PanGraph, ReadId};

#[derive(Parser)]
#[command(name = "pangraph-clean")]
#[command(about = "Build, clean and emit a pangenome graph from a hit log")]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a graph from a hit log, clean it, and write both artifacts.
    Run {
        /// Newline-delimited hit log (see `parse_hit_log` for the format).
        #[arg(long)]
        hits: PathBuf,
        /// Estimated average read coverage, fed into `clean`'s thresholds.
        #[arg(long)]
        coverage: u32,
        /// Output path for the GFA-style sequence graph.
        #[arg(long, default_value = "pangraph.gfa")]
        out_graph: PathBuf,
        /// Output path for the sample-by-locus presence matrix.
        #[arg(long, default_value = "pangraph.matrix")]
        out_matrix: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();
    match cli.action {
        Action::Run {
            hits,
            coverage,
            out_graph,
            out_matrix,
        } => run(hits, coverage, out_graph, out_matrix),
    }
}

fn run(hits_path: PathBuf, coverage: u32, out_graph: PathBuf, out_matrix: PathBuf) -> Result<()> {
    tracing::info!(hits = %hits_path.display(), coverage, "loading hit log");
    let text = fs::read_to_string(&hits_path)
        .with_context(|| format!("reading hit log {}", hits_path.display()))?;

    let mut graph = PanGraph::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_record(&mut graph, line).with_context(|| format!("hit log line {}", lineno + 1))?;
    }

    tracing::info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "graph built, cleaning"
    );
    graph.clean(coverage);

    tracing::info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "cleaned, writing artifacts"
    );
    graph
        .write_graph(&out_graph)
        .with_context(|| format!("writing sequence graph {}", out_graph.display()))?;
    graph
        .save_matrix(&out_matrix)
        .with_context(|| format!("writing presence matrix {}", out_matrix.display()))?;

    Ok(())
}

/// Parse one hit-log record. Two kinds, tab-separated:
///
/// - `N <read_id> <prg_id> <prg_name>` — a locus sighting on a read, with no
///   minimizer hits attached (hit clustering happens upstream of this tool).
/// - `E <read_id> <from_prg_id> <to_prg_id> <orientation_code>` — an
///   adjacency observed along a read, threaded onto it in file order.
fn parse_record(graph: &mut PanGraph, line: &str) -> Result<()> {
    let fields: Vec<&str> = line.split('\t').collect();
    match fields.as_slice() {
        ["N", read_id, prg_id, prg_name] => {
            let read_id = ReadId(read_id.parse().context("read_id")?);
            let prg_id: u32 = prg_id.parse().context("prg_id")?;
            graph.add_node(prg_id, prg_name, read_id, Vec::new());
            Ok(())
        }
        ["E", read_id, from, to, orientation] => {
            let read_id = ReadId(read_id.parse().context("read_id")?);
            let from = NodeId(from.parse().context("from prg_id")?);
            let to = NodeId(to.parse().context("to prg_id")?);
            let orientation: u32 = orientation.parse().context("orientation code")?;
            if orientation >= 4 {
                bail!("orientation code {orientation} out of range, expected 0..4");
            }
            let orientation = Orientation::new(orientation);
            graph.add_edge_for_read(from, to, orientation, read_id);
            Ok(())
        }
        _ => bail!("malformed hit log record: {line:?}"),
    }
}
