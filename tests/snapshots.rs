//! Golden-output tests for the two emitted text formats.

use pangraph::{NodeId, Orientation, PanGraph, ReadId};
use std::fs;

fn small_graph() -> PanGraph {
    let mut g = PanGraph::new();
    g.add_node(1, "locus1", ReadId(0), Vec::new());
    g.add_node(2, "locus2", ReadId(0), Vec::new());
    g.add_node(3, "locus3", ReadId(0), Vec::new());
    g.add_edge_for_read(NodeId(1), NodeId(2), Orientation::new(3), ReadId(0));
    g.add_edge_for_read(NodeId(2), NodeId(3), Orientation::new(3), ReadId(0));
    g
}

#[test]
fn write_graph_matches_expected_gfa() {
    let g = small_graph();
    let path = std::env::temp_dir().join("pangraph_snapshot_test.gfa");
    g.write_graph(&path).expect("write_graph");
    let contents = fs::read_to_string(&path).expect("read back gfa");
    fs::remove_file(&path).ok();

    let expected = "H\tVN:Z:1.0\n\
                     S\tlocus1\tN\tFC:i:1\n\
                     S\tlocus2\tN\tFC:i:1\n\
                     S\tlocus3\tN\tFC:i:1\n\
                     L\tlocus1\t+\tlocus2\t+\t0M\tRC:i:1\n\
                     L\tlocus2\t+\tlocus3\t+\t0M\tRC:i:1\n";
    assert_eq!(contents, expected);
}

#[test]
fn save_matrix_matches_expected_layout() {
    let mut g = small_graph();
    use pangraph::KmerNodeId;
    use std::rc::Rc;
    let template = Rc::new(pangraph::KmerGraphTemplate::new(1, 2));
    g.add_node_for_sample(1, "locus1", "sample_a", &template, vec![KmerNodeId(0), KmerNodeId(1)]);

    let path = std::env::temp_dir().join("pangraph_snapshot_test.matrix");
    g.save_matrix(&path).expect("save_matrix");
    let contents = fs::read_to_string(&path).expect("read back matrix");
    fs::remove_file(&path).ok();

    let expected = "\tsample_a\n\
                     locus1\t1\n\
                     locus2\t0\n\
                     locus3\t0\n";
    assert_eq!(contents, expected);
}
