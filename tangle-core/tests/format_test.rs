//! Integration tests for the canonical text formats, DOT export and the
//! multi-graph summary.

use std::collections::BTreeSet;

use tangle_core::graph::{Mark, PagGraph};
use tangle_core::io::{
    path_to_string, read_skeleton_format, read_text_format, write_dot_format,
    write_skeleton_format, write_text_format,
};
use tangle_core::sepsets::SepSetRegistry;
use tangle_core::summary::{LinkCombo, PagSummary};

fn write_to_string(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut buffer = Vec::new();
    f(&mut buffer);
    String::from_utf8(buffer).unwrap()
}

// =============================================================================
// #names / #links format
// =============================================================================
#[test]
fn text_format_layout_is_stable() {
    let graph = PagGraph::new(["A", "B"], true).unwrap();
    let text = write_to_string(|out| write_text_format(&graph, out).unwrap());
    assert_eq!(text, "#names\n0\tA\n1\tB\n#links\nA\to-o\tB\n");
}

#[test]
fn text_format_round_trips_marks() {
    let mut graph = PagGraph::new(["north", "south", "east", "west"], false).unwrap();
    graph.add_link(0, 1);
    graph.add_link(1, 2);
    graph.add_link(2, 3);
    graph.put_arrow(0, 1, true).unwrap();
    graph.put_arrow(2, 1, true).unwrap();
    graph.set_end_symbol(3, 2, Mark::Line).unwrap();

    let text = write_to_string(|out| write_text_format(&graph, out).unwrap());
    let reloaded = read_text_format(&text).unwrap();

    assert_eq!(reloaded.var_names(), graph.var_names());
    assert_eq!(reloaded.list_all_links(), graph.list_all_links());
    for (x, y) in graph.list_all_links() {
        assert_eq!(
            reloaded.link_representation(x, y),
            graph.link_representation(x, y)
        );
    }
}

#[test]
fn text_format_rejects_garbage() {
    assert!(read_text_format("#nope\n").is_err());
    assert!(read_text_format("#names\n0\tA\n").is_err());
    assert!(read_text_format("#names\n0\tA\n1\tB\n#links\nA\tqqq\tB\n").is_err());
    assert!(read_text_format("#names\n0\tA\n#links\nA\to-o\tZ\n").is_err());
}

// =============================================================================
// Skeleton + separating sets format
// =============================================================================
#[test]
fn skeleton_format_round_trips_links_and_sep_sets() {
    let mut graph = PagGraph::new(["A", "B", "C"], false).unwrap();
    graph.add_link(0, 1);
    graph.add_link(1, 2);
    let mut sep_sets = SepSetRegistry::new();
    sep_sets.record(0, 2, BTreeSet::from([1]));
    sep_sets.record(2, 0, BTreeSet::from([1]));

    let text =
        write_to_string(|out| write_skeleton_format(&graph, &sep_sets, out).unwrap());
    let (reloaded, reloaded_sets) = read_skeleton_format(&text).unwrap();

    assert_eq!(reloaded.list_all_links(), graph.list_all_links());
    assert_eq!(reloaded_sets.get(0, 2), sep_sets.get(0, 2));
    assert_eq!(reloaded_sets.get(2, 0), sep_sets.get(2, 0));
}

#[test]
fn skeleton_format_defaults_unrecorded_pairs_to_the_empty_set() {
    let mut graph = PagGraph::new(["A", "B", "C"], false).unwrap();
    graph.add_link(0, 1);
    let sep_sets = SepSetRegistry::new();

    let text =
        write_to_string(|out| write_skeleton_format(&graph, &sep_sets, out).unwrap());
    let (_, reloaded_sets) = read_skeleton_format(&text).unwrap();

    assert_eq!(reloaded_sets.get(0, 2), &[BTreeSet::new()]);
    assert_eq!(reloaded_sets.get(1, 2), &[BTreeSet::new()]);
}

// =============================================================================
// DOT export and path rendering
// =============================================================================
#[test]
fn dot_export_classifies_links() {
    let mut graph = PagGraph::new(["A", "B", "C"], true).unwrap();
    graph.put_arrow(0, 1, true).unwrap();
    graph.put_arrow(1, 2, true).unwrap();
    graph.put_arrow(2, 1, true).unwrap();

    let dot = write_to_string(|out| write_dot_format(&graph, out).unwrap());
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("subgraph directed"));
    assert!(dot.contains("A -> B;"));
    // B <-> C lands in the bidirected subgraph.
    assert!(dot.contains("subgraph bidirected"));
    assert!(dot.contains("B -> C;"));
    // A o-o C stays undirected.
    assert!(dot.contains("A -> C;"));
}

#[test]
fn paths_render_with_link_tokens() {
    let mut graph = PagGraph::new(["A", "B", "C"], false).unwrap();
    graph.add_link(0, 1);
    graph.add_link(1, 2);
    graph.put_arrow(0, 1, true).unwrap();
    assert_eq!(path_to_string(&graph, &[0, 1, 2]), "A --> B o-o C");
    assert_eq!(path_to_string(&graph, &[]), "");
}

// =============================================================================
// Summary aggregation
// =============================================================================
#[test]
fn summary_counts_links_and_mark_combinations() {
    let names = ["A", "B", "C"];
    let mut directed = PagGraph::new(names, false).unwrap();
    directed.add_link(0, 1);
    directed.put_arrow(0, 1, true).unwrap();

    let mut undirected = PagGraph::new(names, false).unwrap();
    undirected.add_link(0, 1);
    undirected.add_link(1, 2);

    let mut summary = PagSummary::new(names);
    summary.add_graph(&directed).unwrap();
    summary.add_graph(&undirected).unwrap();

    assert_eq!(summary.num_graphs(), 2);
    assert_eq!(summary.link_count(0, 1), 2);
    assert_eq!(summary.link_frequency(0, 1), 1.0);
    assert_eq!(summary.link_frequency(1, 2), 0.5);
    assert_eq!(summary.combo_count(0, 1, LinkCombo::LineArrow), 1);
    assert_eq!(summary.combo_count(0, 1, LinkCombo::CircleCircle), 1);
    assert_eq!(summary.combo_count(0, 2, LinkCombo::CircleCircle), 0);
    assert_eq!(summary.list_all_links(), vec![(0, 1), (1, 2)]);
}

#[test]
fn summary_rejects_mismatched_variable_sets() {
    let mut summary = PagSummary::new(["A", "B"]);
    let other = PagGraph::new(["A", "C"], false).unwrap();
    assert!(summary.add_graph(&other).is_err());
}

#[test]
fn summary_serializes_to_json() {
    let names = ["A", "B"];
    let mut graph = PagGraph::new(names, true).unwrap();
    graph.put_arrow(0, 1, true).unwrap();
    let mut summary = PagSummary::new(names);
    summary.add_graph(&graph).unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    let reloaded: PagSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded.num_graphs(), 1);
    assert_eq!(reloaded.combo_count(0, 1, LinkCombo::LineArrow), 1);
}
