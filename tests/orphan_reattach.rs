// tests/orphan_reattach.rs

mod common;

use common::{children, ingest, prereqs};
use spelltree::tree::depth::{assign_depths, scan_school};
use spelltree_test_utils::builders::{NodeBuilder, SchoolBuilder, TreeBuilder, spell};

fn depth(graph: &spelltree::tree::SpellGraph, id: &str) -> u32 {
    graph.node(id).map(|n| n.depth).unwrap_or(u32::MAX)
}

#[test]
fn bfs_assigns_depth_and_collects_orphans() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 2, &["A"]))
                .node(NodeBuilder::new("lost").tier(2)),
        )
        .build();
    let mut graph = ingest(&doc);

    let scan = scan_school(&mut graph, "S").expect("school exists");

    assert_eq!(depth(&graph, "R"), 0);
    assert_eq!(depth(&graph, "A"), 1);
    assert_eq!(depth(&graph, "B"), 2);
    assert_eq!(scan.orphans, vec!["lost".to_string()]);
    assert_eq!(scan.max_depth, 2);
    assert_eq!(scan.width_by_depth.get(&1), Some(&1));
}

#[test]
fn orphan_prefers_closest_tier_then_fewest_children() {
    // A already has a child, so B (same tier distance, no children) wins.
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 1, &["R"]))
                .node(spell("C", 1, &["A"]))
                .node(NodeBuilder::new("X").tier(2)),
        )
        .build();
    let mut graph = ingest(&doc);

    let reattached = assign_depths(&mut graph, "S");

    assert_eq!(reattached, 1);
    assert_eq!(prereqs(&graph, "X"), vec!["B"]);
    assert_eq!(children(&graph, "B"), vec!["X"]);
    assert!(graph.has_edge("B", "X"));
    assert_eq!(depth(&graph, "X"), 2);

    let school = graph.school("S").expect("school exists");
    assert_eq!(school.max_depth, 2);
    assert_eq!(school.max_width, 2);
}

#[test]
fn orphan_without_tier_match_falls_back_to_root() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(NodeBuilder::new("far").tier(5)),
        )
        .build();
    let mut graph = ingest(&doc);

    assert_eq!(assign_depths(&mut graph, "S"), 1);
    assert_eq!(prereqs(&graph, "far"), vec!["R"]);
    assert_eq!(depth(&graph, "far"), 1);
}

#[test]
fn later_orphans_may_attach_under_earlier_ones() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(NodeBuilder::new("P").tier(1))
                .node(NodeBuilder::new("Q").tier(2)),
        )
        .build();
    let mut graph = ingest(&doc);

    assert_eq!(assign_depths(&mut graph, "S"), 2);
    assert_eq!(prereqs(&graph, "P"), vec!["R"]);
    assert_eq!(prereqs(&graph, "Q"), vec!["P"]);
    assert_eq!(depth(&graph, "Q"), 2);
}

#[test]
fn orphan_never_attaches_under_its_own_descendant() {
    // P and Q form a cycle detached from the root. P is a descendant of Q,
    // so Q falls back to the root instead of adopting P.
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("P", 1, &["Q"]))
                .node(spell("Q", 2, &["P"])),
        )
        .build();
    let mut graph = ingest(&doc);

    assert_eq!(assign_depths(&mut graph, "S"), 2);
    assert_eq!(prereqs(&graph, "P"), vec!["Q", "R"]);
    assert_eq!(prereqs(&graph, "Q"), vec!["P", "R"]);
}

#[test]
fn no_orphans_means_no_changes() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R").node(NodeBuilder::new("R")).node(spell("A", 1, &["R"])),
        )
        .build();
    let mut graph = ingest(&doc);
    let edges_before = graph.edges().len();

    assert_eq!(assign_depths(&mut graph, "S"), 0);
    assert_eq!(graph.edges().len(), edges_before);
}
