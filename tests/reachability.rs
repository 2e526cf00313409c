// tests/reachability.rs

mod common;

use common::ingest;
use spelltree::tree::reachability::{simulate, unlocked_set, unreachable_nodes};
use spelltree_test_utils::builders::{NodeBuilder, SchoolBuilder, TreeBuilder, spell};

#[test]
fn chain_is_fully_unlocked() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 2, &["A"]))
                .node(spell("C", 3, &["B"])),
        )
        .build();
    let graph = ingest(&doc);

    let sim = simulate(&graph, "S");
    assert_eq!(sim.unlocked.len(), 4);
    assert!(!sim.capped);
    assert!(unreachable_nodes(&graph, "S").is_empty());
}

#[test]
fn all_prerequisites_must_be_unlocked() {
    // C needs both A and X; X is stuck in a cycle with Y.
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("X", 1, &["Y"]))
                .node(spell("Y", 1, &["X"]))
                .node(spell("C", 2, &["A", "X"])),
        )
        .build();
    let graph = ingest(&doc);

    let unlocked = unlocked_set(&graph, "S");
    assert!(unlocked.contains("A"));
    assert!(!unlocked.contains("C"));
    assert_eq!(unreachable_nodes(&graph, "S"), vec!["X", "Y", "C"]);
}

#[test]
fn non_root_without_prerequisites_unlocks_immediately() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(NodeBuilder::new("loose").tier(4))
                .node(spell("after_loose", 5, &["loose"])),
        )
        .build();
    let graph = ingest(&doc);

    let unlocked = unlocked_set(&graph, "S");
    assert!(unlocked.contains("loose"));
    assert!(unlocked.contains("after_loose"));
}

#[test]
fn unknown_and_cross_school_prerequisites_never_unlock() {
    let doc = TreeBuilder::new()
        .with_school(
            "Alteration",
            SchoolBuilder::new("R1").node(NodeBuilder::new("R1")).node(spell("A1", 1, &["R1"])),
        )
        .with_school(
            "Destruction",
            SchoolBuilder::new("R2")
                .node(NodeBuilder::new("R2"))
                .node(spell("D1", 1, &["A1"]))
                .node(spell("D2", 1, &["ghost"])),
        )
        .build();
    let graph = ingest(&doc);

    assert_eq!(unreachable_nodes(&graph, "Destruction"), vec!["D1", "D2"]);
    assert!(unreachable_nodes(&graph, "Alteration").is_empty());
}

#[test]
fn simulation_does_not_mutate_and_terminates_on_full_cycle() {
    // Three-node mutual cycle detached from the root.
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["C"]))
                .node(spell("B", 1, &["A"]))
                .node(spell("C", 1, &["B"])),
        )
        .build();
    let graph = ingest(&doc);
    let before = graph.fingerprint();

    let sim = simulate(&graph, "S");
    assert_eq!(sim.unlocked.len(), 1);
    assert!(sim.passes <= graph.school("S").map(|s| s.node_ids.len()).unwrap_or(0) + 10);
    assert_eq!(graph.fingerprint(), before);
}

#[test]
fn unknown_school_yields_empty_set() {
    let doc = TreeBuilder::new()
        .with_school("S", SchoolBuilder::new("R").node(NodeBuilder::new("R")))
        .build();
    let graph = ingest(&doc);

    assert!(unlocked_set(&graph, "Nope").is_empty());
    assert!(unreachable_nodes(&graph, "Nope").is_empty());
}
