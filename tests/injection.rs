// tests/injection.rs

mod common;

use common::{ingest, prereqs};
use spelltree::config::ConfigFile;
use spelltree::engine::run_pipeline;
use spelltree::input::RawTreeDocument;
use spelltree::tree::depth::assign_depths;
use spelltree::tree::inject::{has_path_to_root, inject_prerequisites};
use spelltree::tree::verify::is_acyclic;
use spelltree::tree::{InjectionOptions, SeededRandom, SpellGraph};
use spelltree_test_utils::builders::{NodeBuilder, SchoolBuilder, TreeBuilder, spell};
use spelltree_test_utils::scripted_random::ScriptedRandom;
use spelltree_test_utils::{assert_tree_invariants, init_tracing};

/// R -> {A, B}; A -> C -> E; B -> D -> F.
fn two_chains() -> RawTreeDocument {
    TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 1, &["R"]))
                .node(spell("C", 2, &["A"]))
                .node(spell("D", 2, &["B"]))
                .node(spell("E", 3, &["C"]))
                .node(spell("F", 3, &["D"])),
        )
        .build()
}

fn depth_assigned(doc: &RawTreeDocument) -> SpellGraph {
    let mut graph = ingest(doc);
    assign_depths(&mut graph, "S");
    graph
}

fn always() -> InjectionOptions {
    InjectionOptions {
        chance: 100,
        ..InjectionOptions::default()
    }
}

#[test]
fn injection_prefers_parents_one_level_up() {
    init_tracing();
    let mut graph = depth_assigned(&two_chains());
    let mut rng = ScriptedRandom::new();

    let injected = inject_prerequisites(&mut graph, "S", &always(), &mut rng);

    assert_eq!(injected, 4);
    assert_eq!(prereqs(&graph, "C"), vec!["A", "B"]);
    assert_eq!(prereqs(&graph, "D"), vec!["B", "A"]);
    assert_eq!(prereqs(&graph, "E"), vec!["C", "D"]);
    assert_eq!(prereqs(&graph, "F"), vec!["D", "C"]);
    // Shallow nodes are never touched.
    assert_eq!(prereqs(&graph, "A"), vec!["R"]);
    assert_eq!(prereqs(&graph, "B"), vec!["R"]);
    assert!(graph.has_edge("B", "C"));
    assert_tree_invariants(&graph);
}

#[test]
fn without_same_tier_preference_any_shallower_node_qualifies() {
    let mut graph = depth_assigned(&two_chains());
    let opts = InjectionOptions {
        prefer_same_tier: false,
        ..always()
    };
    let mut rng = ScriptedRandom::new().with_picks(&[0, 1]);

    inject_prerequisites(&mut graph, "S", &opts, &mut rng);

    // C's pool is [R, B] in school order; D's is [R, A].
    assert_eq!(prereqs(&graph, "C"), vec!["A", "R"]);
    assert_eq!(prereqs(&graph, "D"), vec!["B", "A"]);
    assert_tree_invariants(&graph);
}

#[test]
fn zero_chance_never_injects() {
    let mut graph = depth_assigned(&two_chains());
    let before = graph.fingerprint();
    let opts = InjectionOptions {
        chance: 0,
        ..InjectionOptions::default()
    };

    let injected = inject_prerequisites(&mut graph, "S", &opts, &mut ScriptedRandom::new());

    assert_eq!(injected, 0);
    assert_eq!(graph.fingerprint(), before);
}

#[test]
fn failed_rolls_skip_nodes() {
    let mut graph = depth_assigned(&two_chains());
    let opts = InjectionOptions {
        chance: 50,
        ..InjectionOptions::default()
    };
    // C passes, D fails, E fails, F passes.
    let mut rng = ScriptedRandom::new().with_rolls(&[10, 50, 99, 49]);

    let injected = inject_prerequisites(&mut graph, "S", &opts, &mut rng);

    assert_eq!(injected, 2);
    assert_eq!(prereqs(&graph, "C"), vec!["A", "B"]);
    assert_eq!(prereqs(&graph, "D"), vec!["B"]);
    assert_eq!(prereqs(&graph, "E"), vec!["C"]);
    assert_eq!(prereqs(&graph, "F"), vec!["D", "C"]);
}

#[test]
fn prerequisite_cap_is_respected() {
    let mut graph = depth_assigned(&two_chains());
    let opts = InjectionOptions {
        max_prerequisites: 1,
        ..always()
    };

    let injected = inject_prerequisites(&mut graph, "S", &opts, &mut ScriptedRandom::new());

    assert_eq!(injected, 0);
    for node in graph.nodes() {
        assert!(node.prerequisites.len() <= 1, "{} grew to {:?}", node.id, node.prerequisites);
    }
}

#[test]
fn min_depth_limits_eligible_nodes() {
    let mut graph = depth_assigned(&two_chains());
    let opts = InjectionOptions {
        min_depth: 3,
        ..always()
    };

    let injected = inject_prerequisites(&mut graph, "S", &opts, &mut ScriptedRandom::new());

    assert_eq!(injected, 2);
    assert_eq!(prereqs(&graph, "C"), vec!["A"]);
    assert_eq!(prereqs(&graph, "D"), vec!["B"]);
    assert_eq!(prereqs(&graph, "E"), vec!["C", "D"]);
    assert_eq!(prereqs(&graph, "F"), vec!["D", "C"]);
}

#[test]
fn unknown_school_injects_nothing() {
    let mut graph = depth_assigned(&two_chains());
    assert_eq!(inject_prerequisites(&mut graph, "Nope", &always(), &mut ScriptedRandom::new()), 0);
}

#[test]
fn path_to_root_follows_first_prerequisites() {
    let doc = TreeBuilder::new()
        .with_school(
            "S",
            SchoolBuilder::new("R")
                .node(NodeBuilder::new("R"))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 2, &["A", "ghost"]))
                .node(spell("G", 2, &["ghost", "A"]))
                .node(spell("P", 1, &["Q"]))
                .node(spell("Q", 1, &["P"])),
        )
        .build();
    let graph = ingest(&doc);

    assert!(has_path_to_root(&graph, "R", "R"));
    assert!(has_path_to_root(&graph, "B", "R"));
    assert!(!has_path_to_root(&graph, "G", "R"));
    assert!(!has_path_to_root(&graph, "P", "R"));
    assert!(!has_path_to_root(&graph, "missing", "R"));
}

#[test]
fn same_seed_gives_same_tree() {
    let doc = two_chains();
    let mut config = ConfigFile::default();
    config.injection.chance = 60;

    let first = run_pipeline(&doc, &config, &mut SeededRandom::from_seed(42), true);
    let second = run_pipeline(&doc, &config, &mut SeededRandom::from_seed(42), true);

    assert_eq!(first.graph.fingerprint(), second.graph.fingerprint());
    assert_eq!(first.report, second.report);
}

#[test]
fn injection_never_breaks_invariants_across_seeds() {
    let doc = two_chains();
    let mut config = ConfigFile::default();
    config.injection.chance = 100;
    config.injection.max_prerequisites = 4;
    config.injection.min_depth = 1;
    config.injection.prefer_same_tier = false;

    for seed in 0..32 {
        let parsed = run_pipeline(&doc, &config, &mut SeededRandom::from_seed(seed), true);
        assert!(is_acyclic(&parsed.graph), "seed {seed} produced a cycle");
        assert_tree_invariants(&parsed.graph);
    }
}
