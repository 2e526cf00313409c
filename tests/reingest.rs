// tests/reingest.rs

use std::cell::RefCell;
use std::rc::Rc;

use spelltree::config::ConfigFile;
use spelltree::engine::{ParseReport, TreeParser};
use spelltree::input::RawTreeDocument;
use spelltree::tree::{SeededRandom, SpellGraph};
use spelltree_test_utils::builders::{NodeBuilder, SchoolBuilder, TreeBuilder, spell};
use spelltree_test_utils::{assert_tree_invariants, init_tracing};

fn broken_tree() -> RawTreeDocument {
    TreeBuilder::new()
        .with_school(
            "Destruction",
            SchoolBuilder::new("R")
                .node(spell("R", 0, &[]))
                .node(spell("A", 1, &["R"]))
                .node(spell("B", 1, &["C"]))
                .node(spell("C", 1, &["B"]))
                .node(spell("D", 2, &["A", "ghost"])),
        )
        .with_school(
            "Restoration",
            SchoolBuilder::new("H")
                .node(NodeBuilder::new("H"))
                .node(spell("H1", 1, &["H"]))
                .node(spell("H2", 2, &["H1"]))
                .node(spell("H3", 3, &["H2"])),
        )
        .build()
}

#[test]
fn reparse_without_injection_is_idempotent() {
    init_tracing();
    let mut parser = TreeParser::new(broken_tree(), ConfigFile::default());

    let first = parser.reparse(false);
    let second = parser.reparse(false);

    assert_eq!(first.graph.fingerprint(), second.graph.fingerprint());
    assert_eq!(first.report, second.report);
    assert!(first.report.total_fixes() > 0);
    assert_tree_invariants(&second.graph);
}

#[test]
fn reparse_never_touches_the_stored_source() {
    let source = broken_tree();
    let mut config = ConfigFile::default();
    config.injection.chance = 100;
    let mut parser = TreeParser::new(source.clone(), config)
        .with_random_source(Box::new(SeededRandom::from_seed(3)));

    parser.reparse(true);
    parser.reparse(true);

    assert_eq!(parser.source(), &source);
}

#[test]
fn injection_does_not_accumulate_across_cycles() {
    let mut config = ConfigFile::default();
    config.injection.chance = 100;
    config.injection.seed = Some(11);

    let mut plain = TreeParser::new(broken_tree(), config.clone());
    let baseline = plain.reparse(false);

    let mut parser = TreeParser::new(broken_tree(), config);
    let injected_once = parser.reparse(true);
    let injected_twice = parser.reparse(true);
    let plain_again = parser.reparse(false);

    assert!(injected_once.report.total_injected() > 0);
    let edges = |g: &SpellGraph| g.edges().len();
    assert_eq!(
        edges(&injected_once.graph) - injected_once.report.total_injected(),
        edges(&baseline.graph)
    );
    assert_eq!(
        edges(&injected_twice.graph) - injected_twice.report.total_injected(),
        edges(&baseline.graph)
    );
    assert_eq!(plain_again.graph.fingerprint(), baseline.graph.fingerprint());
}

#[test]
fn seeded_parsers_agree() {
    let mut config = ConfigFile::default();
    config.injection.enabled = true;
    config.injection.chance = 100;
    config.injection.seed = Some(99);

    let a = TreeParser::new(broken_tree(), config.clone()).parse();
    let b = TreeParser::new(broken_tree(), config).parse();

    assert_eq!(a.graph.fingerprint(), b.graph.fingerprint());
}

#[test]
fn observers_see_every_cycle() {
    let seen: Rc<RefCell<Vec<(usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut parser = TreeParser::new(broken_tree(), ConfigFile::default());
    parser.add_observer(Box::new(move |graph: &SpellGraph, report: &ParseReport| {
        sink.borrow_mut().push((graph.len(), report.schools.len()));
    }));

    parser.reparse(false);
    parser.reparse(false);

    assert_eq!(*seen.borrow(), vec![(9, 2), (9, 2)]);
}
