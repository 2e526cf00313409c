#![allow(dead_code)]

use spelltree::config::ConfigFile;
use spelltree::engine::{run_pipeline, ParsedTree};
use spelltree::input::RawTreeDocument;
use spelltree::tree::{SeededRandom, SpellGraph};

/// Run the full pipeline with default config and no injection.
pub fn parse_default(doc: &RawTreeDocument) -> ParsedTree {
    parse_with(doc, &ConfigFile::default(), false)
}

pub fn parse_with(doc: &RawTreeDocument, config: &ConfigFile, inject: bool) -> ParsedTree {
    let mut rng = SeededRandom::from_seed(7);
    run_pipeline(doc, config, &mut rng, inject)
}

/// Ingest + reconcile only, leaving every repair pass to the test.
pub fn ingest(doc: &RawTreeDocument) -> SpellGraph {
    let mut graph = SpellGraph::new();
    graph.ingest(doc);
    graph.reconcile_edges();
    graph.detach_root_prerequisites();
    graph
}

pub fn prereqs<'a>(graph: &'a SpellGraph, id: &str) -> Vec<&'a str> {
    graph
        .node(id)
        .map(|n| n.prerequisites.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

pub fn children<'a>(graph: &'a SpellGraph, id: &str) -> Vec<&'a str> {
    graph
        .node(id)
        .map(|n| n.children.iter().map(String::as_str).collect())
        .unwrap_or_default()
}
