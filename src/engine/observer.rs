// src/engine/observer.rs

use crate::engine::report::ParseReport;
use crate::tree::SpellGraph;

/// Notified after every completed parse cycle, e.g. to re-render or save.
///
/// Observers run after all mutation is done and receive read-only views.
pub trait TreeObserver {
    fn on_tree_ready(&mut self, graph: &SpellGraph, report: &ParseReport);
}

impl<F> TreeObserver for F
where
    F: FnMut(&SpellGraph, &ParseReport),
{
    fn on_tree_ready(&mut self, graph: &SpellGraph, report: &ParseReport) {
        self(graph, report)
    }
}
