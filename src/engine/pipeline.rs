// src/engine/pipeline.rs

//! The batch pipeline that turns a raw document into a finalized graph.

use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::engine::report::{ParseReport, SchoolReport};
use crate::input::RawTreeDocument;
use crate::tree::depth::{assign_depths, refresh_school_stats};
use crate::tree::inject::{inject_prerequisites, InjectionOptions};
use crate::tree::repair::{repair_school, RepairOptions};
use crate::tree::{RandomSource, SpellGraph};

/// A finalized graph plus the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub graph: SpellGraph,
    pub report: ParseReport,
}

/// Build a fresh graph from `doc` and run every pass over it:
/// ingest, reconcile edges, detach root prerequisites, depth + orphan
/// reattachment, repair, and (when `inject` is set) prerequisite injection.
///
/// `doc` is only read; repeated calls with the same document and the same
/// random sequence produce identical graphs.
pub fn run_pipeline(
    doc: &RawTreeDocument,
    config: &ConfigFile,
    rng: &mut dyn RandomSource,
    inject: bool,
) -> ParsedTree {
    let mut graph = SpellGraph::new();
    let ingest = graph.ingest(doc);
    graph.reconcile_edges();
    let root_edges_removed = graph.detach_root_prerequisites();

    let repair_opts = RepairOptions::from(&config.repair);
    let inject_opts = InjectionOptions::from(&config.injection);

    let mut report = ParseReport {
        schools: Vec::new(),
        failures: ingest.failures,
        ingested_ids: ingest.ids,
        root_edges_removed,
    };

    for school in graph.school_names() {
        let orphans_reattached = assign_depths(&mut graph, &school);
        let outcome = repair_school(&mut graph, &school, &repair_opts);

        // Repairs move edges around; depths must reflect the final shape.
        assign_depths(&mut graph, &school);

        let injected = if inject {
            let n = inject_prerequisites(&mut graph, &school, &inject_opts, rng);
            assign_depths(&mut graph, &school);
            n
        } else {
            0
        };
        refresh_school_stats(&mut graph, &school);

        debug!(
            school = %school,
            orphans_reattached,
            fixes = outcome.fixes,
            injected,
            "school processed"
        );

        report.schools.push(SchoolReport {
            school,
            orphans_reattached,
            fixes: outcome.fixes,
            injected,
            fully_reachable: outcome.is_fully_reachable(),
        });
    }

    info!(
        schools = report.schools.len(),
        failures = report.failures.len(),
        nodes = graph.len(),
        edges = graph.edges().len(),
        fixes = report.total_fixes(),
        injected = report.total_injected(),
        "tree parse complete"
    );

    ParsedTree { graph, report }
}
