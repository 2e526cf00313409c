// src/tree/inject.rs

//! Procedural prerequisite injection.
//!
//! Adds extra prerequisite edges to make the tree converge more. Candidates
//! must sit strictly shallower than the node, must not be its descendants,
//! and must have a first-prerequisite chain that reaches the root, so an
//! injected edge can never close a cycle or cut a node off.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::InjectionSection;
use crate::tree::graph::SpellGraph;
use crate::tree::random::RandomSource;
use crate::types::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionOptions {
    /// Per-node chance in percent.
    pub chance: u32,
    pub max_prerequisites: usize,
    pub min_depth: u32,
    pub prefer_same_tier: bool,
}

impl Default for InjectionOptions {
    fn default() -> Self {
        Self {
            chance: 30,
            max_prerequisites: 3,
            min_depth: 2,
            prefer_same_tier: true,
        }
    }
}

impl From<&InjectionSection> for InjectionOptions {
    fn from(section: &InjectionSection) -> Self {
        Self {
            chance: section.chance.min(100),
            max_prerequisites: section.max_prerequisites,
            min_depth: section.min_depth,
            prefer_same_tier: section.prefer_same_tier,
        }
    }
}

/// Inject extra prerequisites into `school`. Returns the number of edges added.
pub fn inject_prerequisites(
    graph: &mut SpellGraph,
    school: &str,
    opts: &InjectionOptions,
    rng: &mut dyn RandomSource,
) -> usize {
    let Some(record) = graph.school(school) else {
        return 0;
    };
    let root = record.root.clone();
    let members = record.node_ids.clone();
    let mut injected = 0;

    for id in &members {
        let Some((depth, prereq_count)) = graph.node(id).map(|n| (n.depth, n.prerequisites.len())) else {
            continue;
        };
        if prereq_count == 0 || prereq_count >= opts.max_prerequisites || depth < opts.min_depth {
            continue;
        }
        if rng.roll_percent() >= opts.chance {
            continue;
        }

        let pool = candidate_pool(graph, &members, &root, id, depth, opts.prefer_same_tier);
        if pool.is_empty() {
            debug!(school = %school, node = %id, "no safe injection candidate");
            continue;
        }

        let parent = pool[rng.pick(pool.len())].clone();
        if graph.add_prerequisite(&parent, id) {
            injected += 1;
            info!(
                school = %school,
                kind = "inject_prerequisite",
                node = %id,
                parent = %parent,
                "injected extra prerequisite"
            );
        }
    }

    injected
}

fn candidate_pool(
    graph: &SpellGraph,
    members: &[NodeId],
    root: &str,
    node: &str,
    depth: u32,
    prefer_same_tier: bool,
) -> Vec<NodeId> {
    let Some(target) = graph.node(node) else {
        return Vec::new();
    };
    let descendants = graph.descendants_of(node);

    let eligible: Vec<(NodeId, u32)> = members
        .iter()
        .filter(|id| id.as_str() != node && !target.has_prerequisite(id))
        .filter(|id| !descendants.contains(*id))
        .filter_map(|id| graph.node(id))
        .filter(|n| n.depth < depth)
        .filter(|n| has_path_to_root(graph, &n.id, root))
        .map(|n| (n.id.clone(), n.depth))
        .collect();

    if prefer_same_tier {
        let adjacent: Vec<NodeId> = eligible
            .iter()
            .filter(|(_, d)| *d + 1 == depth)
            .map(|(id, _)| id.clone())
            .collect();
        if !adjacent.is_empty() {
            return adjacent;
        }
    }

    eligible.into_iter().map(|(id, _)| id).collect()
}

/// Walk first-listed prerequisites from `start`; `true` once the root is
/// reached, `false` on a dead end or a repeated visit.
pub fn has_path_to_root(graph: &SpellGraph, start: &str, root: &str) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = start;

    loop {
        if current == root {
            return true;
        }
        if !seen.insert(current) {
            return false;
        }
        let Some(next) = graph.node(current).and_then(|n| n.prerequisites.first()) else {
            return false;
        };
        current = next;
    }
}
