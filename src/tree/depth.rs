// src/tree/depth.rs

//! Breadth-first depth assignment from each school root.
//!
//! Depth is the BFS distance along child edges, restricted to the school's
//! own members. Nodes the traversal never visits are orphans and are handed
//! to [`orphan::reattach_orphans`](crate::tree::orphan::reattach_orphans).

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;

use crate::tree::graph::SpellGraph;
use crate::tree::orphan;
use crate::types::NodeId;

/// Outcome of a BFS over one school.
#[derive(Debug, Clone, Default)]
pub struct DepthScan {
    pub visited: HashSet<NodeId>,
    /// Unvisited school members, in school order.
    pub orphans: Vec<NodeId>,
    pub max_depth: u32,
    pub width_by_depth: BTreeMap<u32, usize>,
}

/// Run the BFS for `school`, writing `depth` on every visited node.
///
/// Returns `None` for an unknown school.
pub fn scan_school(graph: &mut SpellGraph, school: &str) -> Option<DepthScan> {
    let record = graph.school(school)?;
    let root = record.root.clone();
    let members = record.node_ids.clone();

    let mut scan = DepthScan::default();
    scan.visited.insert(root.clone());

    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((id, depth)) = queue.pop_front() {
        let children = match graph.node_mut(&id) {
            Some(node) => {
                node.depth = depth;
                node.children.clone()
            }
            None => continue,
        };

        scan.max_depth = scan.max_depth.max(depth);
        *scan.width_by_depth.entry(depth).or_insert(0) += 1;

        for child in children {
            if !graph.in_school(&child, school) || !scan.visited.insert(child.clone()) {
                continue;
            }
            queue.push_back((child, depth + 1));
        }
    }

    scan.orphans = members
        .into_iter()
        .filter(|id| !scan.visited.contains(id))
        .collect();

    debug!(
        school = %school,
        visited = scan.visited.len(),
        orphans = scan.orphans.len(),
        max_depth = scan.max_depth,
        "depth scan complete"
    );

    Some(scan)
}

/// Assign depths for `school`, reattach its orphans, and refresh the
/// school's depth statistics. Returns the number of orphans reattached.
pub fn assign_depths(graph: &mut SpellGraph, school: &str) -> usize {
    let Some(mut scan) = scan_school(graph, school) else {
        return 0;
    };
    let reattached = orphan::reattach_orphans(graph, school, &mut scan);
    refresh_school_stats(graph, school);
    reattached
}

/// Recompute `max_depth` and `max_width` from the current node depths.
pub fn refresh_school_stats(graph: &mut SpellGraph, school: &str) {
    let Some(record) = graph.school(school) else {
        return;
    };

    let mut width_by_depth: BTreeMap<u32, usize> = BTreeMap::new();
    for id in &record.node_ids {
        if let Some(node) = graph.node(id) {
            *width_by_depth.entry(node.depth).or_insert(0) += 1;
        }
    }

    let max_depth = width_by_depth.keys().next_back().copied().unwrap_or(0);
    let max_width = width_by_depth.values().copied().max().unwrap_or(0);

    if let Some(record) = graph.school_mut(school) {
        record.max_depth = max_depth;
        record.max_width = max_width;
    }
}
