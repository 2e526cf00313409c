// src/tree/orphan.rs

//! Grafting of nodes the depth BFS never reached.
//!
//! Each orphan is attached under the visited node closest below it in tier
//! (tier within `[orphan - 1, orphan]`), preferring parents with fewer
//! children, and falls back to the school root.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::tree::depth::DepthScan;
use crate::tree::graph::SpellGraph;
use crate::types::NodeId;

/// Attach every orphan in `scan` to a plausible parent, then assign depth
/// to anything newly reachable through the orphans' child links.
///
/// `scan.visited` is updated as orphans are attached, so later orphans may
/// attach under earlier ones. Returns the number of orphans attached.
pub fn reattach_orphans(graph: &mut SpellGraph, school: &str, scan: &mut DepthScan) -> usize {
    let Some(root) = graph.school(school).map(|s| s.root.clone()) else {
        return 0;
    };
    let members: Vec<NodeId> = graph
        .school(school)
        .map(|s| s.node_ids.clone())
        .unwrap_or_default();

    let orphans = scan.orphans.clone();
    let mut attached = 0;

    for orphan in &orphans {
        if scan.visited.contains(orphan) {
            continue;
        }
        let Some(orphan_tier) = graph.node(orphan).map(|n| n.tier) else {
            continue;
        };

        let parent = best_parent(graph, &members, scan, orphan, orphan_tier)
            .unwrap_or_else(|| root.clone());
        let parent_depth = graph.node(&parent).map(|n| n.depth).unwrap_or(0);

        graph.add_prerequisite(&parent, orphan);
        if let Some(node) = graph.node_mut(orphan) {
            node.depth = parent_depth + 1;
        }
        scan.visited.insert(orphan.clone());
        attached += 1;

        info!(
            school = %school,
            kind = "orphan_reattached",
            node = %orphan,
            parent = %parent,
            depth = parent_depth + 1,
            "reattached orphan"
        );
    }

    for orphan in &orphans {
        assign_subtree_depths(graph, school, scan, orphan);
    }

    attached
}

/// Visited same-school node ranked by (tier distance, child count); the
/// first in school order wins ties. Descendants of the orphan are never
/// candidates, so attaching cannot close a cycle.
fn best_parent(
    graph: &SpellGraph,
    members: &[NodeId],
    scan: &DepthScan,
    orphan: &str,
    orphan_tier: u32,
) -> Option<NodeId> {
    let low = orphan_tier.saturating_sub(1);
    let descendants = graph.descendants_of(orphan);

    members
        .iter()
        .filter(|id| id.as_str() != orphan && scan.visited.contains(*id))
        .filter(|id| !descendants.contains(*id))
        .filter_map(|id| graph.node(id))
        .filter(|n| n.tier >= low && n.tier <= orphan_tier)
        .map(|n| ((orphan_tier - n.tier, n.children.len()), n.id.clone()))
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, id)| id)
}

fn assign_subtree_depths(graph: &mut SpellGraph, school: &str, scan: &mut DepthScan, start: &str) {
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(start.to_string());

    while let Some(id) = queue.pop_front() {
        let Some((depth, children)) = graph.node(&id).map(|n| (n.depth, n.children.clone())) else {
            continue;
        };
        for child in children {
            if !graph.in_school(&child, school) || !scan.visited.insert(child.clone()) {
                continue;
            }
            if let Some(node) = graph.node_mut(&child) {
                node.depth = depth + 1;
            }
            debug!(school = %school, node = %child, depth = depth + 1, "depth assigned via orphan subtree");
            queue.push_back(child);
        }
    }
}
