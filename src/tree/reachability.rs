// src/tree/reachability.rs

//! Fixed-point unlock simulation.
//!
//! A node unlocks once every one of its prerequisites is unlocked (AND
//! semantics). The root starts unlocked; any other node with an empty
//! prerequisite list unlocks on the first pass. Prerequisites outside the
//! school, or naming unknown ids, never unlock.
//!
//! Nothing here is cached: callers re-run the simulation after every
//! mutation of the prerequisite relation.

use std::collections::HashSet;

use tracing::warn;

use crate::tree::graph::SpellGraph;
use crate::types::NodeId;

/// Slack added to the node count to form the hard pass cap.
pub const PASS_CAP_SLACK: usize = 10;

/// Result of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnlockSimulation {
    pub unlocked: HashSet<NodeId>,
    pub passes: usize,
    /// `true` if the pass cap stopped the loop before a fixed point.
    pub capped: bool,
}

/// Simulate unlocks for `school` starting from its root.
///
/// Returns an empty simulation for an unknown school.
pub fn simulate(graph: &SpellGraph, school: &str) -> UnlockSimulation {
    let Some(record) = graph.school(school) else {
        return UnlockSimulation::default();
    };

    let mut unlocked: HashSet<NodeId> = HashSet::new();
    unlocked.insert(record.root.clone());

    let cap = record.node_ids.len() + PASS_CAP_SLACK;
    let mut passes = 0;
    let mut capped = true;

    while passes < cap {
        passes += 1;
        let mut added = false;

        for id in &record.node_ids {
            if unlocked.contains(id) {
                continue;
            }
            let Some(node) = graph.node(id) else {
                continue;
            };
            if node.prerequisites.iter().all(|p| unlocked.contains(p)) {
                unlocked.insert(id.clone());
                added = true;
            }
        }

        if !added {
            capped = false;
            break;
        }
    }

    if capped {
        warn!(school = %school, passes, "unlock simulation hit its pass cap");
    }

    UnlockSimulation {
        unlocked,
        passes,
        capped,
    }
}

/// The set of node ids unlockable from the root of `school`.
pub fn unlocked_set(graph: &SpellGraph, school: &str) -> HashSet<NodeId> {
    simulate(graph, school).unlocked
}

/// School members the simulation cannot reach, in school order.
pub fn unreachable_nodes(graph: &SpellGraph, school: &str) -> Vec<NodeId> {
    let unlocked = unlocked_set(graph, school);
    graph
        .school(school)
        .map(|s| {
            s.node_ids
                .iter()
                .filter(|id| !unlocked.contains(*id))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
