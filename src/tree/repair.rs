// src/tree/repair.rs

//! Cycle and unreachability repair.
//!
//! Runs once per school and mutates the graph in place until the unlock
//! simulation from the root reaches every member:
//!
//! 1. Diagnosis: simulate, stop if everything is reachable, otherwise log
//!    which unreachable prerequisites block which nodes.
//! 2. Iterative repair (bounded by `max_passes`, never more than 10; stops
//!    after a pass with no changes): nodes with a mix of obtainable and unobtainable
//!    prerequisites get each unobtainable one replaced (or dropped); fully
//!    cut-off nodes are re-parented under a single unlocked node.
//! 3. Final verification: any node still blocked gains one extra unlocked
//!    prerequisite. Because AND semantics means an extra prerequisite never
//!    unblocks anything on its own, the first still-blocked node then has its
//!    unobtainable prerequisites severed, one node at a time, until the
//!    school is fully reachable or the node-count bound is spent.
//!
//! Candidate parents are always taken from the unlocked set, so no rewrite
//! here can introduce a cycle.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::{RepairSection, MAX_REPAIR_PASSES};
use crate::tree::graph::SpellGraph;
use crate::tree::reachability::{unlocked_set, unreachable_nodes};
use crate::types::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOptions {
    /// Skip nodes with mixed obtainable/unobtainable prerequisites in phase 2.
    pub preserve_multi_prerequisites: bool,
    pub max_passes: usize,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            preserve_multi_prerequisites: false,
            max_passes: MAX_REPAIR_PASSES,
        }
    }
}

impl From<&RepairSection> for RepairOptions {
    fn from(section: &RepairSection) -> Self {
        Self {
            preserve_multi_prerequisites: section.preserve_multi_prerequisites,
            max_passes: section.max_passes.clamp(1, MAX_REPAIR_PASSES),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Total number of edge rewrites, drops and additions.
    pub fixes: usize,
    /// Phase-2 passes actually run.
    pub passes: usize,
    /// Members still unreachable after all phases, in school order.
    pub still_unreachable: Vec<NodeId>,
}

impl RepairOutcome {
    pub fn is_fully_reachable(&self) -> bool {
        self.still_unreachable.is_empty()
    }
}

/// Which tiers a replacement parent may have, relative to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierRule {
    /// `candidate.tier < node.tier`; bonus 20 / 10 / 5 for 1 / 2 / more steps.
    StrictlyBelow,
    /// `candidate.tier <= node.tier`; bonus 20 / 10 / 5 for 0 / 1 / more steps.
    AtOrBelow,
}

/// Heuristic score of `candidate` as a new parent: tier bonus minus the
/// candidate's current child count. `None` if the tier rule excludes it.
///
/// The weights are tunable heuristics; only their tie-break order matters
/// for reproducing historical output.
pub fn replacement_score(rule: TierRule, node_tier: u32, candidate_tier: u32, child_count: usize) -> Option<i64> {
    let bonus = match rule {
        TierRule::StrictlyBelow => match node_tier.checked_sub(candidate_tier)? {
            0 => return None,
            1 => 20,
            2 => 10,
            _ => 5,
        },
        TierRule::AtOrBelow => match node_tier.checked_sub(candidate_tier)? {
            0 => 20,
            1 => 10,
            _ => 5,
        },
    };
    Some(bonus - child_count as i64)
}

/// Repair `school` in place. See the module docs for the phases.
pub fn repair_school(graph: &mut SpellGraph, school: &str, opts: &RepairOptions) -> RepairOutcome {
    let mut outcome = RepairOutcome::default();

    // Phase 1: diagnosis.
    let unlocked = unlocked_set(graph, school);
    let members: Vec<NodeId> = match graph.school(school) {
        Some(s) => s.node_ids.clone(),
        None => return outcome,
    };
    if members.iter().all(|id| unlocked.contains(id)) {
        debug!(school = %school, "all nodes reachable; no repair needed");
        return outcome;
    }
    diagnose(graph, school, &members, &unlocked);

    // Phase 2: iterative repair.
    for pass in 1..=opts.max_passes.min(MAX_REPAIR_PASSES) {
        outcome.passes = pass;
        let changes = repair_pass(graph, school, &members, opts);
        outcome.fixes += changes;
        debug!(school = %school, pass, changes, "repair pass complete");
        if changes == 0 {
            break;
        }
    }

    // Phase 3: final verification.
    outcome.fixes += final_verification(graph, school, &members);

    outcome.still_unreachable = unreachable_nodes(graph, school);
    if outcome.is_fully_reachable() {
        info!(school = %school, fixes = outcome.fixes, "school repaired; all nodes reachable");
    } else {
        warn!(
            school = %school,
            fixes = outcome.fixes,
            unreachable = ?outcome.still_unreachable,
            "school still has unreachable nodes after repair"
        );
    }
    outcome
}

fn diagnose(graph: &SpellGraph, school: &str, members: &[NodeId], unlocked: &HashSet<NodeId>) {
    let unreachable: Vec<&NodeId> = members.iter().filter(|id| !unlocked.contains(*id)).collect();
    warn!(
        school = %school,
        count = unreachable.len(),
        total = members.len(),
        "unreachable nodes detected"
    );

    for id in unreachable {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let blockers: Vec<&NodeId> = node
            .prerequisites
            .iter()
            .filter(|p| !unlocked.contains(*p))
            .collect();
        info!(school = %school, kind = "diagnosis", node = %id, blocked_by = ?blockers, "node is blocked");
    }
}

fn repair_pass(graph: &mut SpellGraph, school: &str, members: &[NodeId], opts: &RepairOptions) -> usize {
    let unlocked = unlocked_set(graph, school);
    let Some(root) = graph.school(school).map(|s| s.root.clone()) else {
        return 0;
    };
    let mut changes = 0;

    for id in members {
        if unlocked.contains(id) {
            continue;
        }
        let Some(prereqs) = graph.node(id).map(|n| n.prerequisites.clone()) else {
            continue;
        };
        let (obtainable, unobtainable): (Vec<NodeId>, Vec<NodeId>) =
            prereqs.into_iter().partition(|p| unlocked.contains(p));

        if unobtainable.is_empty() {
            continue;
        }

        if !obtainable.is_empty() {
            if opts.preserve_multi_prerequisites {
                debug!(
                    school = %school,
                    node = %id,
                    blocked_by = ?unobtainable,
                    "preserving multi-prerequisite node this pass"
                );
                continue;
            }

            for prereq in unobtainable {
                graph.remove_prerequisite(&prereq, id);
                match best_candidate(graph, members, &unlocked, id, TierRule::StrictlyBelow) {
                    Some(replacement) => {
                        graph.add_prerequisite(&replacement, id);
                        info!(
                            school = %school,
                            kind = "replace_prerequisite",
                            node = %id,
                            removed = %prereq,
                            parent = %replacement,
                            "replaced unobtainable prerequisite"
                        );
                    }
                    None => {
                        info!(
                            school = %school,
                            kind = "drop_prerequisite",
                            node = %id,
                            removed = %prereq,
                            "dropped unobtainable prerequisite"
                        );
                    }
                }
                changes += 1;
            }
        } else {
            let parent = best_candidate(graph, members, &unlocked, id, TierRule::AtOrBelow)
                .unwrap_or_else(|| root.clone());
            for prereq in &unobtainable {
                graph.remove_prerequisite(prereq, id);
            }
            graph.add_prerequisite(&parent, id);
            info!(
                school = %school,
                kind = "reparent",
                node = %id,
                removed = ?unobtainable,
                parent = %parent,
                "reattached cut-off node"
            );
            changes += 1;
        }
    }

    changes
}

fn final_verification(graph: &mut SpellGraph, school: &str, members: &[NodeId]) -> usize {
    let unlocked = unlocked_set(graph, school);
    let blocked: Vec<NodeId> = members
        .iter()
        .filter(|id| !unlocked.contains(*id))
        .cloned()
        .collect();
    if blocked.is_empty() {
        return 0;
    }
    let Some(root) = graph.school(school).map(|s| s.root.clone()) else {
        return 0;
    };

    let mut fixes = 0;

    for id in &blocked {
        let parent = best_candidate(graph, members, &unlocked, id, TierRule::StrictlyBelow)
            .unwrap_or_else(|| root.clone());
        if graph.add_prerequisite(&parent, id) {
            fixes += 1;
            info!(
                school = %school,
                kind = "gentle_fix",
                node = %id,
                parent = %parent,
                "added extra prerequisite"
            );
        }
    }

    for _ in 0..members.len() {
        let unlocked = unlocked_set(graph, school);
        let Some(id) = members.iter().find(|id| !unlocked.contains(*id)).cloned() else {
            break;
        };
        let severed: Vec<NodeId> = graph
            .node(&id)
            .map(|n| {
                n.prerequisites
                    .iter()
                    .filter(|p| !unlocked.contains(*p))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for prereq in &severed {
            graph.remove_prerequisite(prereq, &id);
        }
        fixes += severed.len();

        if graph.node(&id).is_some_and(|n| n.prerequisites.is_empty()) {
            graph.add_prerequisite(&root, &id);
            fixes += 1;
        }

        warn!(
            school = %school,
            kind = "sever_prerequisite",
            node = %id,
            removed = ?severed,
            "severed prerequisites still blocking node"
        );
    }

    fixes
}

/// Highest-scoring unlocked same-school candidate parent for `node`,
/// ignoring the node itself and its current prerequisites. The first
/// candidate in school order wins ties.
fn best_candidate(
    graph: &SpellGraph,
    members: &[NodeId],
    unlocked: &HashSet<NodeId>,
    node: &str,
    rule: TierRule,
) -> Option<NodeId> {
    let target = graph.node(node)?;
    let mut best: Option<(i64, &NodeId)> = None;

    for id in members {
        if id == node || !unlocked.contains(id) || target.has_prerequisite(id) {
            continue;
        }
        let Some(candidate) = graph.node(id) else {
            continue;
        };
        let Some(score) = replacement_score(rule, target.tier, candidate.tier, candidate.children.len()) else {
            continue;
        };
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, id));
        }
    }

    best.map(|(_, id)| id.clone())
}
