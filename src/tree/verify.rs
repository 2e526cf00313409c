// src/tree/verify.rs

//! Structural invariant checks over a finalized graph.
//!
//! None of these mutate the graph. `verify` aggregates every check and is
//! what the CLI `--check` mode reports.

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use thiserror::Error;

use crate::tree::graph::SpellGraph;
use crate::tree::reachability::unreachable_nodes;
use crate::types::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("school '{school}' has {count} nodes without prerequisites (expected exactly 1)")]
    RootCount { school: String, count: usize },

    #[error("school '{school}' root '{root}' has prerequisites")]
    RootHasPrerequisites { school: String, root: NodeId },

    #[error("school '{school}' has unreachable nodes: {nodes:?}")]
    Unreachable { school: String, nodes: Vec<NodeId> },

    #[error("edge {from} -> {to} is inconsistent: {detail}")]
    EdgeInconsistency { from: NodeId, to: NodeId, detail: String },

    #[error("node '{node}' references itself")]
    SelfLoop { node: NodeId },

    #[error("cycle detected in prerequisites: {}", .nodes.join(" -> "))]
    Cycle { nodes: Vec<NodeId> },
}

/// Run every check and collect all violations.
pub fn verify(graph: &SpellGraph) -> Vec<Violation> {
    let mut violations = find_root_violations(graph);
    for school in graph.schools() {
        if let Some(v) = find_unreachable(graph, &school.name) {
            violations.push(v);
        }
    }
    violations.extend(find_edge_inconsistencies(graph));
    violations.extend(find_self_loops(graph));
    violations.extend(find_cycles(graph));
    violations
}

/// Schools that do not have exactly one member with an empty prerequisite
/// list, or whose designated root has prerequisites.
pub fn find_root_violations(graph: &SpellGraph) -> Vec<Violation> {
    let mut out = Vec::new();
    for school in graph.schools() {
        let count = school
            .node_ids
            .iter()
            .filter_map(|id| graph.node(id))
            .filter(|n| n.prerequisites.is_empty())
            .count();
        if count != 1 {
            out.push(Violation::RootCount {
                school: school.name.clone(),
                count,
            });
        }
        if graph.node(&school.root).is_some_and(|n| !n.prerequisites.is_empty()) {
            out.push(Violation::RootHasPrerequisites {
                school: school.name.clone(),
                root: school.root.clone(),
            });
        }
    }
    out
}

pub fn find_unreachable(graph: &SpellGraph, school: &str) -> Option<Violation> {
    let nodes = unreachable_nodes(graph, school);
    if nodes.is_empty() {
        None
    } else {
        Some(Violation::Unreachable {
            school: school.to_string(),
            nodes,
        })
    }
}

/// Mismatches between child lists, prerequisite lists and the edge list.
///
/// Child ids that name no node are tolerated: ingestion keeps them in place
/// without creating an edge.
pub fn find_edge_inconsistencies(graph: &SpellGraph) -> Vec<Violation> {
    let mut out = Vec::new();
    let mismatch = |from: &str, to: &str, detail: &str| Violation::EdgeInconsistency {
        from: from.to_string(),
        to: to.to_string(),
        detail: detail.to_string(),
    };

    for node in graph.nodes() {
        for child in &node.children {
            let Some(child_node) = graph.node(child) else {
                continue;
            };
            if !graph.has_edge(&node.id, child) {
                out.push(mismatch(&node.id, child, "child listed without edge"));
            }
            if !child_node.has_prerequisite(&node.id) {
                out.push(mismatch(&node.id, child, "child does not list parent as prerequisite"));
            }
        }
        for prereq in &node.prerequisites {
            if !graph.has_edge(prereq, &node.id) {
                out.push(mismatch(prereq, &node.id, "prerequisite listed without edge"));
            }
            if !graph.node(prereq).is_some_and(|p| p.has_child(&node.id)) {
                out.push(mismatch(prereq, &node.id, "prerequisite does not list node as child"));
            }
        }
    }

    for edge in graph.edges() {
        let listed = graph.node(&edge.to).is_some_and(|n| n.has_prerequisite(&edge.from))
            && graph.node(&edge.from).is_some_and(|n| n.has_child(&edge.to));
        if !listed {
            out.push(mismatch(&edge.from, &edge.to, "edge without matching lists"));
        }
    }

    out
}

pub fn find_self_loops(graph: &SpellGraph) -> Vec<Violation> {
    graph
        .nodes()
        .filter(|n| n.has_prerequisite(&n.id) || n.has_child(&n.id))
        .map(|n| Violation::SelfLoop { node: n.id.clone() })
        .collect()
}

/// Strongly connected components of the prerequisite relation that form a
/// cycle.
pub fn find_cycles(graph: &SpellGraph) -> Vec<Violation> {
    let mut g: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in graph.nodes() {
        g.add_node(node.id.as_str());
    }
    for node in graph.nodes() {
        for prereq in &node.prerequisites {
            if graph.contains(prereq) {
                g.add_edge(prereq.as_str(), node.id.as_str(), ());
            }
        }
    }

    tarjan_scc(&g)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|n| g.contains_edge(*n, *n))
        })
        .map(|component| {
            let mut nodes: Vec<NodeId> = component.into_iter().map(str::to_string).collect();
            nodes.sort();
            Violation::Cycle { nodes }
        })
        .collect()
}

/// `true` if the prerequisite relation contains no cycle.
pub fn is_acyclic(graph: &SpellGraph) -> bool {
    find_cycles(graph).is_empty()
}
