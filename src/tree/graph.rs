// src/tree/graph.rs

//! In-memory graph store for one parse.
//!
//! Nodes are keyed by id and also kept in ingestion order, which is the
//! "first-seen" order every tie-break in the repair passes relies on. The
//! edge list is a denormalised view of the prerequisite/children relation;
//! all mutation goes through [`SpellGraph::add_prerequisite`] and
//! [`SpellGraph::remove_prerequisite`] so the three views never diverge.

use std::collections::{HashMap, HashSet};

use blake3::Hasher;
use tracing::{debug, warn};

use crate::input::RawTreeDocument;
use crate::tree::node::{School, SchoolFailure, SpellNode};
use crate::types::{Edge, NodeId, NodeState};

/// Result of [`SpellGraph::ingest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    /// Every ingested node id, in ingestion order.
    pub ids: Vec<NodeId>,
    pub failures: Vec<SchoolFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct SpellGraph {
    nodes: HashMap<NodeId, SpellNode>,
    order: Vec<NodeId>,
    edges: Vec<Edge>,
    schools: Vec<School>,
}

impl SpellGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create node records for every school in `doc`.
    ///
    /// A raw node without an identifier is skipped. A school without a root,
    /// without a node list, or whose root is not among its nodes is skipped
    /// entirely and reported in [`IngestSummary::failures`].
    pub fn ingest(&mut self, doc: &RawTreeDocument) -> IngestSummary {
        let mut summary = IngestSummary::default();
        let Some(schools) = doc.schools.as_ref() else {
            return summary;
        };

        for (name, raw_school) in schools {
            let (root, raw_nodes) = match (&raw_school.root, &raw_school.nodes) {
                (Some(root), Some(nodes)) => (root.trim().to_string(), nodes),
                (None, _) => {
                    summary.failures.push(reject(name, "school has no root"));
                    continue;
                }
                (_, None) => {
                    summary.failures.push(reject(name, "school has no node list"));
                    continue;
                }
            };

            let mut staged: Vec<SpellNode> = Vec::with_capacity(raw_nodes.len());
            for raw in raw_nodes {
                let Some(node) = SpellNode::from_raw(name, raw) else {
                    warn!(school = %name, "skipping node without an identifier");
                    continue;
                };
                if self.nodes.contains_key(&node.id) || staged.iter().any(|n| n.id == node.id) {
                    warn!(school = %name, node = %node.id, "duplicate node id; keeping the first");
                    continue;
                }
                let self_ref = |ids: &Option<Vec<String>>| {
                    ids.as_ref()
                        .is_some_and(|ids| ids.iter().any(|i| i.trim() == node.id))
                };
                if self_ref(&raw.children) || self_ref(&raw.prerequisites) {
                    warn!(school = %name, node = %node.id, kind = "self_loop", "dropped self reference");
                }
                staged.push(node);
            }

            if !staged.iter().any(|n| n.id == root) {
                summary
                    .failures
                    .push(reject(name, &format!("root '{root}' is not among the school's nodes")));
                continue;
            }

            let mut node_ids = Vec::with_capacity(staged.len());
            for mut node in staged {
                if node.id == root {
                    node.is_root = true;
                    node.state = NodeState::Available;
                }
                node_ids.push(node.id.clone());
                summary.ids.push(node.id.clone());
                self.order.push(node.id.clone());
                self.nodes.insert(node.id.clone(), node);
            }

            debug!(school = %name, root = %root, nodes = node_ids.len(), "ingested school");

            self.schools.push(School {
                name: name.clone(),
                root,
                node_ids,
                max_depth: 0,
                max_width: 0,
                layout_style: raw_school.layout_style.clone(),
                slice_info: raw_school.slice_info.clone(),
                config: raw_school.config.clone(),
            });
        }

        summary
    }

    /// Derive the edge list from both children and prerequisite lists.
    ///
    /// Generated content fills one direction or the other inconsistently, so
    /// each listed child gains the parent as a prerequisite and each listed
    /// prerequisite gains the node as a child. References to unknown ids
    /// produce no edge and are left where they are.
    pub fn reconcile_edges(&mut self) {
        let order = self.order.clone();

        for id in &order {
            let children = self.nodes.get(id).map(|n| n.children.clone()).unwrap_or_default();
            for child in children {
                let Some(child_node) = self.nodes.get_mut(&child) else {
                    continue;
                };
                if !child_node.has_prerequisite(id) {
                    child_node.prerequisites.push(id.clone());
                }
                if !self.has_edge(id, &child) {
                    self.edges.push(Edge::new(id.clone(), child));
                }
            }
        }

        for id in &order {
            let prereqs = self
                .nodes
                .get(id)
                .map(|n| n.prerequisites.clone())
                .unwrap_or_default();
            for prereq in prereqs {
                if !self.nodes.contains_key(&prereq) || self.has_edge(&prereq, id) {
                    continue;
                }
                self.edges.push(Edge::new(prereq.clone(), id.clone()));
                if let Some(parent) = self.nodes.get_mut(&prereq) {
                    if !parent.has_child(id) {
                        parent.children.push(id.clone());
                    }
                }
            }
        }

        debug!(edges = self.edges.len(), "reconciled edges");
    }

    /// Remove every prerequisite edge pointing into a school root so that
    /// each root keeps an empty prerequisite list. Returns the number of
    /// edges removed.
    pub fn detach_root_prerequisites(&mut self) -> usize {
        let roots: Vec<(String, NodeId)> = self
            .schools
            .iter()
            .map(|s| (s.name.clone(), s.root.clone()))
            .collect();

        let mut removed = 0;
        for (school, root) in roots {
            let prereqs = self
                .nodes
                .get(&root)
                .map(|n| n.prerequisites.clone())
                .unwrap_or_default();
            for prereq in prereqs {
                warn!(
                    school = %school,
                    kind = "root_prerequisite",
                    node = %root,
                    removed = %prereq,
                    "root listed a prerequisite; removing it"
                );
                self.remove_prerequisite(&prereq, &root);
                removed += 1;
            }
        }
        removed
    }

    /// Add `parent` as a prerequisite of `child`, updating the child list and
    /// edge list too. Returns `false` (and changes nothing) for self loops,
    /// unknown ids, or an edge that already exists.
    pub fn add_prerequisite(&mut self, parent: &str, child: &str) -> bool {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }

        let mut changed = false;
        if let Some(c) = self.nodes.get_mut(child) {
            if !c.has_prerequisite(parent) {
                c.prerequisites.push(parent.to_string());
                changed = true;
            }
        }
        if let Some(p) = self.nodes.get_mut(parent) {
            if !p.has_child(child) {
                p.children.push(child.to_string());
                changed = true;
            }
        }
        if !self.has_edge(parent, child) {
            self.edges.push(Edge::new(parent, child));
            changed = true;
        }
        changed
    }

    /// Remove the prerequisite relation `parent -> child` from all three
    /// views. `parent` need not exist as a node (dangling prerequisite).
    pub fn remove_prerequisite(&mut self, parent: &str, child: &str) -> bool {
        let mut changed = false;
        if let Some(c) = self.nodes.get_mut(child) {
            let before = c.prerequisites.len();
            c.prerequisites.retain(|p| p != parent);
            changed |= c.prerequisites.len() != before;
        }
        if let Some(p) = self.nodes.get_mut(parent) {
            let before = p.children.len();
            p.children.retain(|c| c != child);
            changed |= p.children.len() != before;
        }
        let before = self.edges.len();
        self.edges.retain(|e| !(e.from == parent && e.to == child));
        changed |= self.edges.len() != before;
        changed
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    pub fn node(&self, id: &str) -> Option<&SpellNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut SpellNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ingestion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SpellNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn school(&self, name: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.name == name)
    }

    pub fn school_mut(&mut self, name: &str) -> Option<&mut School> {
        self.schools.iter_mut().find(|s| s.name == name)
    }

    pub fn school_names(&self) -> Vec<String> {
        self.schools.iter().map(|s| s.name.clone()).collect()
    }

    /// Whether `id` names a node belonging to `school`.
    pub fn in_school(&self, id: &str, school: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.school == school)
    }

    pub fn child_count(&self, id: &str) -> usize {
        self.nodes.get(id).map(|n| n.children.len()).unwrap_or(0)
    }

    /// All nodes reachable from `id` by following child links, excluding `id`.
    pub fn descendants_of(&self, id: &str) -> HashSet<NodeId> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<&str> = vec![id];

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for child in &node.children {
                if child != id && seen.insert(child.clone()) {
                    stack.push(child);
                }
            }
        }
        seen
    }

    /// Stable digest of the node and edge set, independent of map order.
    pub fn fingerprint(&self) -> String {
        let mut lines: Vec<String> = self
            .nodes
            .values()
            .map(|n| {
                format!(
                    "node|{}|{}|{}|{}|{}|{}|{}|{}|{}|{:?}",
                    n.id,
                    n.school,
                    n.tier,
                    n.depth,
                    n.children.join(","),
                    n.prerequisites.join(","),
                    n.state,
                    n.is_root,
                    n.is_flower,
                    n.position.map(|p| (p.x.to_bits(), p.y.to_bits())),
                )
            })
            .collect();
        lines.sort();

        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort();

        let mut hasher = Hasher::new();
        for line in &lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        for edge in edges {
            hasher.update(format!("edge|{}|{}\n", edge.from, edge.to).as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

fn reject(school: &str, reason: &str) -> SchoolFailure {
    warn!(school = %school, reason = %reason, "skipping school");
    SchoolFailure {
        school: school.to_string(),
        reason: reason.to_string(),
    }
}
