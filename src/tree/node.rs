// src/tree/node.rs

//! Node and school records held by [`SpellGraph`](crate::tree::SpellGraph).

use serde_json::Value;
use tracing::warn;

use crate::input::RawNode;
use crate::types::{NodeId, NodeState, Position, SchoolName};

/// A spell in the prerequisite graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellNode {
    pub id: NodeId,
    pub school: SchoolName,
    /// Externally supplied difficulty ranking.
    pub tier: u32,
    /// BFS distance from the school root along child edges.
    pub depth: u32,
    pub children: Vec<NodeId>,
    /// Unique, ordered.
    pub prerequisites: Vec<NodeId>,
    pub state: NodeState,
    pub is_root: bool,
    pub is_flower: bool,
    /// Owned by the layout stage; passed through untouched.
    pub position: Option<Position>,
}

impl SpellNode {
    /// Build a node from its raw record, applying the documented defaults:
    /// tier 0, depth 0, empty lists, `Locked`.
    ///
    /// Tiers may be integers, floats or numeric strings; fractions truncate
    /// and negatives clamp to 0. An unreadable tier or an unknown state falls
    /// back to its default with a warning.
    ///
    /// Self references and duplicate ids are dropped from both lists.
    /// Returns `None` when the raw record has no identifier.
    pub fn from_raw(school: &str, raw: &RawNode) -> Option<Self> {
        let id = raw.form_id.as_ref()?.trim().to_string();
        if id.is_empty() {
            return None;
        }

        let tier = match raw.tier.as_ref() {
            None | Some(Value::Null) => 0,
            Some(value) => read_tier(value).unwrap_or_else(|| {
                warn!(school = %school, node = %id, tier = %value, "unreadable tier; using 0");
                0
            }),
        };

        let state = match raw.state.as_deref() {
            None => NodeState::default(),
            Some(tag) => tag.parse().unwrap_or_else(|err: String| {
                warn!(school = %school, node = %id, error = %err, "unknown state; using locked");
                NodeState::default()
            }),
        };

        let children = clean_id_list(&id, raw.children.as_deref().unwrap_or(&[]));
        let prerequisites = clean_id_list(&id, raw.prerequisites.as_deref().unwrap_or(&[]));

        Some(Self {
            id,
            school: school.to_string(),
            tier,
            depth: 0,
            children,
            prerequisites,
            state,
            is_root: false,
            is_flower: raw.is_flower.unwrap_or(false),
            position: raw.position,
        })
    }

    pub fn has_prerequisite(&self, id: &str) -> bool {
        self.prerequisites.iter().any(|p| p == id)
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.iter().any(|c| c == id)
    }
}

fn read_tier(value: &Value) -> Option<u32> {
    let tier = match value {
        Value::Number(n) => n.as_i64().map(|t| t as f64).or_else(|| n.as_f64())?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !tier.is_finite() {
        return None;
    }
    Some(tier.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

fn clean_id_list(owner: &str, ids: &[String]) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.trim();
        if id.is_empty() || id == owner || out.iter().any(|existing| existing == id) {
            continue;
        }
        out.push(id.to_string());
    }
    out
}

/// Per-school metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct School {
    pub name: SchoolName,
    pub root: NodeId,
    /// Member ids in ingestion order.
    pub node_ids: Vec<NodeId>,
    pub max_depth: u32,
    /// Largest number of nodes sharing one depth.
    pub max_width: usize,
    pub layout_style: Option<String>,
    pub slice_info: Option<Value>,
    pub config: Option<Value>,
}

impl School {
    pub fn contains(&self, id: &str) -> bool {
        self.node_ids.iter().any(|n| n == id)
    }
}

/// A school that could not be ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolFailure {
    pub school: SchoolName,
    pub reason: String,
}
