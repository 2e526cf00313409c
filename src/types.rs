use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a spell node (e.g. a hex form id like `"0x00012FCD"`).
pub type NodeId = String;

/// Name of a magic school (e.g. `"Destruction"`).
pub type SchoolName = String;

/// Unlock state of a node as seen by the presentation layer.
///
/// The repair engine only ever assigns `Available` (to roots); every other
/// node keeps whatever state it was ingested with, `Locked` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Locked,
    Available,
    Learned,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState::Locked
    }
}

impl FromStr for NodeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "locked" => Ok(NodeState::Locked),
            "available" => Ok(NodeState::Available),
            "learned" => Ok(NodeState::Learned),
            other => Err(format!(
                "invalid node state: {other} (expected \"locked\", \"available\" or \"learned\")"
            )),
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeState::Locked => "locked",
            NodeState::Available => "available",
            NodeState::Learned => "learned",
        };
        f.write_str(s)
    }
}

/// A prerequisite edge: `from` must be unlocked before `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// 2D position written by the external layout stage.
///
/// Carried through untouched; the repair engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
