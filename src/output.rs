// src/output.rs

//! Serializable view of a finalized graph, handed to the layout/rendering
//! collaborator.

use serde::Serialize;
use serde_json::Value;

use crate::tree::SpellGraph;
use crate::types::{Edge, NodeId, NodeState, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeOutput {
    pub nodes: Vec<NodeOutput>,
    pub edges: Vec<Edge>,
    pub schools: Vec<SchoolOutput>,
    pub all_ids: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutput {
    pub id: NodeId,
    pub school: String,
    pub tier: u32,
    pub depth: u32,
    pub children: Vec<NodeId>,
    pub prerequisites: Vec<NodeId>,
    pub state: NodeState,
    pub is_root: bool,
    pub is_flower: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolOutput {
    pub name: String,
    pub root: NodeId,
    pub node_ids: Vec<NodeId>,
    pub max_depth: u32,
    pub max_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl TreeOutput {
    pub fn from_graph(graph: &SpellGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| NodeOutput {
                id: n.id.clone(),
                school: n.school.clone(),
                tier: n.tier,
                depth: n.depth,
                children: n.children.clone(),
                prerequisites: n.prerequisites.clone(),
                state: n.state,
                is_root: n.is_root,
                is_flower: n.is_flower,
                position: n.position,
            })
            .collect();

        let schools = graph
            .schools()
            .iter()
            .map(|s| SchoolOutput {
                name: s.name.clone(),
                root: s.root.clone(),
                node_ids: s.node_ids.clone(),
                max_depth: s.max_depth,
                max_width: s.max_width,
                layout_style: s.layout_style.clone(),
                slice_info: s.slice_info.clone(),
                config: s.config.clone(),
            })
            .collect();

        Self {
            nodes,
            edges: graph.edges().to_vec(),
            schools,
            all_ids: graph.node_ids().to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
