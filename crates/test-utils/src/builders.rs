#![allow(dead_code)]

use std::collections::BTreeMap;

use spelltree::input::{RawNode, RawSchool, RawTreeDocument};
use spelltree::types::Position;

/// Builder for `RawTreeDocument` to simplify test setup.
pub struct TreeBuilder {
    doc: RawTreeDocument,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            doc: RawTreeDocument {
                version: Some("1.0".to_string()),
                schools: Some(BTreeMap::new()),
            },
        }
    }

    pub fn with_school(self, name: &str, school: SchoolBuilder) -> Self {
        self.with_raw_school(name, school.build())
    }

    pub fn with_raw_school(mut self, name: &str, school: RawSchool) -> Self {
        self.doc
            .schools
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), school);
        self
    }

    pub fn build(self) -> RawTreeDocument {
        self.doc
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.doc).expect("tree document serializes")
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawSchool`.
pub struct SchoolBuilder {
    school: RawSchool,
}

impl SchoolBuilder {
    pub fn new(root: &str) -> Self {
        Self {
            school: RawSchool {
                root: Some(root.to_string()),
                nodes: Some(Vec::new()),
                layout_style: None,
                slice_info: None,
                config: None,
            },
        }
    }

    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.school
            .nodes
            .get_or_insert_with(Vec::new)
            .push(node.build());
        self
    }

    pub fn raw_node(mut self, node: RawNode) -> Self {
        self.school.nodes.get_or_insert_with(Vec::new).push(node);
        self
    }

    pub fn layout_style(mut self, style: &str) -> Self {
        self.school.layout_style = Some(style.to_string());
        self
    }

    pub fn slice_info(mut self, info: serde_json::Value) -> Self {
        self.school.slice_info = Some(info);
        self
    }

    pub fn without_root(mut self) -> Self {
        self.school.root = None;
        self
    }

    pub fn without_nodes(mut self) -> Self {
        self.school.nodes = None;
        self
    }

    pub fn build(self) -> RawSchool {
        self.school
    }
}

/// Builder for `RawNode`.
pub struct NodeBuilder {
    node: RawNode,
}

impl NodeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            node: RawNode {
                form_id: Some(id.to_string()),
                ..RawNode::default()
            },
        }
    }

    /// A node record with no identifier at all.
    pub fn anonymous() -> Self {
        Self {
            node: RawNode::default(),
        }
    }

    pub fn tier(mut self, tier: i64) -> Self {
        self.node.tier = Some(serde_json::Value::from(tier));
        self
    }

    pub fn child(mut self, id: &str) -> Self {
        self.node
            .children
            .get_or_insert_with(Vec::new)
            .push(id.to_string());
        self
    }

    pub fn prereq(mut self, id: &str) -> Self {
        self.node
            .prerequisites
            .get_or_insert_with(Vec::new)
            .push(id.to_string());
        self
    }

    pub fn prereqs(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.prereq(id);
        }
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.node.state = Some(state.to_string());
        self
    }

    pub fn flower(mut self) -> Self {
        self.node.is_flower = Some(true);
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.node.position = Some(Position { x, y });
        self
    }

    pub fn build(self) -> RawNode {
        self.node
    }
}

/// Shorthand: node `id` at `tier` with the given prerequisites.
pub fn spell(id: &str, tier: i64, prereqs: &[&str]) -> NodeBuilder {
    NodeBuilder::new(id).tier(tier).prereqs(prereqs)
}
