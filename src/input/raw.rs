// src/input/raw.rs

//! Serde model of the externally generated tree document.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "schools": {
//!     "Destruction": {
//!       "root": "0x00012FCD",
//!       "layoutStyle": "radial",
//!       "nodes": [
//!         { "formId": "0x00012FCD", "children": ["0x0001C789"], "tier": 0 },
//!         { "formId": "0x0001C789", "prerequisites": ["0x00012FCD"], "tier": 1 }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Every field is optional at this level; defaults are applied explicitly
//! during ingestion, never through implicit arithmetic later on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawTreeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Keyed by school name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<BTreeMap<String, RawSchool>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<RawNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_info: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    /// Kept as raw JSON: generators emit `1`, `1.0` and `"1"` alike. Read
    /// leniently at ingestion, see [`SpellNode::from_raw`](crate::tree::SpellNode::from_raw).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,

    /// Free-form tag; unknown values fall back to `locked` at ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_flower: Option<bool>,

    /// Present when the node came from an alternate layout pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}
