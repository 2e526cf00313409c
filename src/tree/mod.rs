// src/tree/mod.rs

//! Prerequisite graph store and the passes that validate and repair it.
//!
//! - [`graph`] owns nodes, edges and school metadata for one parse.
//! - [`reachability`] simulates unlocks from a school root.
//! - [`depth`] assigns BFS depths; [`orphan`] grafts unvisited nodes.
//! - [`repair`] fixes cycles and unreachable nodes.
//! - [`inject`] adds extra, cycle-safe prerequisites.
//! - [`verify`] checks structural invariants.

pub mod depth;
pub mod graph;
pub mod inject;
pub mod node;
pub mod orphan;
pub mod random;
pub mod reachability;
pub mod repair;
pub mod verify;

pub use graph::{IngestSummary, SpellGraph};
pub use inject::InjectionOptions;
pub use node::{School, SchoolFailure, SpellNode};
pub use random::{RandomSource, SeededRandom};
pub use repair::{RepairOptions, RepairOutcome};
pub use verify::Violation;
