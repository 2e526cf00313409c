// src/engine/report.rs

use crate::tree::SchoolFailure;
use crate::types::{NodeId, SchoolName};

/// Summary of one parse/repair/injection cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub schools: Vec<SchoolReport>,
    pub failures: Vec<SchoolFailure>,
    /// Every ingested node id, for cross-referencing against the content source.
    pub ingested_ids: Vec<NodeId>,
    /// Prerequisite edges stripped from roots after reconciliation.
    pub root_edges_removed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolReport {
    pub school: SchoolName,
    pub orphans_reattached: usize,
    pub fixes: usize,
    pub injected: usize,
    pub fully_reachable: bool,
}

impl ParseReport {
    pub fn school(&self, name: &str) -> Option<&SchoolReport> {
        self.schools.iter().find(|s| s.school == name)
    }

    pub fn total_fixes(&self) -> usize {
        self.schools.iter().map(|s| s.fixes).sum()
    }

    pub fn total_injected(&self) -> usize {
        self.schools.iter().map(|s| s.injected).sum()
    }

    pub fn all_reachable(&self) -> bool {
        self.schools.iter().all(|s| s.fully_reachable)
    }
}
