// src/engine/parser.rs

use tracing::debug;

use crate::config::ConfigFile;
use crate::engine::observer::TreeObserver;
use crate::engine::pipeline::{run_pipeline, ParsedTree};
use crate::input::RawTreeDocument;
use crate::tree::{RandomSource, SeededRandom};

/// Owns the canonical raw document and produces fresh graphs from it.
///
/// The stored document is never mutated, so [`TreeParser::reparse`]
/// discards every repair and injection made by earlier cycles.
pub struct TreeParser {
    source: RawTreeDocument,
    config: ConfigFile,
    rng: Box<dyn RandomSource>,
    observers: Vec<Box<dyn TreeObserver>>,
}

impl TreeParser {
    /// Randomness is seeded from `[injection].seed` when set.
    pub fn new(source: RawTreeDocument, config: ConfigFile) -> Self {
        let rng = SeededRandom::from_optional_seed(config.injection.seed);
        Self {
            source,
            config,
            rng: Box::new(rng),
            observers: Vec::new(),
        }
    }

    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn TreeObserver>) {
        self.observers.push(observer);
    }

    pub fn source(&self) -> &RawTreeDocument {
        &self.source
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Parse with injection as configured by `[injection].enabled`.
    pub fn parse(&mut self) -> ParsedTree {
        let inject = self.config.injection.enabled;
        self.reparse(inject)
    }

    /// Rebuild the graph from the stored document from scratch.
    pub fn reparse(&mut self, inject: bool) -> ParsedTree {
        debug!(inject, "building tree from stored source");
        let parsed = run_pipeline(&self.source, &self.config, self.rng.as_mut(), inject);
        for observer in self.observers.iter_mut() {
            observer.on_tree_ready(&parsed.graph, &parsed.report);
        }
        parsed
    }
}
