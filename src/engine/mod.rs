// src/engine/mod.rs

//! Orchestration of the validation/repair passes.
//!
//! [`pipeline::run_pipeline`] is the pure batch transformation;
//! [`TreeParser`] wraps it with the stored source document, the random
//! source and the observers notified after each cycle.

pub mod observer;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use observer::TreeObserver;
pub use parser::TreeParser;
pub use pipeline::{run_pipeline, ParsedTree};
pub use report::{ParseReport, SchoolReport};
