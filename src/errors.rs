// src/errors.rs

//! Crate-wide error type.
//!
//! Only structurally unparseable input ends up here. Cycles, orphans and
//! unreachable nodes are repaired in place and never surface as errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpellTreeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Tree document has no `schools` mapping")]
    MissingSchools,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SpellTreeError>;
