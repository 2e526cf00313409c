// src/config/mod.rs

//! Configuration loading and validation for spelltree.
//!
//! - TOML-backed data model (`model.rs`).
//! - Loading from disk (`loader.rs`).
//! - Range checks on repair/injection knobs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_and_validate_with_fs, load_from_path};
pub use model::{ConfigFile, InjectionSection, InputSection, RawConfigFile, RepairSection, MAX_REPAIR_PASSES};
pub use validate::validate_config;
