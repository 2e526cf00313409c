// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SpellTreeError};
use crate::fs::{FileSystem, RealFileSystem};

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    load_from_path_with_fs(&RealFileSystem, path)
}

/// Same as [`load_from_path`], reading through the given [`FileSystem`].
pub fn load_from_path_with_fs(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs
        .read_to_string(path.as_ref())
        .map_err(SpellTreeError::Other)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks numeric ranges (injection chance, pass budget, prerequisite cap).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    load_and_validate_with_fs(&RealFileSystem, path)
}

pub fn load_and_validate_with_fs(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path_with_fs(fs, path)?;
    ConfigFile::try_from(raw_config)
}

/// Default config location: `Spelltree.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Spelltree.toml")
}
