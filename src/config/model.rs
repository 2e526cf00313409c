// src/config/model.rs

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [input]
/// sanitize_encoding = true
///
/// [repair]
/// preserve_multi_prerequisites = false
///
/// [injection]
/// enabled = true
/// chance = 30
/// max_prerequisites = 3
/// min_depth = 2
/// prefer_same_tier = true
/// seed = 42
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub repair: RepairSection,

    #[serde(default)]
    pub injection: InjectionSection,
}

/// Validated configuration. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub input: InputSection,
    pub repair: RepairSection,
    pub injection: InjectionSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        input: InputSection,
        repair: RepairSection,
        injection: InjectionSection,
    ) -> Self {
        Self {
            input,
            repair,
            injection,
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSection {
    /// Reinterpret non-UTF-8 input as Windows-1252 instead of failing.
    #[serde(default = "default_true")]
    pub sanitize_encoding: bool,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            sanitize_encoding: true,
        }
    }
}

/// Upper bound on `[repair].max_passes`; also its default.
pub const MAX_REPAIR_PASSES: usize = 10;

/// `[repair]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RepairSection {
    /// Leave nodes with a mix of obtainable and unobtainable prerequisites
    /// untouched during the iterative repair loop.
    #[serde(default)]
    pub preserve_multi_prerequisites: bool,

    /// Upper bound on iterative repair passes per school, in `1..=10`.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl Default for RepairSection {
    fn default() -> Self {
        Self {
            preserve_multi_prerequisites: false,
            max_passes: default_max_passes(),
        }
    }
}

/// `[injection]` section: procedural prerequisite injection.
#[derive(Debug, Clone, Deserialize)]
pub struct InjectionSection {
    #[serde(default)]
    pub enabled: bool,

    /// Per-node chance, in percent (0..=100).
    #[serde(default = "default_chance")]
    pub chance: u32,

    /// Nodes already at this many prerequisites are skipped.
    #[serde(default = "default_max_prerequisites")]
    pub max_prerequisites: usize,

    /// Nodes shallower than this depth are skipped.
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,

    /// Prefer candidates exactly one level above the node.
    #[serde(default = "default_true")]
    pub prefer_same_tier: bool,

    /// Fixed seed for reproducible selection; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for InjectionSection {
    fn default() -> Self {
        Self {
            enabled: false,
            chance: default_chance(),
            max_prerequisites: default_max_prerequisites(),
            min_depth: default_min_depth(),
            prefer_same_tier: true,
            seed: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_passes() -> usize {
    MAX_REPAIR_PASSES
}

fn default_chance() -> u32 {
    30
}

fn default_max_prerequisites() -> usize {
    3
}

fn default_min_depth() -> u32 {
    2
}
