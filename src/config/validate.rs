// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, MAX_REPAIR_PASSES};
use crate::errors::{Result, SpellTreeError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SpellTreeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.input, raw.repair, raw.injection))
    }
}

/// Run every semantic check on a raw config.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_raw_config(cfg)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_repair(cfg)?;
    validate_injection(cfg)?;
    Ok(())
}

fn validate_repair(cfg: &RawConfigFile) -> Result<()> {
    let passes = cfg.repair.max_passes;
    if passes == 0 || passes > MAX_REPAIR_PASSES {
        return Err(SpellTreeError::Config(format!(
            "[repair].max_passes must be in 1..={MAX_REPAIR_PASSES} (got {passes})"
        )));
    }
    Ok(())
}

fn validate_injection(cfg: &RawConfigFile) -> Result<()> {
    let inj = &cfg.injection;

    if inj.chance > 100 {
        return Err(SpellTreeError::Config(format!(
            "[injection].chance must be a percentage in 0..=100 (got {})",
            inj.chance
        )));
    }

    if inj.max_prerequisites == 0 {
        return Err(SpellTreeError::Config(
            "[injection].max_prerequisites must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
