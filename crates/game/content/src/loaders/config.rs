//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
///
/// Every section and field is optional; anything left out keeps its built-in
/// default. The result is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a CombatConfig from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid combat config {}: {}", path.display(), e))?;

        debug!(path = %path.display(), "combat config loaded");
        Ok(config)
    }

    /// Parse and validate a CombatConfig from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), CombatConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_fields() {
        let config = ConfigLoader::parse("[shooting]\ncooldown = 0.5\n").unwrap();
        assert_eq!(config.shooting.cooldown, 0.5);
        assert_eq!(config.shooting.magazine_size, 6);
        assert_eq!(config.buff, CombatConfig::default().buff);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = ConfigLoader::parse("[bullets.night_market]\ndecay_rate = 2.0\n").unwrap_err();
        assert!(error.to_string().contains("percentage"), "{error}");

        let error = ConfigLoader::parse("[shooting.bullet_hitbox]\nwidth = 0.0\nheight = 4.0\n")
            .unwrap_err();
        assert!(error.to_string().contains("parse"), "{error}");
    }
}
