//! Scenario loader.

use std::path::Path;

use tracing::debug;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{Input, Scenario};

/// Loader for scripted scenarios from RON files.
///
/// Example:
/// ```ron
/// (
///     name: "chain_demo",
///     wave: 3,
///     upgrades: (night_market_chain_multiplier: 1.2),
///     enemies: [
///         (kind: ghost, position: (x: 600.0, y: 300.0)),
///         (frame: 30, kind: red_ghost, position: (x: 800.0, y: 320.0)),
///     ],
///     script: [
///         (frame: 0, input: Synthesize("night_market")),
///         (frame: 1, input: Shoot(origin: (x: 100.0, y: 300.0), direction: (x: 1.0, y: 0.0))),
///     ],
/// )
/// ```
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a Scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))?;

        debug!(
            path = %path.display(),
            name = %scenario.name,
            enemies = scenario.enemies.len(),
            inputs = scenario.script.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Parse and check a Scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::check(&scenario)?;
        Ok(scenario)
    }

    fn check(scenario: &Scenario) -> LoadResult<()> {
        for spawn in &scenario.enemies {
            if !spawn.position.is_finite() {
                anyhow::bail!("enemy spawn at frame {} has a non-finite position", spawn.frame);
            }
        }

        for scripted in &scenario.script {
            if let Input::Shoot {
                origin, direction, ..
            } = &scripted.input
            {
                if !(origin.is_finite() && direction.is_finite()) {
                    anyhow::bail!("shot at frame {} has a non-finite vector", scripted.frame);
                }
            }
        }
        Ok(())
    }
}
