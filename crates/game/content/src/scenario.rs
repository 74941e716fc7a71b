//! Scripted combat scenarios.
//!
//! A scenario fixes the wave number, the player's upgrades, when and where
//! enemies appear and a frame-indexed list of player inputs, so a fight can be
//! replayed headlessly and deterministically.

use combat_core::{EnemyKind, UpgradeState, Vector2};

/// One enemy placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    /// Frame the enemy appears on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: u64,
    pub kind: EnemyKind,
    pub position: Vector2,
}

/// A player input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Fire from `origin` toward `direction`, optionally homing on an enemy id.
    Shoot {
        origin: Vector2,
        direction: Vector2,
        #[cfg_attr(feature = "serde", serde(default))]
        target: Option<u32>,
    },
    /// Complete a synthesis recipe.
    Synthesize(String),
    /// Manual reload.
    Reload,
    /// Grow the magazine by this many rounds.
    AmmoBonus(u32),
}

/// An input scheduled for a frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedInput {
    pub frame: u64,
    pub input: Input,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    /// Wave number used for enemy health scaling.
    pub wave: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrades: UpgradeState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemySpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub script: Vec<ScriptedInput>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, wave: u32) -> Self {
        Self {
            name: name.into(),
            wave,
            ..Self::default()
        }
    }

    /// Inputs scheduled for `frame`, in script order.
    pub fn inputs_at(&self, frame: u64) -> impl Iterator<Item = &Input> + '_ {
        self.script
            .iter()
            .filter(move |scripted| scripted.frame == frame)
            .map(|scripted| &scripted.input)
    }

    /// Enemies appearing on `frame`, in declaration order.
    pub fn spawns_at(&self, frame: u64) -> impl Iterator<Item = &EnemySpawn> + '_ {
        self.enemies.iter().filter(move |spawn| spawn.frame == frame)
    }

    /// Last frame that has a scripted input or spawn.
    pub fn last_frame(&self) -> u64 {
        let inputs = self.script.iter().map(|scripted| scripted.frame);
        let spawns = self.enemies.iter().map(|spawn| spawn.frame);
        inputs.chain(spawns).max().unwrap_or(0)
    }
}
