//! Data-driven combat content and loaders.
//!
//! This crate houses the on-disk forms of combat data and the loaders for them:
//! - Combat tuning tables (data-driven via TOML)
//! - Scripted scenarios: wave, upgrades, spawns, inputs (data-driven via RON)
//!
//! Content is consumed by the runtime and never changes during a fight.
//!
//! All loaders use combat-core types directly with serde for RON/TOML deserialization.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{EnemySpawn, Input, Scenario, ScriptedInput};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
