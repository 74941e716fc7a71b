//! Upgrade values and per-bullet snapshots.
//!
//! Live upgrade state is read through [`UpgradeOracle`]. When a bullet is
//! fired it freezes the current values into an [`UpgradeSnapshot`], so buying
//! an upgrade mid-flight never changes bullets that are already travelling.
//! Any field missing from a snapshot falls back to the live oracle.

/// Read access to the player's current upgrade levels.
pub trait UpgradeOracle {
    /// Flat damage added to StinkyTofu bullets.
    fn stinky_tofu_damage_bonus(&self) -> u32;
    /// Multiplier applied to the NightMarket chain target count.
    fn night_market_chain_multiplier(&self) -> f32;
    /// Subtracted from the NightMarket per-hop decay rate.
    fn night_market_decay_reduction(&self) -> f32;
    /// OysterOmelette executes targets at or below `max / divisor`; 0 disables.
    fn kill_threshold_divisor(&self) -> u32;
    /// Radius in pixels around a BloodCake target that is also slowed.
    fn blood_cake_range_bonus(&self) -> f32;
    /// Added to the OysterOmelette percentage.
    fn oyster_percent_bonus(&self) -> f64;
    /// Seconds shaved off the reload.
    fn reload_time_reduction(&self) -> f32;

    /// Freezes every bullet-facing value.
    fn snapshot(&self) -> UpgradeSnapshot {
        UpgradeSnapshot {
            stinky_tofu_damage_bonus: Some(self.stinky_tofu_damage_bonus()),
            night_market_chain_multiplier: Some(self.night_market_chain_multiplier()),
            night_market_decay_reduction: Some(self.night_market_decay_reduction()),
            kill_threshold_divisor: Some(self.kill_threshold_divisor()),
            blood_cake_range_bonus: Some(self.blood_cake_range_bonus()),
            oyster_percent_bonus: Some(self.oyster_percent_bonus()),
        }
    }
}

/// Mutable upgrade levels owned by the game session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpgradeState {
    pub stinky_tofu_damage_bonus: u32,
    pub night_market_chain_multiplier: f32,
    pub night_market_decay_reduction: f32,
    pub kill_threshold_divisor: u32,
    pub blood_cake_range_bonus: f32,
    pub oyster_percent_bonus: f64,
    pub reload_time_reduction: f32,
    /// Extra magazine capacity.
    pub ammo_capacity_bonus: u32,
}

impl Default for UpgradeState {
    fn default() -> Self {
        Self {
            stinky_tofu_damage_bonus: 0,
            night_market_chain_multiplier: 1.0,
            night_market_decay_reduction: 0.0,
            kill_threshold_divisor: 0,
            blood_cake_range_bonus: 0.0,
            oyster_percent_bonus: 0.0,
            reload_time_reduction: 0.0,
            ammo_capacity_bonus: 0,
        }
    }
}

impl UpgradeOracle for UpgradeState {
    fn stinky_tofu_damage_bonus(&self) -> u32 {
        self.stinky_tofu_damage_bonus
    }

    fn night_market_chain_multiplier(&self) -> f32 {
        self.night_market_chain_multiplier
    }

    fn night_market_decay_reduction(&self) -> f32 {
        self.night_market_decay_reduction
    }

    fn kill_threshold_divisor(&self) -> u32 {
        self.kill_threshold_divisor
    }

    fn blood_cake_range_bonus(&self) -> f32 {
        self.blood_cake_range_bonus
    }

    fn oyster_percent_bonus(&self) -> f64 {
        self.oyster_percent_bonus
    }

    fn reload_time_reduction(&self) -> f32 {
        self.reload_time_reduction
    }
}

/// Upgrade values frozen when a bullet was created.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeSnapshot {
    pub stinky_tofu_damage_bonus: Option<u32>,
    pub night_market_chain_multiplier: Option<f32>,
    pub night_market_decay_reduction: Option<f32>,
    pub kill_threshold_divisor: Option<u32>,
    pub blood_cake_range_bonus: Option<f32>,
    pub oyster_percent_bonus: Option<f64>,
}

/// Snapshot-first view: each value comes from the bullet's snapshot when
/// present, otherwise from live state.
#[derive(Clone, Copy)]
pub struct UpgradeView<'a> {
    snapshot: Option<&'a UpgradeSnapshot>,
    live: &'a dyn UpgradeOracle,
}

impl<'a> UpgradeView<'a> {
    pub fn new(snapshot: Option<&'a UpgradeSnapshot>, live: &'a dyn UpgradeOracle) -> Self {
        Self { snapshot, live }
    }
}

impl UpgradeOracle for UpgradeView<'_> {
    fn stinky_tofu_damage_bonus(&self) -> u32 {
        self.snapshot
            .and_then(|s| s.stinky_tofu_damage_bonus)
            .unwrap_or_else(|| self.live.stinky_tofu_damage_bonus())
    }

    fn night_market_chain_multiplier(&self) -> f32 {
        self.snapshot
            .and_then(|s| s.night_market_chain_multiplier)
            .unwrap_or_else(|| self.live.night_market_chain_multiplier())
    }

    fn night_market_decay_reduction(&self) -> f32 {
        self.snapshot
            .and_then(|s| s.night_market_decay_reduction)
            .unwrap_or_else(|| self.live.night_market_decay_reduction())
    }

    fn kill_threshold_divisor(&self) -> u32 {
        self.snapshot
            .and_then(|s| s.kill_threshold_divisor)
            .unwrap_or_else(|| self.live.kill_threshold_divisor())
    }

    fn blood_cake_range_bonus(&self) -> f32 {
        self.snapshot
            .and_then(|s| s.blood_cake_range_bonus)
            .unwrap_or_else(|| self.live.blood_cake_range_bonus())
    }

    fn oyster_percent_bonus(&self) -> f64 {
        self.snapshot
            .and_then(|s| s.oyster_percent_bonus)
            .unwrap_or_else(|| self.live.oyster_percent_bonus())
    }

    // never frozen per bullet
    fn reload_time_reduction(&self) -> f32 {
        self.live.reload_time_reduction()
    }
}
