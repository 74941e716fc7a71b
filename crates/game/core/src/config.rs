//! Combat tuning table.
//!
//! Every number the rules depend on lives here so it can be overridden from a
//! data file without recompiling. Each section implements `Default` with the
//! shipped values, and with the `serde` feature every field is optional in the
//! on-disk form.

use crate::entity::{BulletKind, EnemyCategory, EnemyKind};
use crate::error::{ValueError, ensure_finite, ensure_non_negative, ensure_positive};
use crate::value::{CollisionBox, Vector2};

/// Complete tuning for the combat core.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub shooting: ShootingTuning,
    pub buff: BuffTuning,
    pub bullets: BulletTuning,
    pub feedback: FeedbackTuning,
    pub enemies: EnemyTable,
    pub arena: Arena,
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every numeric field for values the rules cannot work with.
    pub fn validate(&self) -> Result<(), ValueError> {
        let shooting = &self.shooting;
        ensure_non_negative("shooting.cooldown", f64::from(shooting.cooldown))?;
        ensure_non_negative("shooting.reload_duration", f64::from(shooting.reload_duration))?;
        ensure_non_negative(
            "shooting.min_reload_duration",
            f64::from(shooting.min_reload_duration),
        )?;
        ensure_positive("shooting.magazine_size", f64::from(shooting.magazine_size))?;
        ensure_non_negative("shooting.bullet_speed", f64::from(shooting.bullet_speed))?;

        ensure_non_negative("buff.duration", f64::from(self.buff.duration))?;

        let bullets = &self.bullets;
        ensure_unit("bullets.blood_cake.slow_factor", bullets.blood_cake.slow_factor)?;
        ensure_non_negative(
            "bullets.blood_cake.slow_duration",
            f64::from(bullets.blood_cake.slow_duration),
        )?;
        ensure_unit("bullets.oyster_omelette.boss_percent", bullets.oyster_omelette.boss_percent)?;
        ensure_unit(
            "bullets.oyster_omelette.elite_percent",
            bullets.oyster_omelette.elite_percent,
        )?;
        ensure_unit(
            "bullets.oyster_omelette.ghost_percent",
            bullets.oyster_omelette.ghost_percent,
        )?;
        ensure_unit("bullets.night_market.decay_rate", bullets.night_market.decay_rate)?;
        ensure_non_negative(
            "bullets.night_market.chain_range",
            f64::from(bullets.night_market.chain_range),
        )?;
        ensure_finite(
            "bullets.bubble_tea.spread_angle",
            f64::from(bullets.bubble_tea.spread_angle),
        )?;

        ensure_positive(
            "feedback.knockback_duration",
            f64::from(self.feedback.knockback_duration),
        )?;
        ensure_non_negative(
            "feedback.knockback_distance",
            f64::from(self.feedback.knockback_distance),
        )?;

        for tuning in [&self.enemies.ghost, &self.enemies.elite, &self.enemies.boss] {
            ensure_non_negative("enemies.speed", f64::from(tuning.speed))?;
            ensure_finite("enemies.health.base", tuning.health.base)?;
            ensure_finite("enemies.health.per_wave", tuning.health.per_wave)?;
        }

        ensure_positive("arena.width", f64::from(self.arena.width))?;
        ensure_positive("arena.height", f64::from(self.arena.height))?;
        Ok(())
    }
}

fn ensure_unit(field: &'static str, value: impl Into<f64>) -> Result<(), ValueError> {
    let value = ensure_finite(field, value.into())?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValueError::PercentageOutOfRange { value });
    }
    Ok(())
}

// ============================================================================
// Shooting
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShootingTuning {
    /// Seconds between shots.
    pub cooldown: f32,
    /// Seconds to refill an empty magazine before upgrades.
    pub reload_duration: f32,
    /// Lower bound for the reload after reduction upgrades.
    pub min_reload_duration: f32,
    pub magazine_size: u32,
    /// Pixels per second.
    pub bullet_speed: f32,
    pub bullet_hitbox: CollisionBox,
}

impl ShootingTuning {
    pub const DEFAULT_COOLDOWN: f32 = 0.2;
    pub const DEFAULT_RELOAD_DURATION: f32 = 3.0;
    pub const DEFAULT_MIN_RELOAD_DURATION: f32 = 0.5;
    pub const DEFAULT_BULLET_SPEED: f32 = 600.0;

    /// Reload time after subtracting `reduction`, never below the minimum.
    pub fn reload_duration_with(&self, reduction: f32) -> f32 {
        (self.reload_duration - reduction.max(0.0)).max(self.min_reload_duration)
    }
}

impl Default for ShootingTuning {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
            reload_duration: Self::DEFAULT_RELOAD_DURATION,
            min_reload_duration: Self::DEFAULT_MIN_RELOAD_DURATION,
            magazine_size: crate::value::Ammo::DEFAULT_CAPACITY,
            bullet_speed: Self::DEFAULT_BULLET_SPEED,
            bullet_hitbox: CollisionBox::square(16.0),
        }
    }
}

// ============================================================================
// Buff
// ============================================================================

/// Maps a synthesis recipe to the special ammo it grants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeBinding {
    pub recipe_id: String,
    pub kind: BulletKind,
}

impl RecipeBinding {
    pub fn new(recipe_id: impl Into<String>, kind: BulletKind) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffTuning {
    /// Seconds a special-ammo buff stays active.
    pub duration: f32,
    pub recipes: Vec<RecipeBinding>,
}

impl BuffTuning {
    pub const DEFAULT_DURATION: f32 = 2.0;

    /// Bullet kind granted by `recipe_id`, if the recipe is known.
    pub fn kind_for_recipe(&self, recipe_id: &str) -> Option<BulletKind> {
        self.recipes
            .iter()
            .find(|binding| binding.recipe_id == recipe_id)
            .map(|binding| binding.kind)
    }
}

impl Default for BuffTuning {
    fn default() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
            recipes: vec![
                RecipeBinding::new("stinky_tofu", BulletKind::StinkyTofu),
                RecipeBinding::new("night_market", BulletKind::NightMarket),
                RecipeBinding::new("bubble_tea", BulletKind::BubbleTea),
                RecipeBinding::new("blood_cake", BulletKind::BloodCake),
                RecipeBinding::new("oyster_omelette", BulletKind::OysterOmelette),
            ],
        }
    }
}

// ============================================================================
// Bullets
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BulletTuning {
    pub normal: NormalTuning,
    pub stinky_tofu: StinkyTofuTuning,
    pub blood_cake: BloodCakeTuning,
    pub oyster_omelette: OysterOmeletteTuning,
    pub night_market: NightMarketTuning,
    pub bubble_tea: BubbleTeaTuning,
}

impl BulletTuning {
    /// Flat damage stamped on a freshly fired bullet of `kind`.
    ///
    /// OysterOmelette damage depends on the target, so its bullets carry zero.
    pub fn base_damage(&self, kind: BulletKind) -> u32 {
        match kind {
            BulletKind::None => self.normal.damage,
            BulletKind::StinkyTofu => self.stinky_tofu.damage,
            BulletKind::BloodCake => self.blood_cake.damage,
            BulletKind::NightMarket => self.night_market.damage,
            BulletKind::BubbleTea => self.bubble_tea.damage,
            BulletKind::OysterOmelette => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalTuning {
    pub damage: u32,
}

impl Default for NormalTuning {
    fn default() -> Self {
        Self { damage: 1 }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StinkyTofuTuning {
    pub damage: u32,
    /// Extra enemies a bullet passes through; total hits = `pierce_count + 1`.
    pub pierce_count: u32,
}

impl Default for StinkyTofuTuning {
    fn default() -> Self {
        Self {
            damage: 2,
            pierce_count: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BloodCakeTuning {
    pub damage: u32,
    /// Fraction of speed removed per stack.
    pub slow_factor: f32,
    /// Seconds.
    pub slow_duration: f32,
}

impl Default for BloodCakeTuning {
    fn default() -> Self {
        Self {
            damage: 2,
            slow_factor: 0.1,
            slow_duration: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OysterOmeletteTuning {
    pub boss_percent: f64,
    pub elite_percent: f64,
    pub ghost_percent: f64,
}

impl OysterOmeletteTuning {
    pub fn percent_for(&self, category: EnemyCategory) -> f64 {
        match category {
            EnemyCategory::Boss => self.boss_percent,
            EnemyCategory::Elite => self.elite_percent,
            EnemyCategory::Ghost => self.ghost_percent,
        }
    }
}

impl Default for OysterOmeletteTuning {
    fn default() -> Self {
        Self {
            boss_percent: 0.10,
            elite_percent: 0.50,
            ghost_percent: 0.70,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NightMarketTuning {
    /// Damage of the first hit in a chain.
    pub damage: u32,
    /// Fraction of damage lost per hop.
    pub decay_rate: f32,
    /// Total hits per chain before the upgrade multiplier.
    pub chain_targets: u32,
    /// Maximum hop distance in pixels.
    pub chain_range: f32,
}

impl Default for NightMarketTuning {
    fn default() -> Self {
        Self {
            damage: 2,
            decay_rate: 0.2,
            chain_targets: 5,
            chain_range: 300.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BubbleTeaTuning {
    pub damage: u32,
    /// Bullets per shot.
    pub spread_count: u32,
    /// Degrees between neighbouring bullets.
    pub spread_angle: f32,
}

impl Default for BubbleTeaTuning {
    fn default() -> Self {
        Self {
            damage: 1,
            spread_count: 3,
            spread_angle: 15.0,
        }
    }
}

// ============================================================================
// Hit feedback
// ============================================================================

/// Flash and shake parameters for one bullet kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitFeedback {
    /// `0xRRGGBB` tint.
    pub flash_color: u32,
    pub flash_duration: f32,
    pub shake_magnitude: f32,
    pub shake_duration: f32,
}

impl HitFeedback {
    pub const fn new(
        flash_color: u32,
        flash_duration: f32,
        shake_magnitude: f32,
        shake_duration: f32,
    ) -> Self {
        Self {
            flash_color,
            flash_duration,
            shake_magnitude,
            shake_duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedbackTuning {
    /// Pixels pushed to the right per hit.
    pub knockback_distance: f32,
    /// Seconds over which the push is spread.
    pub knockback_duration: f32,
    pub normal: HitFeedback,
    pub stinky_tofu: HitFeedback,
    pub night_market: HitFeedback,
    pub bubble_tea: HitFeedback,
    pub blood_cake: HitFeedback,
    pub oyster_omelette: HitFeedback,
}

impl FeedbackTuning {
    pub const DEFAULT_KNOCKBACK_DISTANCE: f32 = 15.0;
    pub const DEFAULT_KNOCKBACK_DURATION: f32 = 0.08;

    pub fn for_kind(&self, kind: BulletKind) -> HitFeedback {
        match kind {
            BulletKind::None => self.normal,
            BulletKind::StinkyTofu => self.stinky_tofu,
            BulletKind::NightMarket => self.night_market,
            BulletKind::BubbleTea => self.bubble_tea,
            BulletKind::BloodCake => self.blood_cake,
            BulletKind::OysterOmelette => self.oyster_omelette,
        }
    }

    /// Knockback velocity so the full distance is covered in the duration.
    pub fn knockback_velocity(&self) -> Vector2 {
        Vector2::RIGHT * (self.knockback_distance / self.knockback_duration)
    }
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            knockback_distance: Self::DEFAULT_KNOCKBACK_DISTANCE,
            knockback_duration: Self::DEFAULT_KNOCKBACK_DURATION,
            normal: HitFeedback::new(0xFFFFFF, 0.10, 2.0, 0.10),
            stinky_tofu: HitFeedback::new(0x9ACD32, 0.15, 3.0, 0.12),
            night_market: HitFeedback::new(0xFFD700, 0.12, 4.0, 0.15),
            bubble_tea: HitFeedback::new(0xD2B48C, 0.10, 2.0, 0.08),
            blood_cake: HitFeedback::new(0x8B0000, 0.20, 3.0, 0.12),
            oyster_omelette: HitFeedback::new(0xFFA500, 0.20, 6.0, 0.25),
        }
    }
}

// ============================================================================
// Enemies
// ============================================================================

/// How a health curve turns its raw value into an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    Floor,
    Round,
}

/// `base + (wave - first_wave) * per_wave`, rounded, never below 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthCurve {
    pub base: f64,
    pub per_wave: f64,
    pub first_wave: u32,
    pub rounding: Rounding,
}

impl HealthCurve {
    pub const fn new(base: f64, per_wave: f64, first_wave: u32, rounding: Rounding) -> Self {
        Self {
            base,
            per_wave,
            first_wave,
            rounding,
        }
    }

    /// Maximum health for an enemy spawned in `wave`.
    pub fn max_health(&self, wave: u32) -> f64 {
        let raw = self.base + (f64::from(wave) - f64::from(self.first_wave)) * self.per_wave;
        let rounded = match self.rounding {
            Rounding::Floor => raw.floor(),
            Rounding::Round => raw.round(),
        };
        rounded.max(1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTuning {
    pub hitbox: CollisionBox,
    /// Pixels per second before slows.
    pub speed: f32,
    pub health: HealthCurve,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTable {
    pub ghost: EnemyTuning,
    pub elite: EnemyTuning,
    pub boss: EnemyTuning,
}

impl EnemyTable {
    pub fn for_kind(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind.category() {
            EnemyCategory::Ghost => &self.ghost,
            EnemyCategory::Elite => &self.elite,
            EnemyCategory::Boss => &self.boss,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            ghost: EnemyTuning {
                hitbox: CollisionBox::square(48.0),
                speed: 60.0,
                health: HealthCurve::new(1.0, 0.03, 1, Rounding::Floor),
            },
            elite: EnemyTuning {
                hitbox: CollisionBox::square(56.0),
                speed: 50.0,
                health: HealthCurve::new(2.0, 0.6, 1, Rounding::Round),
            },
            boss: EnemyTuning {
                hitbox: CollisionBox::square(128.0),
                speed: 25.0,
                health: HealthCurve::new(10.0, 1.5, 5, Rounding::Round),
            },
        }
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Playfield bounds; bullets beyond `margin` outside it are retired.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Arena {
    pub fn contains(&self, position: Vector2) -> bool {
        position.x >= -self.margin
            && position.x <= self.width + self.margin
            && position.y >= -self.margin
            && position.y <= self.height + self.margin
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            margin: 50.0,
        }
    }
}
