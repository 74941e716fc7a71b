//! Enemies and their transient status effects.

use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::EnemyTable;
use crate::error::ValueError;
use crate::value::{CollisionBox, Damage, Health, Vector2};

/// Identifier assigned by the spawner; unique within a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EnemyKind {
    Ghost,
    RedGhost,
    GreenGhost,
    BlueGhost,
    Boss,
}

/// Balance bracket an enemy kind belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EnemyCategory {
    Ghost,
    Elite,
    Boss,
}

impl EnemyKind {
    pub const fn category(self) -> EnemyCategory {
        match self {
            Self::Ghost => EnemyCategory::Ghost,
            Self::RedGhost | Self::GreenGhost | Self::BlueGhost => EnemyCategory::Elite,
            Self::Boss => EnemyCategory::Boss,
        }
    }

    pub const fn is_elite(self) -> bool {
        matches!(self.category(), EnemyCategory::Elite)
    }

    pub const fn is_boss(self) -> bool {
        matches!(self, Self::Boss)
    }
}

/// One stack of movement slow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowDebuff {
    /// Fraction of speed removed, in `[0, 1]`.
    pub factor: f32,
    pub remaining: f32,
}

/// Push applied over a short window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Knockback {
    pub velocity: Vector2,
    pub remaining: f32,
}

/// Hit tint read by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flash {
    pub color: u32,
    /// Milliseconds left, kept integral so equality is exact.
    pub remaining_ms: u32,
}

/// Result of a single damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    /// Health actually removed.
    pub dealt: u32,
    /// True only on the hit that brought health to zero.
    pub killed: bool,
}

impl DamageReport {
    pub const NONE: Self = Self {
        dealt: 0,
        killed: false,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vector2,
    pub hitbox: CollisionBox,
    health: Health,
    base_speed: f32,
    active: bool,
    slows: Vec<SlowDebuff>,
    knockback: Option<Knockback>,
    flash: Option<Flash>,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        kind: EnemyKind,
        health: Health,
        position: Vector2,
        hitbox: CollisionBox,
        base_speed: f32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            hitbox,
            health,
            base_speed,
            active: health.is_alive(),
            slows: Vec::new(),
            knockback: None,
            flash: None,
        }
    }

    /// Creates an enemy with health scaled for `wave`.
    pub fn spawn(
        id: EnemyId,
        kind: EnemyKind,
        wave: u32,
        position: Vector2,
        table: &EnemyTable,
    ) -> Result<Self, ValueError> {
        let tuning = table.for_kind(kind);
        let health = Health::full(tuning.health.max_health(wave))?;
        Ok(Self::new(id, kind, health, position, tuning.hitbox, tuning.speed))
    }

    pub const fn health(&self) -> Health {
        self.health
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    pub fn knockback(&self) -> Option<Knockback> {
        self.knockback
    }

    pub fn slow_stacks(&self) -> usize {
        self.slows.len()
    }

    /// Current speed factor; stacks multiply, so two 10% slows give 0.81.
    pub fn speed_multiplier(&self) -> f32 {
        self.slows.iter().map(|slow| 1.0 - slow.factor).product()
    }

    /// Applies damage; an inactive enemy ignores it.
    ///
    /// Reaching zero health deactivates the enemy permanently.
    pub fn take_damage(&mut self, damage: Damage) -> DamageReport {
        if !self.active {
            return DamageReport::NONE;
        }

        let before = self.health.current();
        self.health = self.health.take_damage(damage);
        let killed = self.health.is_dead();
        if killed {
            self.active = false;
        }

        DamageReport {
            dealt: before - self.health.current(),
            killed,
        }
    }

    /// Removes all remaining health.
    pub fn kill(&mut self) -> DamageReport {
        self.take_damage(Damage::flat(self.health.current()))
    }

    /// Adds one slow stack; ignored on dead enemies.
    pub fn apply_slow_debuff(&mut self, factor: f32, duration: f32) {
        if !self.active || duration <= 0.0 {
            return;
        }
        self.slows.push(SlowDebuff {
            factor: factor.clamp(0.0, 1.0),
            remaining: duration,
        });
    }

    /// Starts a push, replacing any push still in progress.
    pub fn apply_knockback(&mut self, velocity: Vector2, duration: f32) {
        if !self.active || duration <= 0.0 {
            return;
        }
        self.knockback = Some(Knockback {
            velocity,
            remaining: duration,
        });
    }

    pub fn apply_flash(&mut self, color: u32, duration: f32) {
        self.flash = Some(Flash {
            color,
            remaining_ms: (duration.max(0.0) * 1000.0).round() as u32,
        });
    }

    /// Walks toward the player (leftward), then applies knockback and ticks
    /// status timers.
    pub fn advance(&mut self, dt: f32) {
        if !self.active || dt <= 0.0 {
            return;
        }

        let speed = self.base_speed * self.speed_multiplier();
        self.position.x -= speed * dt;

        if let Some(mut push) = self.knockback.take() {
            let step = dt.min(push.remaining);
            self.position += push.velocity * step;
            push.remaining -= step;
            if push.remaining > 0.0 {
                self.knockback = Some(push);
            }
        }

        for slow in &mut self.slows {
            slow.remaining -= dt;
        }
        self.slows.retain(|slow| slow.remaining > 0.0);

        if let Some(mut flash) = self.flash.take() {
            let elapsed = (dt * 1000.0).round() as u32;
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed);
            if flash.remaining_ms > 0 {
                self.flash = Some(flash);
            }
        }
    }
}
