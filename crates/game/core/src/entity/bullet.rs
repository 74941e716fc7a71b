//! Projectiles.

use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::Arena;
use crate::upgrade::UpgradeSnapshot;
use crate::value::{Damage, Vector2};

use super::{Enemy, EnemyId};

/// Identifier of a pooled bullet slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletId(pub u32);

impl fmt::Display for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bullet#{}", self.0)
    }
}

/// Special ammo type. `None` is the plain bullet fired without a buff.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BulletKind {
    #[default]
    None,
    NightMarket,
    StinkyTofu,
    BubbleTea,
    BloodCake,
    OysterOmelette,
}

impl BulletKind {
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Parameters for (re)initialising a pooled bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSpawn {
    pub position: Vector2,
    pub velocity: Vector2,
    pub kind: BulletKind,
    pub damage: Damage,
    pub pierce_count: u32,
    pub tracking_target: Option<EnemyId>,
    pub upgrades: Option<UpgradeSnapshot>,
}

/// A projectile owned by a [`super::BulletPool`].
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: BulletId,
    pub position: Vector2,
    pub velocity: Vector2,
    pub kind: BulletKind,
    pub damage: Damage,
    pub active: bool,
    pub tracking_target: Option<EnemyId>,
    pub upgrades: Option<UpgradeSnapshot>,
    /// Additional enemies this bullet may still pass through.
    pub pierce_remaining: u32,
    hit_enemies: Vec<EnemyId>,
}

impl Bullet {
    /// Creates an inactive bullet slot.
    pub fn new(id: BulletId) -> Self {
        Self {
            id,
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            kind: BulletKind::None,
            damage: Damage::ZERO,
            active: false,
            tracking_target: None,
            upgrades: None,
            pierce_remaining: 0,
            hit_enemies: Vec::new(),
        }
    }

    /// Creates an active bullet directly, bypassing the pool.
    pub fn spawned(id: BulletId, spawn: BulletSpawn) -> Self {
        let mut bullet = Self::new(id);
        bullet.spawn(spawn);
        bullet
    }

    /// Re-arms this slot with fresh state.
    pub fn spawn(&mut self, spawn: BulletSpawn) {
        self.reset();
        self.position = spawn.position;
        self.velocity = spawn.velocity;
        self.kind = spawn.kind;
        self.damage = spawn.damage;
        self.pierce_remaining = spawn.pierce_count;
        self.tracking_target = spawn.tracking_target;
        self.upgrades = spawn.upgrades;
        self.active = true;
    }

    /// Clears all state so the slot can be reused.
    pub fn reset(&mut self) {
        self.position = Vector2::ZERO;
        self.velocity = Vector2::ZERO;
        self.kind = BulletKind::None;
        self.damage = Damage::ZERO;
        self.active = false;
        self.tracking_target = None;
        self.upgrades = None;
        self.pierce_remaining = 0;
        self.hit_enemies.clear();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether this bullet already damaged `enemy`.
    pub fn has_hit(&self, enemy: EnemyId) -> bool {
        self.hit_enemies.contains(&enemy)
    }

    pub fn record_hit(&mut self, enemy: EnemyId) {
        if !self.has_hit(enemy) {
            self.hit_enemies.push(enemy);
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hit_enemies.len()
    }

    /// Moves the bullet and retires it once it leaves the arena.
    ///
    /// A tracking bullet re-aims at its target every step while the target is
    /// alive, keeping its speed; once the target is gone it flies straight.
    pub fn advance(&mut self, dt: f32, enemies: &[Enemy], arena: &Arena) {
        if !self.active {
            return;
        }

        if let Some(target) = self.tracking_target {
            match enemies.iter().find(|enemy| enemy.id == target && enemy.is_active()) {
                Some(enemy) => {
                    let speed = self.velocity.length();
                    let heading = (enemy.position - self.position).normalized();
                    if heading != Vector2::ZERO {
                        self.velocity = heading * speed;
                    }
                }
                None => self.tracking_target = None,
            }
        }

        self.position += self.velocity * dt;
        if !arena.contains(self.position) {
            self.deactivate();
        }
    }
}
