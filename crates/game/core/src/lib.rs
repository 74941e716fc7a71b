//! Deterministic combat rules for a wave shooter.
//!
//! `combat-core` defines the value objects, entities and hit-resolution rules
//! and exposes synchronous APIs driven one frame at a time. All combat state
//! changes flow through [`combat::CombatSystem`]; events and visual effects
//! leave through the sinks in [`combat::CombatEnv`], and supporting crates
//! depend on the types re-exported here.
pub mod collision;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod upgrade;
pub mod value;

pub use collision::{check_aabb_collision, find_nearest_enemy};
pub use combat::{
    CollisionHandler, CombatEnv, CombatEvent, CombatEventKind, CombatSystem, EffectLog,
    EffectRequest, EffectsSink, EventLog, EventSink, HandlerRegistry, HitContext, HitOutcome,
    PublishedEvent, ShootOutcome, ShotRequest, TickSummary,
};
pub use config::{
    Arena, BuffTuning, BulletTuning, CombatConfig, EnemyTable, EnemyTuning, FeedbackTuning,
    HealthCurve, HitFeedback, RecipeBinding, Rounding, ShootingTuning,
};
pub use entity::{
    Bullet, BulletId, BulletKind, BulletPool, BulletSpawn, DamageReport, Enemy, EnemyCategory,
    EnemyId, EnemyKind,
};
pub use error::{ErrorSeverity, GameError, ValueError};
pub use upgrade::{UpgradeOracle, UpgradeSnapshot, UpgradeState, UpgradeView};
pub use value::{Ammo, CollisionBox, Damage, Health, Vector2};
