//! Combat orchestration and hit resolution.
//!
//! # Architecture
//!
//! - [`CombatSystem`] owns shooting state (magazine, cooldown, reload) and the
//!   special-ammo buff, and drives collision resolution each frame.
//! - [`HandlerRegistry`] maps each [`BulletKind`](crate::entity::BulletKind)
//!   to a [`CollisionHandler`] strategy.
//! - Side effects leave the core through two sinks carried in [`CombatEnv`]:
//!   [`EventSink`] for domain events and [`EffectsSink`] for visuals.

mod context;
mod effects;
mod events;
mod feedback;
pub mod handlers;
mod registry;
mod system;

pub use context::{CombatEnv, HitContext};
pub use effects::{EffectLog, EffectRequest, EffectsSink};
pub use events::{CombatEvent, CombatEventKind, EventLog, EventSink, PublishedEvent};
pub use feedback::apply_hit_feedback;
pub use handlers::{CollisionHandler, HitOutcome};
pub use registry::HandlerRegistry;
pub use system::{CombatSystem, ShootOutcome, ShotRequest, TickSummary};
