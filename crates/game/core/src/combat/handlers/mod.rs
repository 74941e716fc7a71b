//! Per-bullet-kind collision strategies.
//!
//! Every special ammo resolves a hit differently. A [`CollisionHandler`] gets
//! the bullet, the index of the enemy it overlapped, and a [`HitContext`]
//! exposing the enemy slice, the damage-and-death path, the nearest-enemy
//! search and upgrade values. Handlers are registered per [`BulletKind`] in
//! [`super::HandlerRegistry`].
//!
//! # Contract
//!
//! - Damage goes through [`HitContext::apply_damage`] (or [`HitContext::kill`])
//!   so deaths are published exactly once.
//! - Every damaged enemy receives [`super::apply_hit_feedback`] once.
//! - Every damaged enemy is recorded on the bullet so a piercing bullet never
//!   hits the same enemy twice.
//!
//! [`BulletKind`]: crate::entity::BulletKind

mod blood_cake;
mod bubble_tea;
mod night_market;
mod normal;
mod oyster_omelette;
mod stinky_tofu;

pub use blood_cake::BloodCakeHandler;
pub use bubble_tea::{BubbleTeaHandler, spread_directions};
pub use night_market::NightMarketHandler;
pub use normal::NormalHandler;
pub use oyster_omelette::OysterOmeletteHandler;
pub use stinky_tofu::StinkyTofuHandler;

use crate::entity::Bullet;

use super::context::HitContext;

/// What happens to the bullet after a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The bullet is spent and will be deactivated.
    Consumed,
    /// The bullet keeps flying and may hit further enemies.
    Pierced,
}

/// Hit resolution strategy for one bullet kind.
pub trait CollisionHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolves `bullet` hitting the enemy at `ctx.enemies[target]`.
    ///
    /// `target` is always a valid index of an active enemy the bullet has not
    /// hit before.
    fn on_hit(&self, bullet: &mut Bullet, target: usize, ctx: &mut HitContext<'_, '_>)
    -> HitOutcome;
}
