use crate::combat::context::HitContext;
use crate::combat::feedback::apply_hit_feedback;
use crate::entity::Bullet;

use super::{CollisionHandler, HitOutcome};

/// Plain bullet: deals its stamped damage to the first enemy it touches.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalHandler;

impl CollisionHandler for NormalHandler {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        bullet.record_hit(ctx.enemies[target].id);
        ctx.apply_damage(target, bullet.damage);
        apply_hit_feedback(ctx, target, bullet.kind);
        HitOutcome::Consumed
    }
}
