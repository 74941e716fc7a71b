use crate::combat::context::HitContext;
use crate::combat::feedback::apply_hit_feedback;
use crate::entity::Bullet;
use crate::upgrade::UpgradeOracle;

use super::{CollisionHandler, HitOutcome};

/// Slowing bullet.
///
/// A surviving target gets one slow stack. With the range upgrade, every
/// other living enemy within that radius of the target is slowed as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct BloodCakeHandler;

impl CollisionHandler for BloodCakeHandler {
    fn name(&self) -> &'static str {
        "blood_cake"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        let tuning = &ctx.config.bullets.blood_cake;
        let (factor, duration) = (tuning.slow_factor, tuning.slow_duration);
        let range = ctx.upgrades_for(bullet).blood_cake_range_bonus();

        bullet.record_hit(ctx.enemies[target].id);
        let report = ctx.apply_damage(target, bullet.damage);

        let center = ctx.enemies[target].position;
        if !report.killed {
            ctx.enemies[target].apply_slow_debuff(factor, duration);
        }

        if range > 0.0 {
            for (index, enemy) in ctx.enemies.iter_mut().enumerate() {
                if index != target && enemy.is_active() && enemy.position.distance(center) <= range
                {
                    enemy.apply_slow_debuff(factor, duration);
                }
            }
        }

        apply_hit_feedback(ctx, target, bullet.kind);
        HitOutcome::Consumed
    }
}
