use tracing::{debug, warn};

use crate::combat::context::HitContext;
use crate::combat::feedback::apply_hit_feedback;
use crate::entity::Bullet;
use crate::upgrade::UpgradeOracle;
use crate::value::Damage;

use super::{CollisionHandler, HitOutcome};

/// Percentage bullet.
///
/// Damage is a share of the target's *current* health, rounded up, with the
/// share depending on the enemy category. With the execute upgrade, a target
/// left at or below `max / divisor` is finished off.
#[derive(Clone, Copy, Debug, Default)]
pub struct OysterOmeletteHandler;

impl CollisionHandler for OysterOmeletteHandler {
    fn name(&self) -> &'static str {
        "oyster_omelette"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        let enemy = &ctx.enemies[target];
        let (enemy_id, position, current) = (enemy.id, enemy.position, enemy.health().current());
        let base = ctx
            .config
            .bullets
            .oyster_omelette
            .percent_for(enemy.kind.category());

        let upgrades = ctx.upgrades_for(bullet);
        let mut percent = base + upgrades.oyster_percent_bonus();
        if percent.is_nan() {
            warn!(base, "omelette percentage bonus is not a number, ignoring it");
            percent = base;
        }
        let percent = percent.clamp(0.0, 1.0);
        let divisor = upgrades.kill_threshold_divisor();

        let damage = Damage::from_percentage(current, percent).unwrap_or(Damage::ZERO);

        bullet.record_hit(enemy_id);
        let report = ctx.apply_damage(target, damage);

        if !report.killed && divisor > 0 {
            let health = ctx.enemies[target].health();
            if health.current() <= health.max() / divisor {
                debug!(enemy = %enemy_id, %health, divisor, "execute threshold reached");
                ctx.kill(target);
            }
        }

        if let Some(effects) = ctx.effects() {
            effects.create_explosion_effect(position);
        }
        apply_hit_feedback(ctx, target, bullet.kind);
        HitOutcome::Consumed
    }
}
