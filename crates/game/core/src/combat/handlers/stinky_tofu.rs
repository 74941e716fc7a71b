use tracing::debug;

use crate::combat::context::HitContext;
use crate::combat::feedback::apply_hit_feedback;
use crate::entity::Bullet;
use crate::upgrade::UpgradeOracle;
use crate::value::Damage;

use super::{CollisionHandler, HitOutcome};

/// Piercing bullet.
///
/// Each hit spends one unit of the bullet's pierce budget; the bullet stays
/// in flight until the budget is exhausted, so `pierce_count + 1` enemies are
/// hit in total.
#[derive(Clone, Copy, Debug, Default)]
pub struct StinkyTofuHandler;

impl CollisionHandler for StinkyTofuHandler {
    fn name(&self) -> &'static str {
        "stinky_tofu"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        let bonus = ctx.upgrades_for(bullet).stinky_tofu_damage_bonus();
        let damage = Damage::flat(bullet.damage.value().saturating_add(bonus));
        let enemy = &ctx.enemies[target];
        let (enemy_id, position) = (enemy.id, enemy.position);

        bullet.record_hit(enemy_id);
        ctx.apply_damage(target, damage);
        apply_hit_feedback(ctx, target, bullet.kind);

        if bullet.pierce_remaining == 0 {
            return HitOutcome::Consumed;
        }

        bullet.pierce_remaining -= 1;
        debug!(
            bullet = %bullet.id,
            enemy = %enemy_id,
            remaining = bullet.pierce_remaining,
            "bullet pierced"
        );
        if let Some(effects) = ctx.effects() {
            effects.create_pierce_effect(position);
        }
        HitOutcome::Pierced
    }
}
