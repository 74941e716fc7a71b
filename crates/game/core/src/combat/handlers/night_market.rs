use std::collections::HashSet;

use tracing::debug;

use crate::combat::context::HitContext;
use crate::combat::feedback::apply_hit_feedback;
use crate::entity::Bullet;
use crate::upgrade::UpgradeOracle;
use crate::value::Damage;

use super::{CollisionHandler, HitOutcome};

/// Chain-lightning bullet.
///
/// After the first hit the bolt jumps to the nearest active enemy it has not
/// hit yet, measured from the last target and limited to `chain_range`, until
/// the hit budget runs out or nothing is in range. Each hop multiplies the
/// raw damage by `1 - decay`; rounding is applied per hit only, so the
/// fractional remainder carries along the chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct NightMarketHandler;

impl NightMarketHandler {
    /// Total hits allowed for one chain, never fewer than one.
    pub fn max_hits(chain_targets: u32, multiplier: f32) -> usize {
        (chain_targets as f32 * multiplier).floor().max(1.0) as usize
    }

    /// Effective per-hop decay after the reduction upgrade.
    pub fn decay(decay_rate: f32, reduction: f32) -> f64 {
        f64::from(decay_rate - reduction).clamp(0.0, 1.0)
    }
}

impl CollisionHandler for NightMarketHandler {
    fn name(&self) -> &'static str {
        "night_market"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        let tuning = &ctx.config.bullets.night_market;
        let (chain_targets, decay_rate, chain_range) =
            (tuning.chain_targets, tuning.decay_rate, tuning.chain_range);

        let upgrades = ctx.upgrades_for(bullet);
        // a chain never visits an enemy twice
        let max_hits = Self::max_hits(chain_targets, upgrades.night_market_chain_multiplier())
            .min(ctx.enemies.len().max(1));
        let decay = Self::decay(decay_rate, upgrades.night_market_decay_reduction());

        let mut chained = HashSet::new();
        let mut raw = f64::from(bullet.damage.value());
        let mut current = target;

        loop {
            let enemy = &ctx.enemies[current];
            let (enemy_id, position) = (enemy.id, enemy.position);
            chained.insert(enemy_id);
            bullet.record_hit(enemy_id);

            let damage = Damage::new(raw).unwrap_or(Damage::ZERO);
            ctx.apply_damage(current, damage);
            apply_hit_feedback(ctx, current, bullet.kind);

            if chained.len() >= max_hits {
                break;
            }
            let Some(next) = ctx.find_nearest(position, Some(chain_range), &chained) else {
                break;
            };

            let next_position = ctx.enemies[next].position;
            if let Some(effects) = ctx.effects() {
                effects.create_chain_effect(position, next_position);
            }
            raw *= 1.0 - decay;
            current = next;
        }

        debug!(bullet = %bullet.id, hits = chained.len(), max_hits, "chain resolved");
        HitOutcome::Consumed
    }
}
