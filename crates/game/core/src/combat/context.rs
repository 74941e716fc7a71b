//! Collaborators handed to the combat core for one call.

use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use crate::collision::find_nearest_enemy;
use crate::config::CombatConfig;
use crate::entity::{Bullet, DamageReport, Enemy, EnemyId};
use crate::upgrade::{UpgradeOracle, UpgradeView};
use crate::value::{Damage, Vector2};

use super::effects::EffectsSink;
use super::events::{CombatEvent, EventSink};

/// External services the orchestrator talks to.
///
/// Only the upgrade provider is mandatory; without an event sink or effects
/// sink the corresponding side effects are skipped.
pub struct CombatEnv<'a> {
    upgrades: &'a dyn UpgradeOracle,
    events: Option<&'a mut dyn EventSink>,
    effects: Option<&'a mut dyn EffectsSink>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(upgrades: &'a dyn UpgradeOracle) -> Self {
        Self {
            upgrades,
            events: None,
            effects: None,
        }
    }

    pub fn with_events(mut self, events: &'a mut dyn EventSink) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_effects(mut self, effects: &'a mut dyn EffectsSink) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn upgrades(&self) -> &'a dyn UpgradeOracle {
        self.upgrades
    }

    pub fn publish(&mut self, event: CombatEvent, delay: Option<Duration>) {
        if let Some(events) = self.events.as_deref_mut() {
            events.publish(event, delay);
        }
    }

    pub fn effects(&mut self) -> Option<&mut (dyn EffectsSink + 'a)> {
        self.effects.as_deref_mut()
    }
}

/// What a handler sees while resolving one bullet hit.
pub struct HitContext<'c, 'e> {
    pub enemies: &'c mut [Enemy],
    pub config: &'c CombatConfig,
    env: &'c mut CombatEnv<'e>,
    kills: usize,
}

impl<'c, 'e> HitContext<'c, 'e> {
    pub fn new(
        enemies: &'c mut [Enemy],
        config: &'c CombatConfig,
        env: &'c mut CombatEnv<'e>,
    ) -> Self {
        Self {
            enemies,
            config,
            env,
            kills: 0,
        }
    }

    /// Upgrade values for `bullet`: its snapshot first, live state otherwise.
    pub fn upgrades_for<'s>(&'s self, bullet: &'s Bullet) -> UpgradeView<'s> {
        UpgradeView::new(bullet.upgrades.as_ref(), self.env.upgrades())
    }

    /// Damages the enemy at `target` and publishes its death if this hit
    /// killed it.
    pub fn apply_damage(&mut self, target: usize, damage: Damage) -> DamageReport {
        let Some(enemy) = self.enemies.get_mut(target) else {
            return DamageReport::NONE;
        };

        let report = enemy.take_damage(damage);
        debug!(
            enemy = %enemy.id,
            damage = damage.value(),
            dealt = report.dealt,
            health = %enemy.health(),
            "enemy hit"
        );

        if report.killed {
            self.record_death(target);
        }
        report
    }

    /// Removes the target's remaining health outright.
    pub fn kill(&mut self, target: usize) -> DamageReport {
        let Some(enemy) = self.enemies.get_mut(target) else {
            return DamageReport::NONE;
        };

        let report = enemy.kill();
        if report.killed {
            debug!(enemy = %enemy.id, "enemy executed");
            self.record_death(target);
        }
        report
    }

    fn record_death(&mut self, target: usize) {
        let enemy = &self.enemies[target];
        let event = CombatEvent::EnemyDeath {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: enemy.position,
        };
        self.kills += 1;
        self.env.publish(event, None);
    }

    /// Nearest active enemy to `origin`, see [`find_nearest_enemy`].
    pub fn find_nearest(
        &self,
        origin: Vector2,
        max_range: Option<f32>,
        exclude: &HashSet<EnemyId>,
    ) -> Option<usize> {
        find_nearest_enemy(&*self.enemies, origin, max_range, exclude)
    }

    pub fn effects(&mut self) -> Option<&mut (dyn EffectsSink + 'e)> {
        self.env.effects()
    }

    /// Enemies killed through this context so far.
    pub fn kills(&self) -> usize {
        self.kills
    }
}
