//! Frame-driven combat session.

use combat_core::{
    BulletPool, CombatConfig, CombatEnv, CombatEvent, CombatEventKind, CombatSystem,
    EffectsSink, Enemy, EnemyId, EnemyKind, EventSink, ShootOutcome, ShotRequest, TickSummary,
    UpgradeState, Vector2,
};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::events::EventQueue;

/// What one [`CombatSession::tick`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Frame number of this tick, starting at 0.
    pub frame: u64,
    pub summary: TickSummary,
    /// Events delivered by the queue this tick, in delivery order.
    pub delivered: Vec<CombatEvent>,
}

impl TickReport {
    pub fn kills(&self) -> usize {
        self.summary.kills
    }

    pub fn count(&self, kind: CombatEventKind) -> usize {
        self.delivered
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }
}

/// Owns everything a fight needs and drives it one frame at a time.
///
/// Each tick moves bullets and enemies, lets the orchestrator resolve
/// collisions, then drains the event queue, feeding `SynthesisTriggered` and
/// `ReloadComplete` back into the orchestrator.
pub struct CombatSession {
    combat: CombatSystem,
    pool: BulletPool,
    enemies: Vec<Enemy>,
    upgrades: UpgradeState,
    queue: EventQueue,
    effects: Option<Box<dyn EffectsSink>>,
    wave: u32,
    next_enemy_id: u32,
    frame: u64,
}

/// Builds the collaborator bundle from disjoint session fields.
fn combat_env<'a>(
    upgrades: &'a UpgradeState,
    queue: &'a mut EventQueue,
    effects: &'a mut Option<Box<dyn EffectsSink>>,
) -> CombatEnv<'a> {
    let env = CombatEnv::new(upgrades).with_events(queue);
    match effects.as_deref_mut() {
        Some(effects) => env.with_effects(effects),
        None => env,
    }
}

impl CombatSession {
    pub fn new(config: CombatConfig) -> Result<Self> {
        Ok(Self {
            combat: CombatSystem::new(config)?,
            pool: BulletPool::new(),
            enemies: Vec::new(),
            upgrades: UpgradeState::default(),
            queue: EventQueue::new(),
            effects: None,
            wave: 1,
            next_enemy_id: 0,
            frame: 0,
        })
    }

    /// Attaches a renderer-side effects sink.
    pub fn with_effects(mut self, effects: Box<dyn EffectsSink>) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn combat(&self) -> &CombatSystem {
        &self.combat
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.pool
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_active()).count()
    }

    pub fn upgrades(&self) -> &UpgradeState {
        &self.upgrades
    }

    /// Replaces the upgrade levels. Growth of `ammo_capacity_bonus` is
    /// forwarded to the magazine.
    pub fn set_upgrades(&mut self, upgrades: UpgradeState) {
        let added = upgrades
            .ammo_capacity_bonus
            .saturating_sub(self.upgrades.ammo_capacity_bonus);
        self.upgrades = upgrades;
        if added > 0 {
            self.combat.apply_ammo_capacity_bonus(added);
        }
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Wave used to scale the health of enemies spawned from now on.
    pub fn set_wave(&mut self, wave: u32) {
        info!(wave, "wave started");
        self.wave = wave;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawns an enemy with health scaled for the current wave.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vector2) -> Result<EnemyId> {
        let id = EnemyId(self.next_enemy_id);
        let enemy = Enemy::spawn(id, kind, self.wave, position, &self.combat.config().enemies)?;
        self.next_enemy_id = self
            .next_enemy_id
            .checked_add(1)
            .ok_or(RuntimeError::EnemyIdsExhausted)?;

        debug!(enemy = %id, %kind, health = %enemy.health(), %position, "enemy spawned");
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Drops dead enemies from the list.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(Enemy::is_active);
        before - self.enemies.len()
    }

    pub fn shoot(&mut self, request: ShotRequest) -> ShootOutcome {
        let mut env = combat_env(&self.upgrades, &mut self.queue, &mut self.effects);
        self.combat.shoot(request, &mut self.pool, &mut env)
    }

    pub fn start_reload(&mut self) -> bool {
        let mut env = combat_env(&self.upgrades, &mut self.queue, &mut self.effects);
        self.combat.start_reload(&mut env)
    }

    pub fn apply_ammo_capacity_bonus(&mut self, bonus: u32) {
        self.upgrades.ammo_capacity_bonus = self.upgrades.ammo_capacity_bonus.saturating_add(bonus);
        self.combat.apply_ammo_capacity_bonus(bonus);
    }

    /// Announces a finished synthesis; the buff starts when the event is
    /// delivered on the next tick.
    pub fn trigger_synthesis(&mut self, recipe_id: impl Into<String>) {
        let recipe_id = recipe_id.into();
        debug!(%recipe_id, "synthesis triggered");
        self.queue
            .publish(CombatEvent::SynthesisTriggered { recipe_id }, None);
    }

    /// Advances the fight by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let arena = self.combat.config().arena;

        for bullet in self.pool.as_mut_slice() {
            bullet.advance(dt, &self.enemies, &arena);
        }
        for enemy in &mut self.enemies {
            enemy.advance(dt);
        }

        let summary = {
            let mut env = combat_env(&self.upgrades, &mut self.queue, &mut self.effects);
            self.combat
                .update(dt, self.pool.as_mut_slice(), &mut self.enemies, &mut env)
        };

        let delivered = self.queue.advance(dt);
        let mut env = combat_env(&self.upgrades, &mut self.queue, &mut self.effects);
        for event in &delivered {
            self.combat.handle_event(event, &mut env);
        }

        let report = TickReport {
            frame: self.frame,
            summary,
            delivered,
        };
        self.frame += 1;
        report
    }
}
