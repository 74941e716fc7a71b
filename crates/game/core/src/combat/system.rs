//! Combat orchestrator: shooting, reload, special-ammo buff and collision
//! resolution.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::collision::check_aabb_collision;
use crate::config::CombatConfig;
use crate::entity::{Bullet, BulletId, BulletKind, BulletPool, BulletSpawn, Enemy, EnemyId};
use crate::error::ValueError;
use crate::value::{Ammo, Damage, Vector2};

use super::context::{CombatEnv, HitContext};
use super::events::CombatEvent;
use super::handlers::{HitOutcome, spread_directions};
use super::registry::HandlerRegistry;

/// Where and how the player is shooting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotRequest {
    pub origin: Vector2,
    /// Aim direction; need not be normalized.
    pub direction: Vector2,
    /// Enemy the bullet should home in on, if any.
    pub tracking_target: Option<EnemyId>,
}

impl ShotRequest {
    pub fn new(origin: Vector2, direction: Vector2) -> Self {
        Self {
            origin,
            direction,
            tracking_target: None,
        }
    }

    pub fn tracking(mut self, target: EnemyId) -> Self {
        self.tracking_target = Some(target);
        self
    }
}

/// Result of a shot attempt. Rejections are ordinary outcomes, not errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ShootOutcome {
    Fired {
        kind: BulletKind,
        bullets: Vec<BulletId>,
        /// The shot emptied the magazine and a reload began.
        reload_started: bool,
    },
    Reloading,
    CoolingDown,
    OutOfAmmo,
}

impl ShootOutcome {
    pub fn is_fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

/// What one `update` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Bullet-enemy overlaps resolved by a handler.
    pub hits: usize,
    /// Enemies killed this tick, chain hops included.
    pub kills: usize,
    /// Kind of the buff that ran out this tick.
    pub buff_expired: Option<BulletKind>,
}

/// The combat orchestrator.
///
/// Owns the magazine, the shot cooldown and the special-ammo buff; entity
/// slices and collaborators are passed in per call. The buff countdown kept
/// here is the only thing that ends a buff; the `BuffExpired` scheduled on
/// activation is a notification only, so each activation announces exactly
/// one expiry. A reload ends on whichever comes first, its countdown or the
/// scheduled `ReloadComplete`.
pub struct CombatSystem {
    config: CombatConfig,
    registry: HandlerRegistry,
    ammo: Ammo,
    reloading: bool,
    reload_remaining: f32,
    cooldown_remaining: f32,
    buff: BulletKind,
    buff_remaining: f32,
}

impl CombatSystem {
    pub fn new(config: CombatConfig) -> Result<Self, ValueError> {
        Self::with_registry(config, HandlerRegistry::with_default_handlers())
    }

    pub fn with_registry(
        config: CombatConfig,
        registry: HandlerRegistry,
    ) -> Result<Self, ValueError> {
        config.validate()?;
        let ammo = Ammo::full(config.shooting.magazine_size)?;
        Ok(Self {
            config,
            registry,
            ammo,
            reloading: false,
            reload_remaining: 0.0,
            cooldown_remaining: 0.0,
            buff: BulletKind::None,
            buff_remaining: 0.0,
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    pub fn ammo(&self) -> Ammo {
        self.ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Seconds until the pending reload is due; zero when not reloading.
    pub fn reload_remaining(&self) -> f32 {
        self.reload_remaining
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Bullet kind new shots are fired with.
    pub fn active_buff(&self) -> BulletKind {
        self.buff
    }

    pub fn buff_remaining(&self) -> f32 {
        self.buff_remaining
    }

    pub fn is_buff_active(&self) -> bool {
        self.buff.is_special() && self.buff_remaining > 0.0
    }

    // ------------------------------------------------------------------------
    // Shooting & reload
    // ------------------------------------------------------------------------

    /// Fires one shot (three pellets with BubbleTea) from `pool`.
    ///
    /// Rejected while reloading, while the cooldown runs or with an empty
    /// magazine, in that order. The shot that empties the magazine starts the
    /// reload and schedules `ReloadComplete`.
    pub fn shoot(
        &mut self,
        request: ShotRequest,
        pool: &mut BulletPool,
        env: &mut CombatEnv<'_>,
    ) -> ShootOutcome {
        if self.reloading {
            trace!(remaining = self.reload_remaining, "shot rejected: reloading");
            return ShootOutcome::Reloading;
        }
        if self.cooldown_remaining > 0.0 {
            trace!(remaining = self.cooldown_remaining, "shot rejected: cooling down");
            return ShootOutcome::CoolingDown;
        }
        self.ammo = match self.ammo.consume() {
            Ok(ammo) => ammo,
            Err(_) => {
                trace!("shot rejected: magazine empty");
                return ShootOutcome::OutOfAmmo;
            }
        };
        self.cooldown_remaining = self.config.shooting.cooldown;

        let kind = self.buff;
        let directions = match kind {
            BulletKind::BubbleTea => {
                let spread = &self.config.bullets.bubble_tea;
                spread_directions(request.direction, spread.spread_count, spread.spread_angle)
            }
            _ => spread_directions(request.direction, 1, 0.0),
        };
        let tracking_target = if directions.len() == 1 {
            request.tracking_target
        } else {
            None
        };
        let pierce_count = match kind {
            BulletKind::StinkyTofu => self.config.bullets.stinky_tofu.pierce_count,
            _ => 0,
        };
        let damage = Damage::flat(self.config.bullets.base_damage(kind));
        let upgrades = env.upgrades().snapshot();
        let speed = self.config.shooting.bullet_speed;

        let bullets: Vec<BulletId> = directions
            .into_iter()
            .map(|direction| {
                pool.spawn(BulletSpawn {
                    position: request.origin,
                    velocity: direction * speed,
                    kind,
                    damage,
                    pierce_count,
                    tracking_target,
                    upgrades: Some(upgrades),
                })
            })
            .collect();

        debug!(
            %kind,
            bullets = bullets.len(),
            ammo = %self.ammo,
            "shot fired"
        );

        let reload_started = self.ammo.is_empty();
        if reload_started {
            self.begin_reload(env);
        }

        ShootOutcome::Fired {
            kind,
            bullets,
            reload_started,
        }
    }

    /// Starts a manual reload of a partially spent magazine.
    ///
    /// Returns `false` when the magazine is already full or a reload is in
    /// progress.
    pub fn start_reload(&mut self, env: &mut CombatEnv<'_>) -> bool {
        if self.reloading || self.ammo.is_full() {
            trace!(reloading = self.reloading, ammo = %self.ammo, "reload request ignored");
            return false;
        }
        self.begin_reload(env);
        true
    }

    fn begin_reload(&mut self, env: &mut CombatEnv<'_>) {
        let duration = self
            .config
            .shooting
            .reload_duration_with(env.upgrades().reload_time_reduction());
        self.reloading = true;
        self.reload_remaining = duration;

        info!(duration, "reload started");
        let delay = Duration::try_from_secs_f32(duration).unwrap_or_default();
        env.publish(CombatEvent::ReloadComplete, Some(delay));
    }

    /// Refills the magazine. A duplicate completion is ignored.
    pub fn complete_reload(&mut self) -> bool {
        if !self.reloading {
            trace!("stale reload completion ignored");
            return false;
        }
        self.ammo = self.ammo.reload();
        self.reloading = false;
        self.reload_remaining = 0.0;
        info!(ammo = %self.ammo, "reload complete");
        true
    }

    /// Grows the magazine; the extra rounds are available immediately.
    pub fn apply_ammo_capacity_bonus(&mut self, bonus: u32) {
        self.ammo = self.ammo.add_max_bonus(bonus);
        debug!(bonus, ammo = %self.ammo, "magazine enlarged");
    }

    // ------------------------------------------------------------------------
    // Buff
    // ------------------------------------------------------------------------

    /// Starts a special-ammo buff.
    ///
    /// Ignored while another buff is still running; buffs do not queue.
    pub fn activate_buff(&mut self, kind: BulletKind, env: &mut CombatEnv<'_>) -> bool {
        if !kind.is_special() {
            return false;
        }
        if self.is_buff_active() {
            trace!(active = %self.buff, requested = %kind, "buff already active, trigger ignored");
            return false;
        }

        let duration = self.config.buff.duration;
        if duration <= 0.0 {
            warn!(%kind, duration, "buff duration is not positive, activation skipped");
            return false;
        }

        self.buff = kind;
        self.buff_remaining = duration;
        info!(%kind, duration, "buff activated");
        env.publish(CombatEvent::BuffActivated { kind, duration }, None);
        let delay = Duration::try_from_secs_f32(duration).unwrap_or_default();
        env.publish(CombatEvent::BuffExpired { kind }, Some(delay));
        true
    }

    /// Activates the buff bound to `recipe_id`.
    pub fn handle_synthesis(&mut self, recipe_id: &str, env: &mut CombatEnv<'_>) -> bool {
        match self.config.buff.kind_for_recipe(recipe_id) {
            Some(kind) => self.activate_buff(kind, env),
            None => {
                warn!(recipe_id, "unknown synthesis recipe");
                false
            }
        }
    }

    /// Reacts to an event the core consumes; all others are ignored.
    pub fn handle_event(&mut self, event: &CombatEvent, env: &mut CombatEnv<'_>) -> bool {
        match event {
            CombatEvent::SynthesisTriggered { recipe_id } => self.handle_synthesis(recipe_id, env),
            CombatEvent::ReloadComplete => self.complete_reload(),
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------------

    /// Advances timers by `dt` seconds, then resolves collisions.
    ///
    /// A negative or non-finite `dt` is treated as zero.
    pub fn update(
        &mut self,
        dt: f32,
        bullets: &mut [Bullet],
        enemies: &mut [Enemy],
        env: &mut CombatEnv<'_>,
    ) -> TickSummary {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        if self.reloading {
            self.reload_remaining = (self.reload_remaining - dt).max(0.0);
            if self.reload_remaining <= 0.0 {
                self.complete_reload();
            }
        }

        let mut summary = TickSummary::default();
        if self.buff_remaining > 0.0 {
            self.buff_remaining = (self.buff_remaining - dt).max(0.0);
            if self.buff_remaining <= 0.0 && self.buff.is_special() {
                let kind = std::mem::take(&mut self.buff);
                info!(%kind, "buff expired");
                summary.buff_expired = Some(kind);
            }
        }

        let (hits, kills) = self.resolve_collisions(bullets, enemies, env);
        summary.hits = hits;
        summary.kills = kills;
        summary
    }

    /// Runs every active bullet against every active enemy in slice order.
    ///
    /// A bullet is deactivated as soon as its handler consumes it; a piercing
    /// bullet keeps scanning and can hit several enemies in the same tick.
    fn resolve_collisions(
        &self,
        bullets: &mut [Bullet],
        enemies: &mut [Enemy],
        env: &mut CombatEnv<'_>,
    ) -> (usize, usize) {
        let bullet_hitbox = self.config.shooting.bullet_hitbox;
        let mut ctx = HitContext::new(enemies, &self.config, env);
        let mut hits = 0;

        for bullet in bullets.iter_mut().filter(|bullet| bullet.active) {
            let handler = self.registry.handler_for(bullet.kind);

            for index in 0..ctx.enemies.len() {
                if !bullet.active {
                    break;
                }

                let enemy = &ctx.enemies[index];
                if !enemy.is_active() || bullet.has_hit(enemy.id) {
                    continue;
                }
                if !check_aabb_collision(bullet.position, bullet_hitbox, enemy.position, enemy.hitbox)
                {
                    continue;
                }

                hits += 1;
                trace!(bullet = %bullet.id, enemy = %enemy.id, handler = handler.name(), "collision");
                if handler.on_hit(bullet, index, &mut ctx) == HitOutcome::Consumed {
                    bullet.deactivate();
                }
            }
        }

        (hits, ctx.kills())
    }
}
