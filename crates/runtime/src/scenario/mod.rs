//! Scripted playback of a [`Scenario`].
//!
//! Enemies are spawned in declaration order on their frame, so the n-th
//! spawned enemy gets `EnemyId(n)`; a scripted shot's `target` refers to that
//! index.

use combat_content::{Input, Scenario};
use combat_core::{
    CombatConfig, CombatEvent, CombatEventKind, EnemyId, EnemyKind, ShootOutcome, ShotRequest,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::session::{CombatSession, TickReport};

/// One enemy death observed during playback.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeathRecord {
    pub frame: u64,
    pub enemy_id: u32,
    pub kind: EnemyKind,
}

/// Aggregate outcome of a scenario run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub frames: u64,
    pub shots_fired: usize,
    pub bullets_spawned: usize,
    pub shots_rejected: usize,
    pub hits: usize,
    pub kills: usize,
    pub deaths: Vec<DeathRecord>,
    pub buffs_activated: usize,
    pub buffs_expired: usize,
    pub reloads: usize,
    pub surviving_enemies: usize,
    pub ammo_remaining: u32,
}

/// Drives a [`CombatSession`] from a scenario script.
pub struct ScenarioRunner {
    scenario: Scenario,
    session: CombatSession,
    summary: RunSummary,
}

impl ScenarioRunner {
    pub fn new(config: CombatConfig, scenario: Scenario) -> Result<Self> {
        let mut session = CombatSession::new(config)?;
        session.set_wave(scenario.wave);
        session.set_upgrades(scenario.upgrades.clone());

        let summary = RunSummary {
            scenario: scenario.name.clone(),
            ..RunSummary::default()
        };
        Ok(Self {
            scenario,
            session,
            summary,
        })
    }

    pub fn session(&self) -> &CombatSession {
        &self.session
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Applies this frame's spawns and inputs, then ticks once.
    pub fn step(&mut self, dt: f32) -> Result<TickReport> {
        let frame = self.session.frame();

        for spawn in self.scenario.spawns_at(frame) {
            self.session.spawn_enemy(spawn.kind, spawn.position)?;
        }

        let inputs: Vec<Input> = self.scenario.inputs_at(frame).cloned().collect();
        for input in inputs {
            self.apply(frame, input)?;
        }

        let report = self.session.tick(dt);
        self.record(&report);
        Ok(report)
    }

    /// Runs `frames` ticks of `dt` seconds and returns the totals.
    pub fn run(mut self, frames: u64, dt: f32) -> Result<RunSummary> {
        info!(scenario = %self.scenario.name, frames, dt, "scenario started");
        for _ in 0..frames {
            self.step(dt)?;
        }
        Ok(self.finish())
    }

    /// Frames needed to play the whole script plus `tail` extra frames.
    pub fn suggested_frames(&self, tail: u64) -> u64 {
        self.scenario.last_frame() + 1 + tail
    }

    pub fn finish(mut self) -> RunSummary {
        self.summary.frames = self.session.frame();
        self.summary.surviving_enemies = self.session.living_enemies();
        self.summary.ammo_remaining = self.session.combat().ammo().current();
        info!(
            scenario = %self.summary.scenario,
            kills = self.summary.kills,
            surviving = self.summary.surviving_enemies,
            "scenario finished"
        );
        self.summary
    }

    fn apply(&mut self, frame: u64, input: Input) -> Result<()> {
        match input {
            Input::Shoot {
                origin,
                direction,
                target,
            } => {
                let mut request = ShotRequest::new(origin, direction);
                if let Some(index) = target {
                    let spawned = self.session.enemies().len();
                    if index as usize >= spawned {
                        return Err(RuntimeError::UnknownTarget {
                            scenario: self.scenario.name.clone(),
                            index,
                            spawned,
                        });
                    }
                    request = request.tracking(EnemyId(index));
                }

                match self.session.shoot(request) {
                    ShootOutcome::Fired { bullets, .. } => {
                        self.summary.shots_fired += 1;
                        self.summary.bullets_spawned += bullets.len();
                    }
                    rejected => {
                        debug!(frame, outcome = ?rejected, "scripted shot rejected");
                        self.summary.shots_rejected += 1;
                    }
                }
            }
            Input::Synthesize(recipe_id) => self.session.trigger_synthesis(recipe_id),
            Input::Reload => {
                self.session.start_reload();
            }
            Input::AmmoBonus(bonus) => self.session.apply_ammo_capacity_bonus(bonus),
        }
        Ok(())
    }

    fn record(&mut self, report: &TickReport) {
        self.summary.hits += report.summary.hits;
        self.summary.kills += report.summary.kills;
        self.summary.buffs_activated += report.count(CombatEventKind::BuffActivated);
        self.summary.buffs_expired += report.count(CombatEventKind::BuffExpired);
        self.summary.reloads += report.count(CombatEventKind::ReloadComplete);

        for event in &report.delivered {
            debug!(frame = report.frame, kind = %event.kind(), ?event, "event delivered");
            if let CombatEvent::EnemyDeath { enemy_id, kind, .. } = event {
                self.summary.deaths.push(DeathRecord {
                    frame: report.frame,
                    enemy_id: enemy_id.0,
                    kind: *kind,
                });
            }
        }
    }
}
