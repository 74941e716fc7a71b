use combat_core::{
    Bullet, BulletId, BulletKind, BulletSpawn, CollisionBox, CombatConfig, CombatEnv,
    CombatEvent, CombatEventKind, CombatSystem, Damage, EffectLog, EffectRequest, Enemy, EnemyId,
    EnemyKind, EventLog, Health, TickSummary, UpgradeSnapshot, UpgradeState, Vector2,
};

const DT: f32 = 1.0 / 60.0;

fn enemy(id: u32, kind: EnemyKind, health: Health, x: f32, y: f32) -> Enemy {
    let size = match kind {
        EnemyKind::Boss => 128.0,
        EnemyKind::Ghost => 48.0,
        _ => 56.0,
    };
    Enemy::new(
        EnemyId(id),
        kind,
        health,
        Vector2::new(x, y),
        CollisionBox::new(size, size).unwrap(),
        0.0,
    )
}

fn ghost(id: u32, hp: f64, x: f32, y: f32) -> Enemy {
    enemy(id, EnemyKind::Ghost, Health::full(hp).unwrap(), x, y)
}

fn bullet(kind: BulletKind, damage: u32, pierce_count: u32, x: f32, y: f32) -> Bullet {
    Bullet::spawned(
        BulletId(0),
        BulletSpawn {
            position: Vector2::new(x, y),
            velocity: Vector2::new(600.0, 0.0),
            kind,
            damage: Damage::flat(damage),
            pierce_count,
            tracking_target: None,
            upgrades: None,
        },
    )
}

fn combat() -> CombatSystem {
    CombatSystem::new(CombatConfig::default()).unwrap()
}

fn step(
    combat: &mut CombatSystem,
    bullets: &mut [Bullet],
    enemies: &mut [Enemy],
    upgrades: &UpgradeState,
    log: &mut EventLog,
    effects: &mut EffectLog,
) -> TickSummary {
    let mut env = CombatEnv::new(upgrades)
        .with_events(log)
        .with_effects(effects);
    combat.update(DT, bullets, enemies, &mut env)
}

#[test]
fn normal_bullet_kills_one_hp_ghost() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::None, 1, 0, 500.0, 300.0)];
    let mut enemies = vec![ghost(7, 1.0, 510.0, 300.0)];

    let summary = step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(summary.hits, 1);
    assert_eq!(summary.kills, 1);
    assert!(!enemies[0].is_active());
    assert!(!bullets[0].active);
    let deaths: Vec<_> = log.events().collect();
    assert_eq!(
        deaths,
        vec![&CombatEvent::EnemyDeath {
            enemy_id: EnemyId(7),
            kind: EnemyKind::Ghost,
            position: Vector2::new(510.0, 300.0),
        }]
    );
}

#[test]
fn normal_bullet_chips_wave_five_boss() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let table = CombatConfig::default().enemies;
    let boss = Enemy::spawn(EnemyId(1), EnemyKind::Boss, 5, Vector2::new(600.0, 300.0), &table)
        .unwrap();
    assert_eq!(boss.health().max(), 10);

    let mut bullets = vec![bullet(BulletKind::None, 1, 0, 560.0, 300.0)];
    let mut enemies = vec![boss];
    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(enemies[0].health().current(), 9);
    assert!(enemies[0].is_active());
    assert!(!bullets[0].active);
    assert!(log.is_empty());
}

#[test]
fn stinky_tofu_pierces_two_overlapping_ghosts_in_one_tick() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::StinkyTofu, 2, 1, 505.0, 300.0)];
    let mut enemies = vec![ghost(1, 1.0, 500.0, 300.0), ghost(2, 1.0, 510.0, 300.0)];

    let summary = step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(summary.hits, 2);
    assert_eq!(summary.kills, 2);
    assert!(enemies.iter().all(|enemy| !enemy.is_active()));
    assert!(!bullets[0].active);
    assert_eq!(log.count(CombatEventKind::EnemyDeath), 2);
    let pierces = effects
        .requests()
        .iter()
        .filter(|request| matches!(request, EffectRequest::Pierce { .. }))
        .count();
    assert_eq!(pierces, 1);
}

#[test]
fn stinky_tofu_stays_in_flight_until_budget_is_spent() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::StinkyTofu, 2, 1, 500.0, 300.0)];
    let mut enemies = vec![ghost(1, 1.0, 500.0, 300.0), ghost(2, 1.0, 700.0, 300.0)];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);
    assert!(!enemies[0].is_active());
    assert!(enemies[1].is_active());
    assert!(bullets[0].active);
    assert_eq!(bullets[0].pierce_remaining, 0);

    // the first ghost is dead and already hit; only the second can register
    bullets[0].position = Vector2::new(700.0, 300.0);
    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);
    assert!(!enemies[1].is_active());
    assert!(!bullets[0].active);
}

#[test]
fn stinky_tofu_uses_snapshot_bonus_over_live_state() {
    let mut combat = combat();
    let live = UpgradeState {
        stinky_tofu_damage_bonus: 5,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());

    let mut frozen = bullet(BulletKind::StinkyTofu, 2, 0, 500.0, 300.0);
    frozen.upgrades = Some(UpgradeSnapshot {
        stinky_tofu_damage_bonus: Some(1),
        ..UpgradeSnapshot::default()
    });
    let mut unfrozen = bullet(BulletKind::StinkyTofu, 2, 0, 900.0, 300.0);
    unfrozen.upgrades = Some(UpgradeSnapshot::default());

    let mut bullets = vec![frozen, unfrozen];
    let mut enemies = vec![ghost(1, 20.0, 500.0, 300.0), ghost(2, 20.0, 900.0, 300.0)];
    step(&mut combat, &mut bullets, &mut enemies, &live, &mut log, &mut effects);

    assert_eq!(enemies[0].health().current(), 17);
    // missing snapshot field falls back to the live bonus
    assert_eq!(enemies[1].health().current(), 13);
}

#[test]
fn night_market_chain_stops_when_nothing_is_in_range() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::NightMarket, 2, 0, 300.0, 300.0)];
    let mut enemies = vec![
        ghost(1, 10.0, 300.0, 300.0),
        ghost(2, 10.0, 500.0, 300.0),
        ghost(3, 10.0, 900.0, 300.0),
    ];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(enemies[0].health().current(), 8);
    // round(2 * 0.8) = 2
    assert_eq!(enemies[1].health().current(), 8);
    assert_eq!(enemies[2].health().current(), 10);
    assert!(!bullets[0].active);
    assert_eq!(
        effects.chain_links(),
        vec![(Vector2::new(300.0, 300.0), Vector2::new(500.0, 300.0))]
    );
    assert_eq!(effects.count_hits(), 2);
}

#[test]
fn night_market_rounds_each_hop_from_the_unrounded_value() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::NightMarket, 2, 0, 100.0, 100.0)];
    // spaced wider than the AABB so only the first one collides directly
    let mut enemies: Vec<Enemy> = (0..6)
        .map(|i| ghost(i + 1, 10.0, 100.0 + 100.0 * i as f32, 100.0))
        .collect();

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    // raw damage per hop: 2, 1.6, 1.28, 1.024, 0.8192
    let remaining: Vec<u32> = enemies.iter().map(|e| e.health().current()).collect();
    assert_eq!(remaining, vec![8, 8, 9, 9, 9, 10]);
    assert_eq!(effects.chain_links().len(), 4);
}

#[test]
fn night_market_chain_multiplier_and_decay_reduction_apply() {
    let mut combat = combat();
    let upgrades = UpgradeState {
        night_market_chain_multiplier: 0.4,
        night_market_decay_reduction: 0.5,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::NightMarket, 2, 0, 100.0, 100.0)];
    let mut enemies: Vec<Enemy> = (0..4)
        .map(|i| ghost(i + 1, 10.0, 100.0 + 100.0 * i as f32, 100.0))
        .collect();

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    // floor(5 * 0.4) = 2 hits, no decay
    let remaining: Vec<u32> = enemies.iter().map(|e| e.health().current()).collect();
    assert_eq!(remaining, vec![8, 8, 10, 10]);
}

#[test]
fn oyster_omelette_takes_share_of_current_boss_health() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    let mut enemies = vec![enemy(
        1,
        EnemyKind::Boss,
        Health::new(6.0, 10.0).unwrap(),
        600.0,
        300.0,
    )];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(enemies[0].health().current(), 5);
    assert!(!bullets[0].active);
    assert!(effects
        .requests()
        .contains(&EffectRequest::Explosion { position: Vector2::new(600.0, 300.0) }));
}

#[test]
fn oyster_omelette_executes_below_threshold() {
    let mut combat = combat();
    let upgrades = UpgradeState {
        kill_threshold_divisor: 2,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    // 50% of 4 = 2, leaving 2 <= 4 / 2
    let mut enemies = vec![enemy(
        1,
        EnemyKind::RedGhost,
        Health::full(4.0).unwrap(),
        600.0,
        300.0,
    )];

    let summary = step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert!(!enemies[0].is_active());
    assert_eq!(summary.kills, 1);
    assert_eq!(log.count(CombatEventKind::EnemyDeath), 1);
}

#[test]
fn oyster_omelette_takes_one_from_full_health_wave_five_boss() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    let mut enemies = vec![enemy(
        1,
        EnemyKind::Boss,
        Health::full(10.0).unwrap(),
        600.0,
        300.0,
    )];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    // ceil(10 * 0.1) = 1
    assert_eq!(enemies[0].health().current(), 9);
}

#[test]
fn oyster_omelette_bonus_stacks_without_overshooting() {
    let mut combat = combat();
    let upgrades = UpgradeState {
        oyster_percent_bonus: 0.2,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    let mut enemies = vec![enemy(
        1,
        EnemyKind::Boss,
        Health::full(10.0).unwrap(),
        600.0,
        300.0,
    )];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    // ceil(10 * (0.1 + 0.2)) = 3
    assert_eq!(enemies[0].health().current(), 7);
}

#[test]
fn oyster_omelette_percentage_is_clamped_not_dropped() {
    let mut combat = combat();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());

    let oversized = UpgradeState {
        oyster_percent_bonus: 5.0,
        ..UpgradeState::default()
    };
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    let mut enemies = vec![ghost(1, 10.0, 600.0, 300.0)];
    step(&mut combat, &mut bullets, &mut enemies, &oversized, &mut log, &mut effects);
    assert!(!enemies[0].is_active());

    let garbage = UpgradeState {
        oyster_percent_bonus: f64::NAN,
        ..UpgradeState::default()
    };
    let mut bullets = vec![bullet(BulletKind::OysterOmelette, 0, 0, 600.0, 300.0)];
    let mut enemies = vec![ghost(2, 10.0, 600.0, 300.0)];
    step(&mut combat, &mut bullets, &mut enemies, &garbage, &mut log, &mut effects);
    // base ghost share: ceil(10 * 0.7) = 7
    assert_eq!(enemies[0].health().current(), 3);
}

#[test]
fn night_market_unbounded_multiplier_visits_each_enemy_once() {
    let mut combat = combat();
    let upgrades = UpgradeState {
        night_market_chain_multiplier: f32::INFINITY,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::NightMarket, 2, 0, 100.0, 100.0)];
    let mut enemies: Vec<Enemy> = (0..3)
        .map(|i| ghost(i + 1, 10.0, 100.0 + 100.0 * i as f32, 100.0))
        .collect();

    let summary = step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    let remaining: Vec<u32> = enemies.iter().map(|e| e.health().current()).collect();
    assert_eq!(remaining, vec![8, 8, 9]);
    assert_eq!(summary.hits, 1);
    assert_eq!(effects.count_hits(), 3);
    assert!(!bullets[0].active);
}

#[test]
fn blood_cake_slows_target_and_neighbours_in_range() {
    let mut combat = combat();
    let upgrades = UpgradeState {
        blood_cake_range_bonus: 100.0,
        ..UpgradeState::default()
    };
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::BloodCake, 2, 0, 500.0, 300.0)];
    let mut enemies = vec![
        ghost(1, 5.0, 500.0, 300.0),
        ghost(2, 5.0, 580.0, 300.0),
        ghost(3, 5.0, 800.0, 300.0),
    ];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(enemies[0].health().current(), 3);
    assert!((enemies[0].speed_multiplier() - 0.9).abs() < 1e-6);
    assert_eq!(enemies[1].health().current(), 5);
    assert_eq!(enemies[1].slow_stacks(), 1);
    assert_eq!(enemies[2].slow_stacks(), 0);
}

#[test]
fn blood_cake_slow_stacks_multiply() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![
        bullet(BulletKind::BloodCake, 2, 0, 500.0, 300.0),
        bullet(BulletKind::BloodCake, 2, 0, 500.0, 300.0),
    ];
    let mut enemies = vec![ghost(1, 10.0, 500.0, 300.0)];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(enemies[0].slow_stacks(), 2);
    assert!((enemies[0].speed_multiplier() - 0.81).abs() < 1e-6);
}

#[test]
fn dead_enemy_is_never_reported_twice() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![
        bullet(BulletKind::None, 1, 0, 500.0, 300.0),
        bullet(BulletKind::None, 1, 0, 500.0, 300.0),
    ];
    let mut enemies = vec![ghost(1, 1.0, 500.0, 300.0)];

    let summary = step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    assert_eq!(summary.hits, 1);
    assert_eq!(log.count(CombatEventKind::EnemyDeath), 1);
    assert!(!bullets[0].active);
    assert!(bullets[1].active);
}

#[test]
fn every_hit_gets_flash_knockback_and_shake() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let (mut log, mut effects) = (EventLog::new(), EffectLog::new());
    let mut bullets = vec![bullet(BulletKind::None, 1, 0, 500.0, 300.0)];
    let mut enemies = vec![ghost(1, 3.0, 500.0, 300.0)];

    step(&mut combat, &mut bullets, &mut enemies, &upgrades, &mut log, &mut effects);

    let feedback = CombatConfig::default().feedback;
    let flash = enemies[0].flash().unwrap();
    assert_eq!(flash.color, feedback.normal.flash_color);
    let knockback = enemies[0].knockback().unwrap();
    assert!((knockback.velocity.x - 187.5).abs() < 1e-3);
    assert_eq!(
        effects.requests(),
        &[
            EffectRequest::ScreenShake {
                magnitude: feedback.normal.shake_magnitude,
                duration: feedback.normal.shake_duration,
            },
            EffectRequest::Hit {
                position: Vector2::new(500.0, 300.0),
                kind: BulletKind::None,
            },
        ]
    );
}

#[test]
fn missing_sinks_are_skipped() {
    let mut combat = combat();
    let upgrades = UpgradeState::default();
    let mut env = CombatEnv::new(&upgrades);
    let mut bullets = vec![bullet(BulletKind::NightMarket, 2, 0, 500.0, 300.0)];
    let mut enemies = vec![ghost(1, 1.0, 500.0, 300.0), ghost(2, 1.0, 600.0, 300.0)];

    let summary = combat.update(DT, &mut bullets, &mut enemies, &mut env);

    assert_eq!(summary.kills, 2);
}
