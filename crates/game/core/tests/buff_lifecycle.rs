use std::time::Duration;

use combat_core::{
    BulletKind, BulletPool, CombatConfig, CombatEnv, CombatEvent, CombatEventKind, CombatSystem,
    EventLog, ShootOutcome, ShotRequest, UpgradeState, Vector2,
};

fn combat() -> CombatSystem {
    CombatSystem::new(CombatConfig::default()).unwrap()
}

fn synthesize(combat: &mut CombatSystem, recipe: &str, log: &mut EventLog) -> bool {
    let upgrades = UpgradeState::default();
    let mut env = CombatEnv::new(&upgrades).with_events(log);
    let event = CombatEvent::SynthesisTriggered {
        recipe_id: recipe.to_string(),
    };
    combat.handle_event(&event, &mut env)
}

fn tick(combat: &mut CombatSystem, dt: f32, log: &mut EventLog) -> Option<BulletKind> {
    let upgrades = UpgradeState::default();
    let mut env = CombatEnv::new(&upgrades).with_events(log);
    combat.update(dt, &mut [], &mut [], &mut env).buff_expired
}

#[test]
fn active_buff_ignores_new_trigger_and_expires_once() {
    let mut combat = combat();
    let mut log = EventLog::new();

    assert!(synthesize(&mut combat, "stinky_tofu", &mut log));
    assert!(!synthesize(&mut combat, "night_market", &mut log));
    assert_eq!(combat.active_buff(), BulletKind::StinkyTofu);

    let mut expired = Vec::new();
    for _ in 0..12 {
        if let Some(kind) = tick(&mut combat, 0.25, &mut log) {
            expired.push(kind);
        }
    }

    assert_eq!(expired, vec![BulletKind::StinkyTofu]);
    assert_eq!(combat.active_buff(), BulletKind::None);
    assert_eq!(log.count(CombatEventKind::BuffActivated), 1);
    assert_eq!(log.count(CombatEventKind::BuffExpired), 1);
    assert_eq!(
        log.events().last(),
        Some(&CombatEvent::BuffExpired {
            kind: BulletKind::StinkyTofu
        })
    );
}

#[test]
fn buff_expires_exactly_at_its_duration() {
    let mut combat = combat();
    let mut log = EventLog::new();
    synthesize(&mut combat, "blood_cake", &mut log);

    assert_eq!(tick(&mut combat, 1.5, &mut log), None);
    assert!(combat.is_buff_active());
    assert_eq!(tick(&mut combat, 0.5, &mut log), Some(BulletKind::BloodCake));
    assert!(!combat.is_buff_active());
}

#[test]
fn new_buff_can_start_after_expiry() {
    let mut combat = combat();
    let mut log = EventLog::new();

    synthesize(&mut combat, "stinky_tofu", &mut log);
    tick(&mut combat, 2.0, &mut log);
    assert!(synthesize(&mut combat, "night_market", &mut log));
    assert_eq!(combat.active_buff(), BulletKind::NightMarket);

    tick(&mut combat, 3.0, &mut log);
    assert_eq!(log.count(CombatEventKind::BuffExpired), 2);
}

#[test]
fn activation_event_carries_duration() {
    let mut combat = combat();
    let mut log = EventLog::new();
    synthesize(&mut combat, "oyster_omelette", &mut log);

    let entry = &log.entries()[0];
    assert_eq!(
        entry.event,
        CombatEvent::BuffActivated {
            kind: BulletKind::OysterOmelette,
            duration: 2.0,
        }
    );
    assert_eq!(entry.delay, None);
}

#[test]
fn expiry_notice_is_scheduled_on_activation_and_not_repeated() {
    let mut combat = combat();
    let mut log = EventLog::new();
    synthesize(&mut combat, "bubble_tea", &mut log);

    let entry = &log.entries()[1];
    assert_eq!(
        entry.event,
        CombatEvent::BuffExpired {
            kind: BulletKind::BubbleTea
        }
    );
    assert_eq!(entry.delay, Some(Duration::from_secs(2)));

    assert_eq!(tick(&mut combat, 2.0, &mut log), Some(BulletKind::BubbleTea));
    assert_eq!(log.count(CombatEventKind::BuffExpired), 1);
}

#[test]
fn bullets_in_flight_keep_their_kind_after_expiry() {
    let mut combat = combat();
    let mut log = EventLog::new();
    let upgrades = UpgradeState::default();
    let mut pool = BulletPool::new();

    synthesize(&mut combat, "stinky_tofu", &mut log);
    {
        let mut env = CombatEnv::new(&upgrades);
        let outcome = combat.shoot(
            ShotRequest::new(Vector2::new(50.0, 300.0), Vector2::RIGHT),
            &mut pool,
            &mut env,
        );
        assert!(matches!(
            outcome,
            ShootOutcome::Fired {
                kind: BulletKind::StinkyTofu,
                ..
            }
        ));
    }

    tick(&mut combat, 2.0, &mut log);
    assert_eq!(combat.active_buff(), BulletKind::None);
    assert_eq!(pool.as_slice()[0].kind, BulletKind::StinkyTofu);

    let mut env = CombatEnv::new(&upgrades);
    combat.update(0.2, pool.as_mut_slice(), &mut [], &mut env);
    match combat.shoot(
        ShotRequest::new(Vector2::new(50.0, 300.0), Vector2::RIGHT),
        &mut pool,
        &mut env,
    ) {
        ShootOutcome::Fired { kind, .. } => assert_eq!(kind, BulletKind::None),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn duplicate_reload_notifications_are_harmless() {
    let mut combat = combat();
    let mut log = EventLog::new();
    let upgrades = UpgradeState {
        reload_time_reduction: 10.0,
        ..UpgradeState::default()
    };
    let mut pool = BulletPool::new();

    {
        let mut env = CombatEnv::new(&upgrades).with_events(&mut log);
        for _ in 0..6 {
            combat.shoot(
                ShotRequest::new(Vector2::new(50.0, 300.0), Vector2::RIGHT),
                &mut pool,
                &mut env,
            );
            combat.update(0.2, &mut [], &mut [], &mut env);
        }
    }

    // reduction is floored at the minimum reload time
    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.entries()[0].delay, Some(Duration::from_millis(500)));

    let upgrades = UpgradeState::default();
    let mut env = CombatEnv::new(&upgrades);
    assert!(combat.handle_event(&CombatEvent::ReloadComplete, &mut env));
    assert!(!combat.handle_event(&CombatEvent::ReloadComplete, &mut env));
    assert_eq!(combat.ammo().current(), 6);
}
