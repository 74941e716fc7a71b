use std::fs;

use combat_content::{ConfigLoader, ContentFactory, Input, ScenarioLoader};
use combat_core::{BulletKind, CombatConfig, EnemyKind};

#[test]
fn bundled_config_matches_built_in_defaults() {
    let config = ContentFactory::bundled().load_config().unwrap();
    assert_eq!(config, CombatConfig::default());
}

#[test]
fn bundled_scenarios_all_load() {
    let factory = ContentFactory::bundled();
    let names = factory.scenario_names().unwrap();
    assert_eq!(names, vec!["boss_rush", "chain_demo", "opening_wave"]);

    for name in &names {
        let scenario = factory.load_scenario(name).unwrap();
        assert_eq!(&scenario.name, name);
        assert!(!scenario.enemies.is_empty());
    }

    let boss_rush = factory.load_scenario("boss_rush").unwrap();
    assert_eq!(boss_rush.wave, 5);
    assert_eq!(boss_rush.enemies[0].kind, EnemyKind::Boss);
    assert_eq!(boss_rush.upgrades.kill_threshold_divisor, 4);
}

#[test]
fn partial_config_file_overrides_only_what_it_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combat.toml");
    fs::write(
        &path,
        r#"
[buff]
duration = 4.0
recipes = [{ recipe_id = "durian", kind = "blood_cake" }]

[bullets.night_market]
chain_targets = 3
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.buff.duration, 4.0);
    assert_eq!(config.buff.kind_for_recipe("durian"), Some(BulletKind::BloodCake));
    assert_eq!(config.buff.kind_for_recipe("stinky_tofu"), None);
    assert_eq!(config.bullets.night_market.chain_targets, 3);
    assert_eq!(config.bullets.night_market.chain_range, 300.0);
    assert_eq!(config.shooting, CombatConfig::default().shooting);
}

#[test]
fn load_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.toml");
    let error = ConfigLoader::load(&missing).unwrap_err();
    assert!(error.to_string().contains("nope.toml"), "{error}");

    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "(name: \"x\", wave: )").unwrap();
    let error = ScenarioLoader::load(&broken).unwrap_err();
    assert!(error.to_string().contains("broken.ron"), "{error}");
}

#[test]
fn scenario_directory_can_be_swapped() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(
        dir.path().join("scenarios").join("solo.ron"),
        r#"(name: "solo", wave: 2, script: [(frame: 4, input: Reload)])"#,
    )
    .unwrap();
    fs::write(dir.path().join("scenarios").join("notes.txt"), "ignored").unwrap();

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.scenario_names().unwrap(), vec!["solo"]);
    let scenario = factory.load_scenario("solo").unwrap();
    assert_eq!(scenario.inputs_at(4).next(), Some(&Input::Reload));
}
