use botbrawl_core::battle::{run_battle, Battle};
use botbrawl_core::catalog::Catalog;
use botbrawl_core::config::MatchConfig;
use botbrawl_core::fighter::{BotConfig, Roster};
use botbrawl_core::script::{execute_script, parse_script, ScriptContext};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;

const SCRIPT: &str = "\
WHEN my_hp_percent < 25 AND enemy_hp_percent > 50 DO flee_to_center
WHEN distance_to_wall < 60 DO flee_to_center
WHEN enemy_is_spinning AND distance_to_enemy < 150 DO circle_left
WHEN distance_to_enemy < 100 DO attack
DEFAULT approach";

fn contenders() -> (BotConfig, BotConfig) {
    (
        BotConfig::scripted("red", "striker", SCRIPT).with_weapons(["buzzSaw", "spikeHammer"]),
        BotConfig::scripted("blue", "tank", "DEFAULT ram").with_weapons(["deathBlossom"]),
    )
}

fn bench_full_match(c: &mut Criterion) {
    let catalog = Catalog::standard();

    c.bench_function("full_match", |b| {
        b.iter(|| {
            let (red, blue) = contenders();
            black_box(run_battle(red, blue, black_box("warzone"), &catalog))
        })
    });
}

fn bench_battle_step(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let (red, blue) = contenders();
    let mut roster = Roster::new();
    roster.add(red, Vec2::new(200.0, 300.0), &catalog).unwrap();
    roster.add(blue, Vec2::new(600.0, 300.0), &catalog).unwrap();
    let arena = catalog.arena_or_fallback("basicPit");

    c.bench_function("battle_step", |b| {
        let mut battle = Battle::new(roster.clone(), arena.clone(), MatchConfig::default());
        b.iter(|| {
            if battle.is_finished() {
                battle = Battle::new(roster.clone(), arena.clone(), MatchConfig::default());
            }
            black_box(battle.step())
        })
    });
}

fn bench_script_evaluation(c: &mut Criterion) {
    let program = parse_script(SCRIPT).program;
    let context = ScriptContext {
        distance_to_enemy: 180.0,
        my_hp: 90.0,
        my_hp_percent: 75.0,
        enemy_hp: 120.0,
        enemy_hp_percent: 80.0,
        distance_to_wall: 140.0,
        distance_to_center: 60.0,
        enemy_is_spinning: true,
        ..ScriptContext::default()
    };

    c.bench_function("script_evaluation", |b| {
        b.iter(|| black_box(execute_script(&program, black_box(&context))))
    });
}

fn bench_script_parse(c: &mut Criterion) {
    c.bench_function("script_parse", |b| b.iter(|| black_box(parse_script(black_box(SCRIPT)))));
}

criterion_group!(
    benches,
    bench_full_match,
    bench_battle_step,
    bench_script_evaluation,
    bench_script_parse
);
criterion_main!(benches);
