//! End-to-end tests of the match pipeline.
//!
//! Each test runs whole matches through the public entry points and checks
//! the observable record: winner, damage log, final states and commentary.

use glam::Vec2;

use crate::battle::{run_battle, run_battle_with, Battle};
use crate::catalog::{ArenaDef, Catalog};
use crate::config::MatchConfig;
use crate::events::{CommentaryKind, DamageCause, Speaker};
use crate::fighter::{FighterId, Roster};
use crate::script::{execute_script, parse_script, Action, ScriptContext};
use crate::series::run_series;

use super::helpers::{
    capped, catalog_with, left_spike_arena, recorded, scripted, sitting_ducks, tank_vs_scout, twin_pit_arena,
};

// =============================================================================
// Strategy Scripts
// =============================================================================

#[test]
fn closing_script_picks_by_distance() {
    let parsed = parse_script("WHEN distance_to_enemy < 80 DO attack\nDEFAULT approach");
    assert!(parsed.errors.is_empty());

    let near = ScriptContext {
        distance_to_enemy: 50.0,
        ..ScriptContext::default()
    };
    let far = ScriptContext {
        distance_to_enemy: 200.0,
        ..ScriptContext::default()
    };
    assert_eq!(execute_script(&parsed.program, &near), Action::Attack);
    assert_eq!(execute_script(&parsed.program, &far), Action::Approach);
}

#[test]
fn script_actions_show_up_in_final_states() {
    let catalog = Catalog::standard();
    let (a, b) = sitting_ducks();
    let result = run_battle_with(a, b, "basicPit", &catalog, &capped(500.0));
    assert!(result.final_states.iter().all(|s| s.final_action == "wait"));
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn simultaneous_pit_falls_are_a_draw() {
    let catalog = catalog_with("twinPits", twin_pit_arena());
    let (a, b) = sitting_ducks();
    let result = run_battle(a, b, "twinPits", &catalog);

    assert_eq!(result.winner, None);
    assert!(result.is_draw());
    assert!(!result.timed_out);
    assert_eq!(result.frame_count, 1);

    assert_eq!(result.damage_log.len(), 2);
    assert!(result.damage_log.iter().all(|e| e.cause == DamageCause::PIT && e.attacker_id.is_none()));
    for state in &result.final_states {
        assert!(!state.is_alive);
        assert_eq!(state.hp, 0.0);
    }

    let finish = result.commentary.iter().find(|e| e.kind == CommentaryKind::Finish).unwrap();
    assert_eq!(finish.speaker, Speaker::Both);
}

#[test]
fn overwhelming_fighter_wins_every_run() {
    let catalog = Catalog::standard();
    let (tank, scout) = tank_vs_scout();
    let summary = run_series(&tank, &scout, "basicPit", &catalog, &MatchConfig::with_seed(100), 6);

    assert_eq!(summary.wins_for(&FighterId::new("tank")), 6);
    assert_eq!(summary.draws, 0);
}

#[test]
fn stalemate_ends_at_the_time_cap() {
    let catalog = Catalog::standard();
    let (a, b) = sitting_ducks();
    let result = run_battle_with(a, b, "basicPit", &catalog, &capped(2000.0));

    assert!(result.timed_out);
    assert_eq!(result.winner, None);
    assert_eq!(result.frame_count, 120);
    assert!((result.duration - 2000.0).abs() < 0.5);

    let last = result.commentary.last().unwrap();
    assert_eq!(last.kind, CommentaryKind::Finish);
    assert!(last.message.contains("Time expires"));
}

#[test]
fn default_cap_is_one_minute() {
    let catalog = Catalog::standard();
    let (a, b) = sitting_ducks();
    let result = run_battle(a, b, "basicPit", &catalog);
    assert!(result.timed_out);
    assert_eq!(result.frame_count, 3600);
}

// =============================================================================
// Weapons
// =============================================================================

/// How far the waiting fighter is from its spawn shortly after a charge
/// connects.
fn shove_distance(weapons: &[&str]) -> f32 {
    let catalog = Catalog::standard();
    let spawn = Vec2::new(380.0, 300.0);
    let mut roster = Roster::new();
    roster
        .add(scripted("pusher", "brawler", "DEFAULT attack", weapons), Vec2::new(300.0, 300.0), &catalog)
        .unwrap();
    roster.add(scripted("target", "brawler", "DEFAULT wait", &[]), spawn, &catalog).unwrap();

    let mut battle = Battle::new(roster, ArenaDef::default(), MatchConfig::default());
    for _ in 0..25 {
        battle.step();
    }
    battle.states()[1].position.distance(spawn)
}

#[test]
fn flipper_throws_the_target_clear() {
    // a saw weighs the same as the flipper, so both pushers close equally fast
    let pushed = shove_distance(&["buzzSaw"]);
    let flipped = shove_distance(&["basicFlipper"]);
    assert!(flipped > pushed + 10.0, "flipped {flipped} vs pushed {pushed}");
}

// =============================================================================
// Hazards
// =============================================================================

#[test]
fn spikes_wear_down_a_parked_fighter() {
    let catalog = catalog_with("spikeLeft", left_spike_arena(5.0));
    let (a, b) = sitting_ducks();
    let result = run_battle_with(a, b, "spikeLeft", &catalog, &capped(1000.0));

    let left = FighterId::new("left");
    assert!(!result.damage_log.is_empty());
    for event in &result.damage_log {
        assert_eq!(event.cause, DamageCause::SPIKES);
        assert_eq!(event.target_id, left);
        assert!((event.damage - 0.5).abs() < 1e-6);
    }

    let taken = result.damage_taken_by(&left);
    assert!(taken > 20.0);
    assert_eq!(result.final_state(&left).unwrap().hp, (100.0 - taken).round());
    assert_eq!(result.damage_taken_by(&FighterId::new("right")), 0.0);
}

#[test]
fn retreating_into_a_wall_hurts() {
    let catalog = Catalog::standard();
    let a = scripted("anchor", "brawler", "DEFAULT wait", &[]);
    let b = scripted("runner", "scout", "DEFAULT retreat", &[]);
    let result = run_battle_with(a, b, "basicPit", &catalog, &capped(3000.0));

    let slams: Vec<_> = result.damage_log.iter().filter(|e| e.cause == DamageCause::WALL).collect();
    assert!(!slams.is_empty());
    assert!(slams.iter().all(|e| e.attacker_id.is_none() && e.target_id.as_str() == "runner"));
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn hp_stays_in_bounds_every_frame() {
    let catalog = Catalog::standard();
    for (arena, seed) in [("warzone", 0), ("thunderdome", 1), ("basicPit", 2)] {
        let (a, b) = tank_vs_scout();
        let result = recorded(a, b, arena, &catalog, seed);

        assert_eq!(result.frames.len() as u64, result.frame_count);
        for frame in &result.frames {
            for fighter in &frame.fighters {
                assert!(fighter.hp >= 0.0 && fighter.hp <= fighter.max_hp, "{arena}: {fighter:?}");
                assert_eq!(fighter.is_alive(), fighter.hp > 0.0, "{arena}: {fighter:?}");
            }
        }
    }
}

#[test]
fn logs_are_in_time_order() {
    let catalog = Catalog::standard();
    let a = scripted("red", "striker", "DEFAULT ram", &["spikeHammer", "buzzSaw"]);
    let b = scripted("blue", "brawler", "DEFAULT attack", &["miniSpinner"]);
    let result = run_battle(a, b, "warzone", &catalog);

    assert!(result.damage_log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(result.commentary.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(result.damage_log.iter().all(|e| e.damage >= 0.0));
}

#[test]
fn result_serializes_with_client_field_names() {
    let catalog = Catalog::standard();
    let (a, b) = tank_vs_scout();
    let result = run_battle(a, b, "basicPit", &catalog);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["winner"], "tank");
    assert!(json["frameCount"].is_u64());
    assert!(json["finalStates"][0]["finalAction"].is_string());
    assert!(json["damageLog"][0]["weaponType"].is_string());
    assert!(json.get("frames").is_none());
}
