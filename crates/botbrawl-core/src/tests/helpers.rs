//! Test helper functions for building fighters, rosters and arenas.

use glam::Vec2;

use crate::battle::run_battle_with;
use crate::catalog::{ArenaDef, Catalog, HazardDef};
use crate::config::MatchConfig;
use crate::fighter::{BotConfig, FighterState, Loadout, Roster};
use crate::result::MatchResult;

// =============================================================================
// Fighters
// =============================================================================

/// A bare brawler spawned at the center of the basic pit.
pub fn state(id: &str) -> FighterState {
    let catalog = Catalog::standard();
    let config = BotConfig::scripted(id, "brawler", "");
    let loadout = Loadout::resolve(&config, &catalog);
    FighterState::spawn(config.id, &loadout, Vec2::new(400.0, 300.0))
}

/// A scripted fighter with the given weapons.
pub fn scripted(id: &str, chassis: &str, script: &str, weapons: &[&str]) -> BotConfig {
    BotConfig::scripted(id, chassis, script).with_weapons(weapons.iter().copied())
}

/// The heavy spinner tank against a fast weaponless scout, both charging.
pub fn tank_vs_scout() -> (BotConfig, BotConfig) {
    (
        scripted("tank", "tank", "DEFAULT attack", &["deathBlossom"]),
        scripted("scout", "scout", "DEFAULT attack", &[]),
    )
}

/// Two fighters who never move.
pub fn sitting_ducks() -> (BotConfig, BotConfig) {
    (
        scripted("left", "brawler", "DEFAULT wait", &[]),
        scripted("right", "brawler", "DEFAULT wait", &[]),
    )
}

/// A two-fighter roster at the default spawn points of the basic pit.
///
/// # Panics
///
/// Panics if either fighter is rejected.
pub fn roster(a: BotConfig, b: BotConfig, catalog: &Catalog) -> Roster {
    let mut roster = Roster::new();
    roster.add(a, Vec2::new(200.0, 300.0), catalog).unwrap();
    roster.add(b, Vec2::new(600.0, 300.0), catalog).unwrap();
    roster
}

// =============================================================================
// Arenas
// =============================================================================

/// An 800x600 arena with a pit under each default spawn point.
pub fn twin_pit_arena() -> ArenaDef {
    ArenaDef {
        hazards: vec![
            HazardDef::pit(Vec2::new(200.0, 300.0), Vec2::new(80.0, 80.0)),
            HazardDef::pit(Vec2::new(600.0, 300.0), Vec2::new(80.0, 80.0)),
        ],
        ..ArenaDef::default()
    }
}

/// An 800x600 arena with a spike zone under the left spawn point.
pub fn left_spike_arena(rating: f32) -> ArenaDef {
    ArenaDef {
        hazards: vec![HazardDef::spike(
            Vec2::new(200.0, 300.0),
            Vec2::new(100.0, 100.0),
            rating,
        )],
        ..ArenaDef::default()
    }
}

/// The stock catalog plus one extra arena.
pub fn catalog_with(arena_id: &str, arena: ArenaDef) -> Catalog {
    Catalog::standard().with_arena(arena_id, arena)
}

// =============================================================================
// Matches
// =============================================================================

/// Runs a headless match with frame recording on.
pub fn recorded(a: BotConfig, b: BotConfig, arena_id: &str, catalog: &Catalog, seed: u64) -> MatchResult {
    run_battle_with(a, b, arena_id, catalog, &MatchConfig::with_seed(seed).recording())
}

/// Config with a shortened time cap.
pub fn capped(max_duration_ms: f32) -> MatchConfig {
    MatchConfig {
        max_duration_ms,
        ..MatchConfig::default()
    }
}
