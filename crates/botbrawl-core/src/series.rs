//! Many seeded matches of the same pairing, played in parallel.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::run_battle_with;
use crate::catalog::Catalog;
use crate::config::MatchConfig;
use crate::fighter::{BotConfig, FighterId};
use crate::result::MatchResult;

/// Aggregate of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    /// Matches played.
    pub runs: usize,
    /// Seed of the first match; match `i` used `first_seed + i`.
    pub first_seed: u64,
    /// Wins per fighter. Every entrant appears, winless ones with zero.
    pub wins: BTreeMap<FighterId, usize>,
    /// Matches without a winner, timeouts included.
    pub draws: usize,
    /// Matches ended by the time cap.
    pub timeouts: usize,
    /// Mean simulated duration in milliseconds.
    pub mean_duration_ms: f32,
}

impl SeriesSummary {
    /// Summarizes results given in seed order.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_results(first_seed: u64, results: &[MatchResult]) -> Self {
        let mut wins: BTreeMap<FighterId, usize> = results
            .iter()
            .flat_map(|r| r.final_states.iter().map(|s| (s.id.clone(), 0)))
            .collect();
        let mut draws = 0;
        let mut timeouts = 0;
        let mut total_duration = 0.0;

        for result in results {
            match &result.winner {
                Some(winner) => *wins.entry(winner.clone()).or_default() += 1,
                None => draws += 1,
            }
            if result.timed_out {
                timeouts += 1;
            }
            total_duration += result.duration;
        }

        let mean_duration_ms = if results.is_empty() {
            0.0
        } else {
            total_duration / results.len() as f32
        };

        Self {
            runs: results.len(),
            first_seed,
            wins,
            draws,
            timeouts,
            mean_duration_ms,
        }
    }

    /// Wins recorded for `id`.
    #[must_use]
    pub fn wins_for(&self, id: &FighterId) -> usize {
        self.wins.get(id).copied().unwrap_or(0)
    }
}

/// Plays `runs` matches with seeds `config.seed`, `config.seed + 1`, ...
/// and returns the results in seed order.
#[must_use]
pub fn play_series(
    a: &BotConfig,
    b: &BotConfig,
    arena_id: &str,
    catalog: &Catalog,
    config: &MatchConfig,
    runs: usize,
) -> Vec<MatchResult> {
    debug!(runs, first_seed = config.seed, arena = arena_id, "series started");
    (0..runs as u64)
        .into_par_iter()
        .map(|offset| {
            let config = MatchConfig {
                seed: config.seed.wrapping_add(offset),
                ..config.clone()
            };
            run_battle_with(a.clone(), b.clone(), arena_id, catalog, &config)
        })
        .collect()
}

/// Plays a series and summarizes it.
///
/// # Example
///
/// ```
/// use botbrawl_core::catalog::Catalog;
/// use botbrawl_core::config::MatchConfig;
/// use botbrawl_core::fighter::BotConfig;
/// use botbrawl_core::series::run_series;
///
/// let tank = BotConfig::scripted("tank", "tank", "DEFAULT attack").with_weapons(["deathBlossom"]);
/// let scout = BotConfig::scripted("scout", "scout", "DEFAULT attack");
///
/// let summary = run_series(&tank, &scout, "basicPit", &Catalog::standard(), &MatchConfig::default(), 4);
/// assert_eq!(summary.runs, 4);
/// assert_eq!(summary.wins_for(&"tank".into()) + summary.wins_for(&"scout".into()) + summary.draws, 4);
/// ```
#[must_use]
pub fn run_series(
    a: &BotConfig,
    b: &BotConfig,
    arena_id: &str,
    catalog: &Catalog,
    config: &MatchConfig,
    runs: usize,
) -> SeriesSummary {
    let results = play_series(a, b, arena_id, catalog, config, runs);
    SeriesSummary::from_results(config.seed, &results)
}
