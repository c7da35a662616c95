//! Match narration.
//!
//! [`CommentaryGenerator`] watches the output of each tick and emits
//! speaker-attributed lines. It never reads physics or controller state,
//! only damage events and fighter snapshots.
//!
//! # Triggers
//!
//! | Kind | When | Gate |
//! |------|------|------|
//! | start | match begins | once |
//! | big hit | one hit above the threshold | window since last big hit |
//! | wall slam | wall damage above the threshold | window since last slam |
//! | low hp | fighter first drops below 25% | once per fighter |
//! | pit fall | pit elimination | none |
//! | banter | lull with nothing said | earliest time, chance, cap |
//! | finish | match ends | once |
//!
//! Line choice and follow-up reactions draw from a seeded [`ChaCha8Rng`], so a
//! match replayed with the same seed narrates identically.

mod lines;

pub use crate::config::CommentaryConfig;

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::events::{CommentaryEvent, CommentaryKind, DamageCause, DamageEvent, Speaker};
use crate::fighter::{FighterId, FighterState, Roster};

/// HP fraction below which a fighter is called out as in trouble.
pub const LOW_HP_FRACTION: f32 = 0.25;

/// Big hits above this also draw a reaction from the color commentator.
pub const BIG_HIT_REACTION_DAMAGE: f32 = 20.0;

const START_REPLY_DELAY_MS: f32 = 800.0;
const BIG_HIT_REPLY_DELAY_MS: f32 = 600.0;
const LOW_HP_DELAY_MS: f32 = 200.0;
const LOW_HP_REPLY_DELAY_MS: f32 = 900.0;
const PIT_REPLY_DELAY_MS: f32 = 600.0;
const WALL_REPLY_DELAY_MS: f32 = 500.0;
const FINISH_REPLY_DELAY_MS: f32 = 800.0;

/// Stateful narrator for one match.
///
/// # Example
///
/// ```
/// use botbrawl_core::catalog::Catalog;
/// use botbrawl_core::commentary::{CommentaryConfig, CommentaryGenerator};
/// use botbrawl_core::events::CommentaryKind;
/// use botbrawl_core::fighter::{BotConfig, Roster};
/// use glam::Vec2;
///
/// let catalog = Catalog::standard();
/// let mut roster = Roster::new();
/// roster.add(BotConfig::scripted("red", "brawler", ""), Vec2::new(200.0, 300.0), &catalog).unwrap();
/// roster.add(BotConfig::scripted("blue", "brawler", ""), Vec2::new(600.0, 300.0), &catalog).unwrap();
///
/// let mut commentary = CommentaryGenerator::new(CommentaryConfig::broadcast(), 7);
/// commentary.start(&roster);
///
/// let events = commentary.into_events();
/// assert_eq!(events.len(), 2);
/// assert!(events.iter().all(|e| e.kind == CommentaryKind::Start));
/// ```
#[derive(Debug, Clone)]
pub struct CommentaryGenerator {
    config: CommentaryConfig,
    rng: ChaCha8Rng,
    names: BTreeMap<FighterId, String>,
    events: Vec<CommentaryEvent>,
    started: bool,
    finished: bool,
    last_big_hit: Option<f32>,
    last_wall_slam: Option<f32>,
    low_hp_called: BTreeSet<FighterId>,
    banter_count: u32,
    last_banter_roll: Option<f32>,
    last_line_at: f32,
}

impl CommentaryGenerator {
    /// Creates a generator with the given thresholds and line seed.
    #[must_use]
    pub fn new(config: CommentaryConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            names: BTreeMap::new(),
            events: Vec::new(),
            started: false,
            finished: false,
            last_big_hit: None,
            last_wall_slam: None,
            low_hp_called: BTreeSet::new(),
            banter_count: 0,
            last_banter_roll: None,
            last_line_at: 0.0,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn config(&self) -> &CommentaryConfig {
        &self.config
    }

    /// Opens the match. Only the first call speaks.
    pub fn start(&mut self, roster: &Roster) {
        if self.started {
            return;
        }
        self.started = true;
        self.names = roster
            .iter()
            .map(|e| (e.id().clone(), e.config.display_name().to_owned()))
            .collect();

        let mut fighters = roster.iter().map(|e| e.config.display_name().to_owned());
        let vars = [
            ("{a}", fighters.next().unwrap_or_default()),
            ("{b}", fighters.next().unwrap_or_default()),
        ];
        self.say(0.0, CommentaryKind::Start, lines::START_OPEN, Speaker::Chuck, 7, &vars);
        self.say(
            START_REPLY_DELAY_MS,
            CommentaryKind::Start,
            lines::START_REPLY,
            Speaker::Frank,
            6,
            &vars,
        );
    }

    /// Reacts to one tick's damage and the fighter states it left behind.
    pub fn observe(&mut self, timestamp: f32, damage: &[DamageEvent], states: &[FighterState]) {
        if self.finished {
            return;
        }
        let before = self.events.len();

        for event in damage {
            match event.cause {
                DamageCause::PIT => self.pit_fall(timestamp, event),
                DamageCause::WALL => self.wall_slam(timestamp, event),
                _ => self.big_hit(timestamp, event),
            }
        }

        for state in states {
            if state.is_alive()
                && state.hp_fraction() < LOW_HP_FRACTION
                && self.low_hp_called.insert(state.id.clone())
            {
                self.low_hp(timestamp, &state.id);
            }
        }

        if self.events.len() == before {
            self.maybe_banter(timestamp);
        }
    }

    /// Closes the match. Only the first call speaks.
    ///
    /// `winner` is the surviving fighter, `None` for a draw; `timed_out`
    /// selects the time-expired draw call.
    pub fn finish(&mut self, timestamp: f32, winner: Option<&FighterState>, timed_out: bool) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Some(winner) = winner {
            let vars = [
                ("{winner}", self.name(&winner.id)),
                ("{hp}", format!("{:.0}", winner.hp.round())),
            ];
            self.say(timestamp, CommentaryKind::Finish, lines::FINISH_WIN, Speaker::Chuck, 10, &vars);
            self.say(
                timestamp + FINISH_REPLY_DELAY_MS,
                CommentaryKind::Finish,
                lines::FINISH_WIN_REPLY,
                Speaker::Frank,
                9,
                &vars,
            );
        } else {
            let pool = if timed_out {
                lines::FINISH_TIME_UP
            } else {
                lines::FINISH_DOUBLE_KO
            };
            self.say(timestamp, CommentaryKind::Finish, pool, Speaker::Both, 10, &[]);
        }
    }

    /// Lines emitted so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &[CommentaryEvent] {
        &self.events
    }

    /// Banter lines emitted so far.
    #[must_use]
    pub fn banter_count(&self) -> u32 {
        self.banter_count
    }

    /// All lines, stably ordered by timestamp.
    #[must_use]
    pub fn into_events(mut self) -> Vec<CommentaryEvent> {
        self.events.sort_by_key(|e| e.timestamp);
        self.events
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    fn big_hit(&mut self, timestamp: f32, event: &DamageEvent) {
        if event.damage <= self.config.big_hit_threshold
            || !window_elapsed(self.last_big_hit, timestamp, self.config.big_hit_window_ms)
        {
            return;
        }
        self.last_big_hit = Some(timestamp);

        let vars = self.hit_vars(event);
        let excitement = big_hit_excitement(event.damage);
        self.say(timestamp, CommentaryKind::BigHit, lines::BIG_HIT, Speaker::Chuck, excitement, &vars);
        if event.damage > BIG_HIT_REACTION_DAMAGE && self.roll(self.config.big_hit_follow_up) {
            self.say(
                timestamp + BIG_HIT_REPLY_DELAY_MS,
                CommentaryKind::BigHit,
                lines::BIG_HIT_REPLY,
                Speaker::Frank,
                excitement.saturating_sub(1).max(1),
                &vars,
            );
        }
    }

    fn wall_slam(&mut self, timestamp: f32, event: &DamageEvent) {
        if event.damage <= self.config.wall_slam_threshold
            || !window_elapsed(self.last_wall_slam, timestamp, self.config.wall_slam_window_ms)
        {
            return;
        }
        self.last_wall_slam = Some(timestamp);

        let vars = self.hit_vars(event);
        self.say(timestamp, CommentaryKind::WallSlam, lines::WALL_SLAM, Speaker::Chuck, 6, &vars);
        if self.roll(self.config.wall_slam_follow_up) {
            self.say(
                timestamp + WALL_REPLY_DELAY_MS,
                CommentaryKind::WallSlam,
                lines::WALL_SLAM_REPLY,
                Speaker::Frank,
                5,
                &vars,
            );
        }
    }

    fn pit_fall(&mut self, timestamp: f32, event: &DamageEvent) {
        let vars = self.hit_vars(event);
        self.say(timestamp, CommentaryKind::PitFall, lines::PIT_FALL, Speaker::Chuck, 10, &vars);
        self.say(
            timestamp + PIT_REPLY_DELAY_MS,
            CommentaryKind::PitFall,
            lines::PIT_FALL_REPLY,
            Speaker::Frank,
            9,
            &vars,
        );
    }

    fn low_hp(&mut self, timestamp: f32, id: &FighterId) {
        let vars = [("{target}", self.name(id))];
        self.say(
            timestamp + LOW_HP_DELAY_MS,
            CommentaryKind::LowHp,
            lines::LOW_HP,
            Speaker::Chuck,
            8,
            &vars,
        );
        self.say(
            timestamp + LOW_HP_REPLY_DELAY_MS,
            CommentaryKind::LowHp,
            lines::LOW_HP_REPLY,
            Speaker::Frank,
            7,
            &vars,
        );
    }

    fn maybe_banter(&mut self, timestamp: f32) {
        let config = self.config;
        if self.banter_count >= config.banter_cap
            || timestamp < config.banter_earliest_ms
            || timestamp - self.last_line_at < config.banter_lull_ms
            || !window_elapsed(self.last_banter_roll, timestamp, config.banter_roll_interval_ms)
        {
            return;
        }
        // a failed roll still uses up the interval
        self.last_banter_roll = Some(timestamp);
        if !self.roll(config.banter_chance) {
            return;
        }
        let Some(&(speaker, line)) = lines::BANTER.choose(&mut self.rng) else {
            return;
        };
        self.banter_count += 1;
        self.push(timestamp, CommentaryKind::Banter, line.to_owned(), speaker, 5);
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn name(&self, id: &FighterId) -> String {
        self.names.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    fn hit_vars(&self, event: &DamageEvent) -> [(&'static str, String); 4] {
        let attacker = event
            .attacker_id
            .as_ref()
            .map_or_else(|| "the arena".to_owned(), |id| self.name(id));
        [
            ("{attacker}", attacker),
            ("{target}", self.name(&event.target_id)),
            ("{damage}", format!("{:.0}", event.damage)),
            ("{weapon}", event.cause.to_string()),
        ]
    }

    /// Chance roll. Certain and impossible outcomes leave the generator untouched.
    fn roll(&mut self, chance: f64) -> bool {
        if chance >= 1.0 {
            true
        } else if chance > 0.0 {
            self.rng.gen_bool(chance)
        } else {
            false
        }
    }

    fn say(
        &mut self,
        timestamp: f32,
        kind: CommentaryKind,
        pool: &[&str],
        speaker: Speaker,
        excitement: u8,
        vars: &[(&str, String)],
    ) {
        let Some(template) = pool.choose(&mut self.rng) else {
            return;
        };
        let message = vars
            .iter()
            .fold((*template).to_owned(), |text, (key, value)| text.replace(key, value));
        self.push(timestamp, kind, message, speaker, excitement);
    }

    fn push(&mut self, timestamp: f32, kind: CommentaryKind, message: String, speaker: Speaker, excitement: u8) {
        self.last_line_at = self.last_line_at.max(timestamp);
        self.events.push(CommentaryEvent {
            timestamp: whole_ms(timestamp),
            kind,
            message,
            speaker,
            excitement: excitement.clamp(1, 10),
        });
    }
}

fn window_elapsed(last: Option<f32>, now: f32, window: f32) -> bool {
    last.map_or(true, |at| now - at >= window)
}

/// `floor(damage / 4) + 6`, capped at 10.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn big_hit_excitement(damage: f32) -> u8 {
    ((damage / 4.0).floor() + 6.0).clamp(1.0, 10.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_ms(timestamp: f32) -> u64 {
    timestamp.max(0.0).round() as u64
}
