//! Match configuration.
//!
//! Every knob has a default; a config file only needs to name what it changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Length of one simulation tick in milliseconds (60 Hz).
pub const TICK_MS: f32 = 1000.0 / 60.0;

/// Hard cap on match length in simulated milliseconds.
pub const MAX_DURATION_MS: f32 = 60_000.0;

/// How ticks are paced. The tick logic is identical either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Tight loop to termination.
    #[default]
    Headless,
    /// One call per external frame, driven by elapsed time.
    Interactive,
}

/// Tuning of the built-in physics world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Drive force per point of effective speed.
    pub force_per_speed: f32,
    /// Fraction of velocity lost per tick.
    pub air_friction: f32,
    /// Bounciness of fighter and wall collisions.
    pub restitution: f32,
    /// Angular velocity per radian of facing error.
    pub turn_rate: f32,
    /// Velocity cap in units per tick.
    pub max_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            force_per_speed: 5.0,
            air_friction: 0.05,
            restitution: 0.8,
            turn_rate: 0.1,
            max_speed: 20.0,
        }
    }
}

/// Commentary thresholds and chances.
///
/// Two presets exist: [`broadcast`](Self::broadcast) (the default, tuned for
/// post-match playback) and [`live`](Self::live) (chattier, for watching a
/// match as it runs).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentaryConfig {
    /// A single hit must exceed this to count as big.
    pub big_hit_threshold: f32,
    /// Minimum gap between big-hit calls.
    pub big_hit_window_ms: f32,
    /// Chance the second commentator reacts to a big hit above 20 damage.
    pub big_hit_follow_up: f64,
    /// Wall damage must exceed this to be called.
    pub wall_slam_threshold: f32,
    /// Minimum gap between wall-slam calls.
    pub wall_slam_window_ms: f32,
    /// Chance the second commentator reacts to a wall slam.
    pub wall_slam_follow_up: f64,
    /// Silence needed before banter may start.
    pub banter_lull_ms: f32,
    /// No banter before this point in the match.
    pub banter_earliest_ms: f32,
    /// Chance of banter per roll during a lull.
    pub banter_chance: f64,
    /// Minimum gap between banter rolls. Zero rolls every tick.
    pub banter_roll_interval_ms: f32,
    /// Most banter lines per match.
    pub banter_cap: u32,
}

impl CommentaryConfig {
    /// Sparse, post-match narration.
    #[must_use]
    pub const fn broadcast() -> Self {
        Self {
            big_hit_threshold: 12.0,
            big_hit_window_ms: 2500.0,
            big_hit_follow_up: 0.6,
            wall_slam_threshold: 8.0,
            wall_slam_window_ms: 3000.0,
            wall_slam_follow_up: 0.5,
            banter_lull_ms: 4000.0,
            banter_earliest_ms: 5000.0,
            banter_chance: 0.0003,
            banter_roll_interval_ms: 0.0,
            banter_cap: 3,
        }
    }

    /// Chatty narration for live viewing.
    #[must_use]
    pub const fn live() -> Self {
        Self {
            big_hit_threshold: 8.0,
            big_hit_window_ms: 2000.0,
            big_hit_follow_up: 1.0,
            wall_slam_threshold: 0.0,
            wall_slam_window_ms: 3000.0,
            wall_slam_follow_up: 1.0,
            banter_lull_ms: 10_000.0,
            banter_earliest_ms: 5000.0,
            banter_chance: 0.3,
            banter_roll_interval_ms: 10_000.0,
            banter_cap: 3,
        }
    }
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self::broadcast()
    }
}

/// Everything that shapes a match besides the fighters and the arena.
///
/// # Example
///
/// ```
/// use botbrawl_core::config::{CommentaryConfig, MatchConfig};
///
/// let config: MatchConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.commentary, CommentaryConfig::broadcast());
/// assert_eq!(config.max_ticks(), 3600);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// Tick length in milliseconds.
    pub tick_ms: f32,
    /// Hard cap on match length.
    pub max_duration_ms: f32,
    /// Seed for commentary line selection.
    pub seed: u64,
    /// Spawn points as fractions of arena width and height, in roster order.
    pub spawn_fractions: [Vec2; 2],
    /// Keep a per-tick state history in the result.
    pub record_frames: bool,
    /// Physics tuning.
    pub physics: PhysicsConfig,
    /// Commentary tuning.
    pub commentary: CommentaryConfig,
    /// Pacing.
    pub mode: ExecutionMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            max_duration_ms: MAX_DURATION_MS,
            seed: 0,
            spawn_fractions: [Vec2::new(0.25, 0.5), Vec2::new(0.75, 0.5)],
            record_frames: false,
            physics: PhysicsConfig::default(),
            commentary: CommentaryConfig::default(),
            mode: ExecutionMode::default(),
        }
    }
}

impl MatchConfig {
    /// Default config with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Interactive pacing with live commentary.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            mode: ExecutionMode::Interactive,
            commentary: CommentaryConfig::live(),
            ..Default::default()
        }
    }

    /// Enables frame recording.
    #[must_use]
    pub fn recording(mut self) -> Self {
        self.record_frames = true;
        self
    }

    /// Number of ticks that fit under the time cap.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_ticks(&self) -> u64 {
        if self.tick_ms <= 0.0 {
            return 0;
        }
        (self.max_duration_ms / self.tick_ms).round().max(0.0) as u64
    }
}
