//! Decision layer: turns a fighter's strategy into a per-tick [`Intent`].
//!
//! Two [`Controller`] implementations exist, one per [`Strategy`]:
//!
//! - [`PresetController`]: the five parameterized geometric behaviors, with
//!   optional blending of a secondary behavior
//! - [`ScriptedController`]: runs a compiled strategy script and maps the
//!   selected [`Action`](crate::script::Action) to motion
//!
//! Controllers never touch fighter state. They read a [`Perception`] built
//! from the tick's snapshot and return an intent; the match applies it.

mod behavior;
mod scripted;

pub use behavior::{behavior, BehaviorType, Steering, PRIMARY_BLEND_WEIGHT, REACTIVE_DODGE_SPEED};
pub use scripted::{script_context, ScriptedController, RAM_RESET_DISTANCE, RAM_WINDUP_MS};

use glam::Vec2;

use crate::catalog::ArenaDef;
use crate::fighter::{AiConfig, FighterState, FighterStats, Strategy};
use crate::script::parse_script;

// =============================================================================
// Intent
// =============================================================================

/// What a fighter wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Movement heading, unit length or zero.
    pub direction: Vec2,
    /// Desired facing in radians.
    pub facing: f32,
    /// Weapon-use intent.
    pub attack: bool,
    /// Behavior or action name, surfaced as the fighter's current action.
    pub label: &'static str,
    /// Script rule that produced this intent, if any.
    pub matched_rule: Option<usize>,
}

impl Intent {
    /// Label used when a fighter has nothing to do.
    pub const IDLE_LABEL: &'static str = "idle";

    /// Zero intent.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            direction: Vec2::ZERO,
            facing: 0.0,
            attack: false,
            label: Self::IDLE_LABEL,
            matched_rule: None,
        }
    }

    /// Normalizes a steering into an intent.
    #[must_use]
    pub fn from_steering(steering: Steering, label: &'static str, matched_rule: Option<usize>) -> Self {
        Self {
            direction: steering.direction.normalize_or_zero(),
            facing: steering.facing,
            attack: steering.attack,
            label,
            matched_rule,
        }
    }
}

// =============================================================================
// Perception
// =============================================================================

/// One fighter as seen by a controller.
#[derive(Debug, Clone, Copy)]
pub struct Combatant<'a> {
    /// Snapshot state.
    pub state: &'a FighterState,
    /// Effective stats.
    pub stats: FighterStats,
    /// Carries a continuous-damage weapon.
    pub has_spinner: bool,
}

impl<'a> Combatant<'a> {
    /// Bundles a fighter's state with its static facts.
    #[must_use]
    pub const fn new(state: &'a FighterState, stats: FighterStats, has_spinner: bool) -> Self {
        Self {
            state,
            stats,
            has_spinner,
        }
    }
}

/// Everything a controller may read for one decision.
#[derive(Debug, Clone, Copy)]
pub struct Perception<'a> {
    /// The deciding fighter.
    pub me: Combatant<'a>,
    /// The opponent, if there is one.
    pub opponent: Option<Combatant<'a>>,
    /// Arena geometry.
    pub arena: &'a ArenaDef,
    /// Tick length in milliseconds.
    pub dt_ms: f32,
}

// =============================================================================
// Controllers
// =============================================================================

/// Per-fighter decision maker.
///
/// Controllers may keep private state between ticks (the scripted ram cycle
/// does) but must be deterministic given the same sequence of perceptions.
pub trait Controller: Send {
    /// Chooses this tick's intent.
    fn decide(&mut self, view: &Perception<'_>) -> Intent;
}

/// Preset-behavior controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetController {
    config: AiConfig,
}

impl PresetController {
    /// Creates a controller for the given tuning, clamping aggression to `[0, 100]`.
    #[must_use]
    pub fn new(mut config: AiConfig) -> Self {
        config.aggression = config.aggression.clamp(0.0, 100.0);
        Self { config }
    }

    /// Tuning in use.
    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl Controller for PresetController {
    fn decide(&mut self, view: &Perception<'_>) -> Intent {
        let Some(enemy) = view.opponent.filter(|o| o.state.is_alive()) else {
            return Intent::idle();
        };
        let me = view.me.state;
        let aggression = self.config.aggression;
        let primary = self.config.primary_behavior;

        let mut steering = behavior(primary, me, enemy.state, aggression);
        if let Some(secondary) = self.config.secondary_behavior {
            let other = behavior(secondary, me, enemy.state, aggression * 0.5);
            steering = steering.blend(other, PRIMARY_BLEND_WEIGHT);
        }

        Intent::from_steering(steering, primary.as_str(), None)
    }
}

/// Builds the controller a strategy calls for.
///
/// Script text is compiled here; malformed lines are dropped (the parser logs
/// them) and the surviving rules drive the fighter.
#[must_use]
pub fn controller_for(strategy: &Strategy) -> Box<dyn Controller> {
    match strategy {
        Strategy::Ai(config) => Box::new(PresetController::new(config.clone())),
        Strategy::Script(source) => Box::new(ScriptedController::new(parse_script(source).program)),
    }
}
