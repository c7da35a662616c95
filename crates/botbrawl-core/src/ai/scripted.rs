//! Script-driven controller: builds a context, runs the rules, maps the
//! chosen action to motion.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::behavior::{perp_left, Steering};
use super::{Combatant, Controller, Intent, Perception};
use crate::catalog::ArenaDef;
use crate::script::{execute_script_traced, parse_script, Action, Program, ScriptContext};

/// How long `ram` backs away before charging.
pub const RAM_WINDUP_MS: f32 = 500.0;

/// Distance at which a charging `ram` resets its windup.
pub const RAM_RESET_DISTANCE: f32 = 80.0;

/// Runs a compiled strategy script every tick.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    program: Program,
    /// Time spent in the current ram cycle. Persists across action changes.
    ram_charge_ms: f32,
}

impl ScriptedController {
    /// Wraps an already-compiled program.
    #[must_use]
    pub fn new(program: Program) -> Self {
        Self {
            program,
            ram_charge_ms: 0.0,
        }
    }

    /// Compiles `source`, keeping whatever rules parsed cleanly.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::new(parse_script(source).program)
    }

    /// The program being executed.
    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    fn steer(&mut self, action: Action, me: Vec2, enemy: Vec2, arena: &ArenaDef, dt_ms: f32) -> Steering {
        let delta = enemy - me;
        let distance = delta.length();
        let angle_to_enemy = delta.y.atan2(delta.x);
        let toward = if distance > 0.0 { delta / distance } else { Vec2::X };

        let mut facing = angle_to_enemy;
        let (direction, attack) = match action {
            Action::Attack => (toward, distance < 100.0),
            Action::Retreat => {
                facing = angle_to_enemy + PI;
                (-toward, false)
            }
            Action::CircleLeft => (toward * 0.3 + perp_left(toward) * 0.7, distance < 120.0),
            Action::CircleRight => (toward * 0.3 - perp_left(toward) * 0.7, distance < 120.0),
            Action::Ram => {
                self.ram_charge_ms += dt_ms;
                let direction = if self.ram_charge_ms < RAM_WINDUP_MS {
                    -toward
                } else {
                    if distance < RAM_RESET_DISTANCE {
                        self.ram_charge_ms = 0.0;
                    }
                    toward * 1.5
                };
                (direction, distance < 60.0)
            }
            Action::Wait => (Vec2::ZERO, false),
            Action::Approach => {
                let scale = if distance > 150.0 { 1.0 } else { 0.5 };
                (toward * scale, distance < 100.0)
            }
            Action::FleeToCenter => {
                let to_center = arena.center() - me;
                facing = to_center.y.atan2(to_center.x);
                let direction = if to_center.length() > 10.0 {
                    to_center.normalize_or_zero()
                } else {
                    Vec2::ZERO
                };
                (direction, false)
            }
            Action::Flank => {
                if distance > 100.0 {
                    (Vec2::from_angle(angle_to_enemy + FRAC_PI_2) * 0.7 + toward * 0.3, false)
                } else {
                    (toward, true)
                }
            }
        };

        Steering {
            direction,
            facing,
            attack,
        }
    }
}

/// Builds the facts a script sees for one tick.
#[must_use]
pub fn script_context(me: &Combatant<'_>, enemy: &Combatant<'_>, arena: &ArenaDef) -> ScriptContext {
    let hp_percent = |c: &Combatant<'_>| c.state.hp_fraction() * 100.0;
    ScriptContext {
        distance_to_enemy: me.state.position.distance(enemy.state.position),
        my_hp: me.state.hp,
        my_hp_percent: hp_percent(me),
        enemy_hp: enemy.state.hp,
        enemy_hp_percent: hp_percent(enemy),
        my_speed: me.stats.speed,
        enemy_speed: enemy.stats.speed,
        my_weight: me.stats.weight,
        enemy_weight: enemy.stats.weight,
        distance_to_wall: arena.distance_to_wall(me.state.position),
        distance_to_center: me.state.position.distance(arena.center()),
        enemy_is_spinning: enemy.has_spinner,
    }
}

impl Controller for ScriptedController {
    fn decide(&mut self, view: &Perception<'_>) -> Intent {
        let Some(enemy) = view.opponent.as_ref() else {
            return Intent::idle();
        };
        if !view.me.state.is_alive() {
            return Intent::idle();
        }

        let context = script_context(&view.me, enemy, view.arena);
        let selection = execute_script_traced(&self.program, &context);
        let steering = self.steer(
            selection.action,
            view.me.state.position,
            enemy.state.position,
            view.arena,
            view.dt_ms,
        );

        Intent::from_steering(steering, selection.action.name(), selection.rule)
    }
}
