//! Per-tick fighter state.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{FighterId, Loadout};

bitflags! {
    /// Status flags carried on [`FighterState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        /// HP reached zero. Never cleared.
        const DESTROYED = 1 << 0;
        /// Eliminated by a pit.
        const IN_PIT = 1 << 1;
        /// Overlapping a spike zone this tick.
        const ON_SPIKES = 1 << 2;
        /// Touching another fighter this tick.
        const IN_CONTACT = 1 << 3;
    }
}

/// Mutable runtime state of one fighter.
///
/// Invariants maintained by every mutator:
/// - `0 <= hp <= max_hp`
/// - `is_alive() == !status.contains(DESTROYED)`, and a destroyed fighter has `hp == 0`
/// - cooldowns are never negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterState {
    /// Fighter identity.
    pub id: FighterId,
    /// World position of the body center.
    pub position: Vec2,
    /// Velocity in units per tick.
    pub velocity: Vec2,
    /// Facing angle in radians.
    pub angle: f32,
    /// Current hit points.
    pub hp: f32,
    /// Hit points at full health.
    pub max_hp: f32,
    /// Status flags.
    pub status: StatusFlags,
    /// Remaining cooldown per mounted weapon, in milliseconds.
    pub weapon_cooldowns: Vec<f32>,
    /// Label of the action or behavior chosen this tick.
    pub current_action: String,
    /// Index of the script rule that produced the action, if any.
    pub matched_rule: Option<usize>,
}

impl FighterState {
    /// Creates a fresh fighter at `position` with full health and ready weapons.
    #[must_use]
    pub fn spawn(id: FighterId, loadout: &Loadout, position: Vec2) -> Self {
        let max_hp = loadout.stats().max_hp;
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            hp: max_hp,
            max_hp,
            status: StatusFlags::empty(),
            weapon_cooldowns: vec![0.0; loadout.weapons.len()],
            current_action: String::new(),
            matched_rule: None,
        }
    }

    /// Returns true while the fighter has not been destroyed.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.status.contains(StatusFlags::DESTROYED)
    }

    /// HP as a fraction of max HP.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }

    /// Speed in units per tick.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Subtracts already armor-reduced damage, flooring at zero.
    ///
    /// Returns the HP actually removed. Destroyed fighters take nothing.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        if self.hp <= 0.0 {
            self.destroy();
        }
        before - self.hp
    }

    /// Sets HP to zero and marks the fighter destroyed.
    pub fn destroy(&mut self) {
        self.hp = 0.0;
        self.status.insert(StatusFlags::DESTROYED);
    }

    /// Returns true if the weapon in `slot` is off cooldown.
    #[must_use]
    pub fn weapon_ready(&self, slot: usize) -> bool {
        self.weapon_cooldowns.get(slot).is_some_and(|cd| *cd <= 0.0)
    }

    /// Starts the cooldown of the weapon in `slot`.
    pub fn trigger_weapon(&mut self, slot: usize, cooldown_ms: f32) {
        if let Some(cd) = self.weapon_cooldowns.get_mut(slot) {
            *cd = cooldown_ms.max(0.0);
        }
    }

    /// Counts every cooldown down by `dt_ms`, flooring at zero.
    pub fn tick_cooldowns(&mut self, dt_ms: f32) {
        for cd in &mut self.weapon_cooldowns {
            *cd = (*cd - dt_ms).max(0.0);
        }
    }
}
