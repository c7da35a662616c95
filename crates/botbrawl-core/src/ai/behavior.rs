//! The five preset geometric behaviors.
//!
//! Each behavior is a pure function of the two fighters' current states and
//! an aggression level. The returned direction is not yet normalized; the
//! controller normalizes after blending.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fighter::FighterState;

/// Opponent speed, in units per tick, above which `reactive` sidesteps.
pub const REACTIVE_DODGE_SPEED: f32 = 3.0;

/// Weight of the primary behavior when a secondary is blended in.
pub const PRIMARY_BLEND_WEIGHT: f32 = 0.7;

/// Preset behavior selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorType {
    /// Charge straight in.
    Aggressive,
    /// Hold a standoff distance and orbit.
    Defensive,
    /// Circle around, cutting in as aggression rises.
    Flanker,
    /// Full-speed collision course.
    Ram,
    /// Dodge a fast-moving opponent, otherwise approach.
    Reactive,
}

impl BehaviorType {
    /// Every behavior, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Aggressive,
        Self::Defensive,
        Self::Flanker,
        Self::Ram,
        Self::Reactive,
    ];

    /// Lowercase tag, also used as the fighter's action label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Defensive => "defensive",
            Self::Flanker => "flanker",
            Self::Ram => "ram",
            Self::Reactive => "reactive",
        }
    }
}

impl fmt::Display for BehaviorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of one behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Desired movement, unnormalized.
    pub direction: Vec2,
    /// Facing in radians.
    pub facing: f32,
    /// Weapon-use intent.
    pub attack: bool,
}

impl Steering {
    /// No movement, facing along +x.
    pub const IDLE: Self = Self {
        direction: Vec2::ZERO,
        facing: 0.0,
        attack: false,
    };

    /// Weighted blend of two steerings: `self * weight + other * (1 - weight)`.
    ///
    /// Facings are blended as unit vectors, so headings either side of the
    /// `±π` seam average to a heading near the seam. Opposite facings that
    /// cancel out keep `self`'s. Attack intent is the OR of both.
    #[must_use]
    pub fn blend(self, other: Self, weight: f32) -> Self {
        let heading = Vec2::from_angle(self.facing) * weight + Vec2::from_angle(other.facing) * (1.0 - weight);
        let facing = if heading.length_squared() > 1e-8 {
            heading.y.atan2(heading.x)
        } else {
            self.facing
        };
        Self {
            direction: self.direction * weight + other.direction * (1.0 - weight),
            facing,
            attack: self.attack || other.attack,
        }
    }
}

/// Left-hand perpendicular `(-y, x)`.
#[inline]
#[must_use]
pub(crate) fn perp_left(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Runs one preset behavior.
///
/// # Example
///
/// ```
/// use botbrawl_core::ai::{behavior, BehaviorType};
/// use botbrawl_core::catalog::Catalog;
/// use botbrawl_core::fighter::{BotConfig, FighterState, Loadout};
/// use glam::Vec2;
///
/// let catalog = Catalog::standard();
/// let config = BotConfig::scripted("a", "brawler", "");
/// let loadout = Loadout::resolve(&config, &catalog);
/// let me = FighterState::spawn("a".into(), &loadout, Vec2::new(0.0, 0.0));
/// let them = FighterState::spawn("b".into(), &loadout, Vec2::new(60.0, 0.0));
///
/// let steering = behavior(BehaviorType::Aggressive, &me, &them, 50.0);
/// assert_eq!(steering.direction, Vec2::X);
/// assert!(steering.attack); // 60 < 50 + 25
/// ```
#[must_use]
pub fn behavior(
    kind: BehaviorType,
    me: &FighterState,
    opponent: &FighterState,
    aggression: f32,
) -> Steering {
    let to_target = opponent.position - me.position;
    let distance = to_target.length();
    let facing = to_target.y.atan2(to_target.x);
    let toward = to_target.normalize_or_zero();
    let level = aggression / 100.0;

    let (direction, attack) = match kind {
        BehaviorType::Aggressive => (toward, distance < 50.0 + level * 50.0),
        BehaviorType::Defensive => {
            let preferred = 150.0 - level * 100.0;
            let direction = if distance < preferred {
                -toward
            } else if distance > preferred + 50.0 {
                toward * 0.5
            } else {
                perp_left(to_target).normalize_or_zero()
            };
            (direction, distance < 80.0)
        }
        BehaviorType::Flanker => {
            let perpendicular = perp_left(to_target).normalize_or_zero();
            let direction = if distance > 100.0 {
                toward * 0.5 + perpendicular * 0.5
            } else {
                perpendicular * 0.7 + toward * level * 0.5
            };
            (direction, distance < 60.0)
        }
        BehaviorType::Ram => (toward, distance < 40.0),
        BehaviorType::Reactive => {
            let direction = if opponent.speed() > REACTIVE_DODGE_SPEED {
                let dodge = perp_left(opponent.velocity).normalize_or_zero();
                (dodge * 0.6 + to_target * 0.4).normalize_or_zero()
            } else {
                toward * (0.5 + level * 0.5)
            };
            (direction, distance < 70.0)
        }
    };

    Steering {
        direction,
        facing,
        attack,
    }
}
