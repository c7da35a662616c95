//! Append-only match records: damage and commentary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::WeaponType;
use crate::fighter::FighterId;

// =============================================================================
// Damage
// =============================================================================

/// Damage that does not come from a mounted weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentCause {
    /// Bare body impact with no weapon contributing.
    Collision,
    /// High-speed impact with a boundary wall.
    Wall,
    /// Fell into a pit.
    Pit,
    /// Standing on a spike zone.
    Spikes,
}

/// What dealt a hit. Serializes as a bare tag such as `"hammer"` or `"pit"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DamageCause {
    /// A weapon of this type.
    Weapon(WeaponType),
    /// The arena or the collision itself.
    Environment(EnvironmentCause),
}

impl DamageCause {
    /// Body-on-body impact.
    pub const COLLISION: Self = Self::Environment(EnvironmentCause::Collision);
    /// Wall impact.
    pub const WALL: Self = Self::Environment(EnvironmentCause::Wall);
    /// Pit fall.
    pub const PIT: Self = Self::Environment(EnvironmentCause::Pit);
    /// Spike zone.
    pub const SPIKES: Self = Self::Environment(EnvironmentCause::Spikes);

    /// Lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapon(kind) => kind.as_str(),
            Self::Environment(EnvironmentCause::Collision) => "collision",
            Self::Environment(EnvironmentCause::Wall) => "wall",
            Self::Environment(EnvironmentCause::Pit) => "pit",
            Self::Environment(EnvironmentCause::Spikes) => "spikes",
        }
    }
}

impl fmt::Display for DamageCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application of damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageEvent {
    /// Fighter that dealt it; `None` for arena damage.
    pub attacker_id: Option<FighterId>,
    /// Fighter that took it.
    pub target_id: FighterId,
    /// Damage after armor.
    pub damage: f32,
    /// Source tag.
    #[serde(rename = "weaponType")]
    pub cause: DamageCause,
    /// Simulated time of the tick, in milliseconds.
    pub timestamp: f32,
}

// =============================================================================
// Commentary
// =============================================================================

/// Commentary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentaryKind {
    /// Opening lines.
    Start,
    /// A single heavy hit.
    BigHit,
    /// A fighter dropped below a quarter of its HP.
    LowHp,
    /// Pit elimination.
    PitFall,
    /// Hard wall impact.
    WallSlam,
    /// Match over.
    Finish,
    /// Filler during a lull.
    Banter,
}

/// Who is talking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Play-by-play.
    Chuck,
    /// Color commentary.
    Frank,
    /// Both at once.
    Both,
}

impl Speaker {
    /// The other commentator. `Both` stays `Both`.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Chuck => Self::Frank,
            Self::Frank => Self::Chuck,
            Self::Both => Self::Both,
        }
    }
}

/// One narrated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryEvent {
    /// Simulated time the line is meant for, in whole milliseconds.
    pub timestamp: u64,
    /// Category.
    #[serde(rename = "type")]
    pub kind: CommentaryKind,
    /// Spoken text.
    pub message: String,
    /// Who says it.
    pub speaker: Speaker,
    /// Intensity from 1 to 10.
    pub excitement: u8,
}
