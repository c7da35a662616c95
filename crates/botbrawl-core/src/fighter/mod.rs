//! Fighter definitions and runtime state.
//!
//! - [`FighterId`]: Stable identifier taken from the fighter's config
//! - [`BotConfig`]: What the player built (chassis, weapons, armor, strategy)
//! - [`Loadout`]: A config resolved against a [`Catalog`](crate::catalog::Catalog)
//! - [`FighterStats`]: Derived effective stats
//! - [`FighterState`]: Per-tick mutable state owned by the match
//! - [`Roster`]: The two [`Entrant`]s of a match, in insertion order
//!
//! # Example
//!
//! ```
//! use botbrawl_core::catalog::Catalog;
//! use botbrawl_core::fighter::{BotConfig, Loadout};
//!
//! let config = BotConfig::scripted("red", "brawler", "DEFAULT attack")
//!     .with_weapons(["spikeHammer"]);
//! let loadout = Loadout::resolve(&config, &Catalog::standard());
//! let stats = loadout.stats();
//!
//! assert_eq!(stats.max_hp, 100.0);
//! assert_eq!(stats.weight, 125.0);
//! ```

mod config;
mod loadout;
mod roster;
mod state;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use config::{AiConfig, BotConfig, Strategy};
pub use loadout::{armor_reduced, FighterStats, Loadout, MountedWeapon};
pub use roster::{Entrant, Roster, MAX_FIGHTERS};
pub use state::{FighterState, StatusFlags};

/// Unique identifier for a fighter within a match.
///
/// Ordering is lexical; the match itself keeps fighters in insertion order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FighterId(String);

impl FighterId {
    /// Creates a new fighter id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FighterId({})", self.0)
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FighterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FighterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fighter_id_display_and_debug() {
        let id = FighterId::new("red");
        assert_eq!(id.to_string(), "red");
        assert_eq!(format!("{id:?}"), "FighterId(red)");
        assert_eq!(id.as_str(), "red");
    }

    #[test]
    fn fighter_id_serializes_as_plain_string() {
        let id = FighterId::from("blue");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"blue\"");
    }
}
