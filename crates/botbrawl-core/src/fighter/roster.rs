//! The fighters entered in a match.

use glam::Vec2;

use super::{BotConfig, FighterId, FighterState, FighterStats, Loadout};
use crate::catalog::Catalog;
use crate::error::SessionError;

/// Fighters per match.
pub const MAX_FIGHTERS: usize = 2;

/// A fighter's static match data: config, resolved parts, stats, spawn point.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrant {
    /// As configured.
    pub config: BotConfig,
    /// Resolved against the match catalog.
    pub loadout: Loadout,
    /// Derived from the loadout.
    pub stats: FighterStats,
    /// Starting position.
    pub spawn: Vec2,
}

impl Entrant {
    /// Resolves a config.
    #[must_use]
    pub fn new(config: BotConfig, spawn: Vec2, catalog: &Catalog) -> Self {
        let loadout = Loadout::resolve(&config, catalog);
        let stats = loadout.stats();
        Self {
            config,
            loadout,
            stats,
            spawn,
        }
    }

    /// Fighter id.
    #[must_use]
    pub fn id(&self) -> &FighterId {
        &self.config.id
    }

    /// Fresh state at the spawn point.
    #[must_use]
    pub fn spawn_state(&self) -> FighterState {
        FighterState::spawn(self.config.id.clone(), &self.loadout, self.spawn)
    }
}

/// Entrants in insertion order. Index `i` here is index `i` everywhere else
/// in the match: states, physics bodies, controllers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entrants: Vec<Entrant>,
}

impl Roster {
    /// Empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fighter, rejecting duplicates and a third entrant.
    ///
    /// # Errors
    ///
    /// [`SessionError::RosterFull`] when two fighters are already entered,
    /// [`SessionError::DuplicateId`] when the id is taken.
    pub fn add(&mut self, config: BotConfig, spawn: Vec2, catalog: &Catalog) -> Result<usize, SessionError> {
        if self.entrants.len() >= MAX_FIGHTERS {
            return Err(SessionError::RosterFull(self.entrants.len()));
        }
        if self.position(&config.id).is_some() {
            return Err(SessionError::DuplicateId(config.id.to_string()));
        }
        self.entrants.push(Entrant::new(config, spawn, catalog));
        Ok(self.entrants.len() - 1)
    }

    /// Number of entrants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    /// Returns true if nobody is entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Entrant at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entrant> {
        self.entrants.get(index)
    }

    /// Entrants in order.
    pub fn iter(&self) -> impl Iterator<Item = &Entrant> + '_ {
        self.entrants.iter()
    }

    /// Index of the fighter with `id`.
    #[must_use]
    pub fn position(&self, id: &FighterId) -> Option<usize> {
        self.entrants.iter().position(|e| e.id() == id)
    }

    /// Index of the fighter `index` is fighting.
    #[must_use]
    pub fn opponent_of(&self, index: usize) -> Option<usize> {
        (0..self.entrants.len()).find(|&i| i != index)
    }
}
