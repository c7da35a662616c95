//! Interactive operation: a match paced by an external frame clock.
//!
//! A [`Session`] collects fighters, then advances a [`Battle`] by as many
//! fixed ticks as the elapsed frame time allows. The ticks are the same ones
//! [`run_battle`](crate::battle::run_battle) executes; only the pacing differs.

use std::fmt;

use glam::Vec2;
use tracing::debug;

use crate::battle::Battle;
use crate::catalog::{ArenaDef, Catalog};
use crate::config::MatchConfig;
use crate::error::SessionError;
use crate::events::DamageEvent;
use crate::fighter::{BotConfig, FighterState, Roster};
use crate::result::{BattleState, MatchResult};

/// Longest frame delta honored by one [`Session::tick`] call.
pub const MAX_FRAME_DELTA_MS: f32 = 250.0;

/// Called once per executed tick with the post-tick state.
pub type StateCallback = Box<dyn FnMut(&BattleState) + Send>;

/// Called once per damage application.
pub type DamageCallback = Box<dyn FnMut(&DamageEvent) + Send>;

/// A match driven one frame at a time.
///
/// # Example
///
/// ```
/// use botbrawl_core::catalog::Catalog;
/// use botbrawl_core::config::MatchConfig;
/// use botbrawl_core::fighter::BotConfig;
/// use botbrawl_core::session::Session;
/// use glam::Vec2;
///
/// let mut session = Session::new(Catalog::standard(), "basicPit", MatchConfig::interactive());
/// session.add_fighter(BotConfig::scripted("red", "brawler", "DEFAULT attack"), Vec2::new(200.0, 300.0)).unwrap();
/// session.add_fighter(BotConfig::scripted("blue", "brawler", "DEFAULT attack"), Vec2::new(600.0, 300.0)).unwrap();
///
/// // 50 ms of frame time covers three 60 Hz ticks
/// assert_eq!(session.tick(50.0), 3);
/// session.pause();
/// assert_eq!(session.tick(50.0), 0);
/// ```
pub struct Session {
    catalog: Catalog,
    arena: ArenaDef,
    config: MatchConfig,
    roster: Roster,
    battle: Option<Battle>,
    paused: bool,
    accumulator_ms: f32,
    on_state_change: Option<StateCallback>,
    on_damage_event: Option<DamageCallback>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("arena", &self.arena)
            .field("config", &self.config)
            .field("roster", &self.roster)
            .field("battle", &self.battle)
            .field("paused", &self.paused)
            .field("accumulator_ms", &self.accumulator_ms)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates an empty session on the given arena.
    #[must_use]
    pub fn new(catalog: Catalog, arena_id: &str, config: MatchConfig) -> Self {
        let arena = catalog.arena_or_fallback(arena_id);
        Self {
            catalog,
            arena,
            config,
            roster: Roster::new(),
            battle: None,
            paused: false,
            accumulator_ms: 0.0,
            on_state_change: None,
            on_damage_event: None,
        }
    }

    /// Enters a fighter at `start`.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyStarted`] once the first tick has run, plus the
    /// roster errors of [`Roster::add`].
    pub fn add_fighter(&mut self, config: BotConfig, start: Vec2) -> Result<usize, SessionError> {
        if self.battle.is_some() {
            return Err(SessionError::AlreadyStarted(config.id.to_string()));
        }
        self.roster.add(config, start, &self.catalog)
    }

    /// Advances by `delta_ms` of frame time and returns the ticks executed.
    ///
    /// The first call starts the match. Leftover time carries to the next
    /// call. Deltas above [`MAX_FRAME_DELTA_MS`] are clamped so a stalled
    /// frame cannot trigger a burst of catch-up ticks.
    pub fn tick(&mut self, delta_ms: f32) -> usize {
        if self.paused || self.is_finished() {
            return 0;
        }
        let delta = if delta_ms.is_finite() {
            delta_ms.clamp(0.0, MAX_FRAME_DELTA_MS)
        } else {
            0.0
        };
        self.accumulator_ms += delta;

        let battle = self.battle.get_or_insert_with(|| {
            debug!(fighters = self.roster.len(), "interactive match started");
            Battle::new(self.roster.clone(), self.arena.clone(), self.config.clone())
        });
        let tick_ms = self.config.tick_ms;

        let mut executed = 0;
        while !battle.is_finished() && (tick_ms <= 0.0 || self.accumulator_ms >= tick_ms) {
            battle.step();
            executed += 1;
            self.accumulator_ms -= tick_ms.max(0.0);

            if let Some(callback) = self.on_damage_event.as_mut() {
                battle.last_damage().iter().for_each(|event| callback(event));
            }
            if let Some(callback) = self.on_state_change.as_mut() {
                callback(&battle.snapshot());
            }
            if tick_ms <= 0.0 {
                break;
            }
        }
        if battle.is_finished() {
            self.accumulator_ms = 0.0;
        }
        executed
    }

    /// Stops tick advancement until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes tick advancement.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Discards fighters, state and logs. Subscriptions survive.
    pub fn reset(&mut self) {
        self.roster = Roster::new();
        self.battle = None;
        self.paused = false;
        self.accumulator_ms = 0.0;
    }

    /// Subscribes to per-tick state. Replaces any previous subscriber.
    pub fn on_state_change(&mut self, callback: impl FnMut(&BattleState) + Send + 'static) {
        self.on_state_change = Some(Box::new(callback));
    }

    /// Subscribes to damage events. Replaces any previous subscriber.
    pub fn on_damage_event(&mut self, callback: impl FnMut(&DamageEvent) + Send + 'static) {
        self.on_damage_event = Some(Box::new(callback));
    }

    /// Returns true while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once the first tick has run.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.battle.is_some()
    }

    /// Returns true once the match has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.battle.as_ref().is_some_and(Battle::is_finished)
    }

    /// Fighters entered so far.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Match in progress, once started.
    #[must_use]
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Current fighter states; empty before the first tick.
    #[must_use]
    pub fn states(&self) -> &[FighterState] {
        match &self.battle {
            Some(battle) => battle.states(),
            None => &[],
        }
    }

    /// Takes the result of a finished match, leaving the session empty.
    pub fn take_result(&mut self) -> Option<MatchResult> {
        if !self.is_finished() {
            return None;
        }
        let result = self.battle.take().map(Battle::into_result);
        self.reset();
        result
    }
}
