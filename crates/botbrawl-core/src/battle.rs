//! The match driver: one canonical tick loop for batch and interactive play.
//!
//! # Tick Phases
//!
//! 1. **DECIDE**: every controller reads the same snapshot of `current`
//! 2. **FORCE**: alive fighters push toward their intent; last tick's
//!    knockback is applied on top
//! 3. **STEP**: the physics engine integrates and reports contacts
//! 4. **RESOLVE**: `next` is cloned from `current`, motion is read back, and
//!    each resolver handles the contact classes it declares
//! 5. **COOL**: weapon cooldowns count down by the tick length
//! 6. **APPLY**: the buffers swap, commentary observes, termination is checked
//!
//! Pacing lives outside this module. [`run_battle`] loops to the end;
//! [`Session`](crate::session::Session) calls [`Battle::step`] as real time
//! allows. Both see identical ticks.

use std::fmt;

use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::ai::{controller_for, Combatant, Controller, Intent, Perception};
use crate::catalog::{ArenaDef, Catalog};
use crate::commentary::CommentaryGenerator;
use crate::config::MatchConfig;
use crate::events::DamageEvent;
use crate::fighter::{BotConfig, FighterId, FighterState, Roster, StatusFlags};
use crate::physics::{wrap_angle, ArenaPhysics, BodyDesc, BodyHandle, Contact, PhysicsEngine};
use crate::resolver::{standard_resolvers, Resolver, TickContext, TickOutput};
use crate::result::{BattleState, FinalState, MatchResult};

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Sole survivor, `None` for a draw.
    pub winner: Option<FighterId>,
    /// Ended by the time cap with more than one fighter standing.
    pub timed_out: bool,
}

/// A match in progress.
pub struct Battle {
    config: MatchConfig,
    arena: ArenaDef,
    roster: Roster,
    controllers: Vec<Box<dyn Controller>>,
    physics: Box<dyn PhysicsEngine>,
    bodies: Vec<BodyHandle>,
    resolvers: Vec<Box<dyn Resolver>>,
    current: Vec<FighterState>,
    next: Vec<FighterState>,
    knockback: Vec<(usize, Vec2)>,
    commentary: CommentaryGenerator,
    damage_log: Vec<DamageEvent>,
    last_damage: Vec<DamageEvent>,
    frames: Vec<BattleState>,
    tick: u64,
    outcome: Option<Outcome>,
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("config", &self.config)
            .field("roster", &self.roster)
            .field("current", &self.current)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("tick", &self.tick)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Battle {
    /// Sets up a match on the built-in physics world.
    ///
    /// # Example
    ///
    /// ```
    /// use botbrawl_core::battle::Battle;
    /// use botbrawl_core::catalog::{ArenaDef, Catalog};
    /// use botbrawl_core::config::MatchConfig;
    /// use botbrawl_core::fighter::{BotConfig, Roster};
    /// use glam::Vec2;
    ///
    /// let catalog = Catalog::standard();
    /// let mut roster = Roster::new();
    /// roster.add(BotConfig::scripted("a", "brawler", "DEFAULT attack"), Vec2::new(200.0, 300.0), &catalog).unwrap();
    /// roster.add(BotConfig::scripted("b", "brawler", "DEFAULT attack"), Vec2::new(600.0, 300.0), &catalog).unwrap();
    ///
    /// let mut battle = Battle::new(roster, ArenaDef::default(), MatchConfig::default());
    /// battle.step();
    /// assert_eq!(battle.tick(), 1);
    /// assert_eq!(battle.states()[0].current_action, "attack");
    /// ```
    #[must_use]
    pub fn new(roster: Roster, arena: ArenaDef, config: MatchConfig) -> Self {
        let physics = ArenaPhysics::new(&arena, config.physics);
        Self::with_engine(roster, arena, config, Box::new(physics))
    }

    /// Sets up a match on a caller-supplied physics engine.
    ///
    /// The engine must already carry the arena's walls and one sensor per
    /// hazard, registered in hazard order. Fighter bodies are added here.
    #[must_use]
    pub fn with_engine(
        roster: Roster,
        arena: ArenaDef,
        config: MatchConfig,
        mut physics: Box<dyn PhysicsEngine>,
    ) -> Self {
        let bodies = roster
            .iter()
            .map(|entrant| {
                physics.add_body(BodyDesc {
                    position: entrant.spawn,
                    radius: entrant.stats.radius,
                    mass: entrant.stats.weight,
                })
            })
            .collect();
        let controllers = roster.iter().map(|e| controller_for(&e.config.strategy)).collect();
        let current: Vec<FighterState> = roster.iter().map(crate::fighter::Entrant::spawn_state).collect();

        let mut commentary = CommentaryGenerator::new(config.commentary, config.seed);
        commentary.start(&roster);

        debug!(
            fighters = roster.len(),
            arena_size = ?Vec2::new(arena.width, arena.height),
            hazards = arena.hazards.len(),
            seed = config.seed,
            mode = ?config.mode,
            "match set up"
        );

        Self {
            next: current.clone(),
            current,
            config,
            arena,
            roster,
            controllers,
            physics,
            bodies,
            resolvers: standard_resolvers(),
            knockback: Vec::new(),
            commentary,
            damage_log: Vec::new(),
            last_damage: Vec::new(),
            frames: Vec::new(),
            tick: 0,
            outcome: None,
        }
    }

    /// Executes one tick. Does nothing once the match is over.
    ///
    /// Returns true if the match is over after this call.
    pub fn step(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        let dt = self.config.tick_ms;
        let timestamp = self.time_at(self.tick + 1);

        // DECIDE: every intent comes from the same snapshot
        let intents = self.decide();

        // FORCE
        let physics_config = self.config.physics;
        for (i, intent) in intents.iter().enumerate() {
            let (Some(state), Some(entrant), Some(&body)) =
                (self.current.get(i), self.roster.get(i), self.bodies.get(i))
            else {
                continue;
            };
            if !state.is_alive() {
                continue;
            }
            let drive = intent.direction * entrant.stats.speed * physics_config.force_per_speed;
            self.physics.apply_force(body, drive);
            let turn = wrap_angle(intent.facing - state.angle) * physics_config.turn_rate;
            self.physics.set_angular_velocity(body, turn);
        }
        for (i, force) in self.knockback.drain(..) {
            if let Some(&body) = self.bodies.get(i) {
                self.physics.apply_force(body, force);
            }
        }

        // STEP
        self.physics.step(dt);

        // RESOLVE
        self.next.clone_from(&self.current);
        for (i, state) in self.next.iter_mut().enumerate() {
            state.status.remove(StatusFlags::IN_CONTACT | StatusFlags::ON_SPIKES);
            if let Some(body) = self.bodies.get(i).and_then(|&b| self.physics.body(b)) {
                state.position = body.position;
                state.velocity = body.velocity;
                state.angle = body.angle;
            }
            if let Some(intent) = intents.get(i).filter(|_| state.is_alive()) {
                intent.label.clone_into(&mut state.current_action);
                state.matched_rule = intent.matched_rule;
            }
        }

        let ctx = TickContext {
            roster: &self.roster,
            arena: &self.arena,
            timestamp,
            force_per_speed: physics_config.force_per_speed,
        };
        let mut out = TickOutput::default();
        let contacts = self.physics.contacts();
        for resolver in &self.resolvers {
            let relevant: Vec<&Contact> = contacts
                .iter()
                .filter(|c| resolver.handles().contains(&c.other.class()))
                .collect();
            if !relevant.is_empty() {
                resolver.resolve(&relevant, &ctx, &self.current, &mut self.next, &mut out);
            }
        }
        trace!(tick = self.tick + 1, contacts = contacts.len(), hits = out.damage.len(), "tick resolved");

        // COOL
        for state in &mut self.next {
            state.tick_cooldowns(dt);
        }

        // APPLY
        std::mem::swap(&mut self.current, &mut self.next);
        self.tick += 1;
        for (before, after) in self.next.iter().zip(&self.current) {
            if before.is_alive() && !after.is_alive() {
                debug!(fighter = %after.id, tick = self.tick, in_pit = after.status.contains(StatusFlags::IN_PIT), "fighter destroyed");
            }
        }

        let TickOutput { damage, forces } = out;
        self.knockback = forces;
        self.commentary.observe(timestamp, &damage, &self.current);
        self.damage_log.extend(damage.iter().cloned());
        if self.config.record_frames {
            self.frames.push(BattleState {
                tick: self.tick,
                timestamp,
                fighters: self.current.clone(),
                damage: damage.clone(),
            });
        }
        self.last_damage = damage;

        self.check_termination(timestamp);
        self.outcome.is_some()
    }

    /// Steps until the match ends and returns the result.
    #[must_use]
    pub fn run(mut self) -> MatchResult {
        while !self.step() {}
        self.into_result()
    }

    /// Packages the match so far. A match that has not ended reports no
    /// winner and no timeout.
    #[must_use]
    pub fn into_result(self) -> MatchResult {
        let duration = self.elapsed_ms();
        let (winner, timed_out) = self
            .outcome
            .map_or((None, false), |o| (o.winner, o.timed_out));
        MatchResult {
            winner,
            duration,
            frame_count: self.tick,
            final_states: self.current.iter().map(FinalState::from).collect(),
            damage_log: self.damage_log,
            commentary: self.commentary.into_events(),
            timed_out,
            frames: self.frames,
        }
    }

    /// Fighter states after the last tick, in roster order.
    #[must_use]
    pub fn states(&self) -> &[FighterState] {
        &self.current
    }

    /// Snapshot of the last tick.
    #[must_use]
    pub fn snapshot(&self) -> BattleState {
        BattleState {
            tick: self.tick,
            timestamp: self.elapsed_ms(),
            fighters: self.current.clone(),
            damage: self.last_damage.clone(),
        }
    }

    /// Damage applied during the last tick.
    #[must_use]
    pub fn last_damage(&self) -> &[DamageEvent] {
        &self.last_damage
    }

    /// Every damage event so far.
    #[must_use]
    pub fn damage_log(&self) -> &[DamageEvent] {
        &self.damage_log
    }

    /// Narration so far.
    #[must_use]
    pub fn commentary(&self) -> &CommentaryGenerator {
        &self.commentary
    }

    /// Entrants.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Arena in play.
    #[must_use]
    pub fn arena(&self) -> &ArenaDef {
        &self.arena
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Ticks executed.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated milliseconds elapsed.
    #[must_use]
    pub fn elapsed_ms(&self) -> f32 {
        self.time_at(self.tick)
    }

    /// Returns true once the match has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// How the match ended, once it has.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn decide(&mut self) -> Vec<Intent> {
        let dt_ms = self.config.tick_ms;
        let (roster, states) = (&self.roster, self.current.as_slice());

        let mut intents = Vec::with_capacity(self.controllers.len());
        for (i, controller) in self.controllers.iter_mut().enumerate() {
            let Some(me) = combatant(roster, states, i) else {
                intents.push(Intent::idle());
                continue;
            };
            let view = Perception {
                me,
                opponent: roster.opponent_of(i).and_then(|j| combatant(roster, states, j)),
                arena: &self.arena,
                dt_ms,
            };
            intents.push(controller.decide(&view));
        }
        intents
    }

    fn check_termination(&mut self, timestamp: f32) {
        let mut alive = self.current.iter().filter(|s| s.is_alive());
        let survivor = alive.next();
        let more = alive.next().is_some();

        let outcome = if !more {
            Outcome {
                winner: survivor.map(|s| s.id.clone()),
                timed_out: false,
            }
        } else if self.tick >= self.config.max_ticks() {
            Outcome {
                winner: None,
                timed_out: true,
            }
        } else {
            return;
        };

        let winner_state = if more { None } else { survivor };
        self.commentary.finish(timestamp, winner_state, outcome.timed_out);
        match &outcome.winner {
            Some(winner) => info!(%winner, ticks = self.tick, duration_ms = timestamp, "match won"),
            None => info!(ticks = self.tick, timed_out = outcome.timed_out, "match drawn"),
        }
        self.outcome = Some(outcome);
    }

    #[allow(clippy::cast_precision_loss)]
    fn time_at(&self, tick: u64) -> f32 {
        tick as f32 * self.config.tick_ms
    }
}

fn combatant<'a>(roster: &'a Roster, states: &'a [FighterState], index: usize) -> Option<Combatant<'a>> {
    let entrant = roster.get(index)?;
    let state = states.get(index)?;
    Some(Combatant::new(state, entrant.stats, entrant.loadout.has_spinner()))
}

/// Runs a complete match with default configuration.
///
/// Unknown catalog ids degrade to defaults, so this never fails. A second
/// fighter sharing the first one's id is renamed `<id>#2`.
#[must_use]
pub fn run_battle(a: BotConfig, b: BotConfig, arena_id: &str, catalog: &Catalog) -> MatchResult {
    run_battle_with(a, b, arena_id, catalog, &MatchConfig::default())
}

/// Runs a complete match with the given configuration.
#[must_use]
pub fn run_battle_with(
    a: BotConfig,
    mut b: BotConfig,
    arena_id: &str,
    catalog: &Catalog,
    config: &MatchConfig,
) -> MatchResult {
    let arena = catalog.arena_or_fallback(arena_id);
    if a.id == b.id {
        let renamed = FighterId::new(format!("{}#2", b.id));
        warn!(id = %b.id, renamed = %renamed, "duplicate fighter id");
        if b.name == b.id.as_str() {
            b.name = renamed.to_string();
        }
        b.id = renamed;
    }

    let size = Vec2::new(arena.width, arena.height);
    let mut roster = Roster::new();
    for (config_entry, fraction) in [a, b].into_iter().zip(config.spawn_fractions) {
        if let Err(err) = roster.add(config_entry, fraction * size, catalog) {
            warn!(%err, "fighter not entered");
        }
    }

    Battle::new(roster, arena, config.clone()).run()
}
