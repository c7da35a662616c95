//! Contact resolution: turns a physics step's contacts into damage.
//!
//! Resolvers are the write phase of a tick. Each declares which contact
//! classes it handles via [`Resolver::handles()`]; the match routes contacts
//! accordingly and hands every resolver the same pair of state buffers.
//!
//! # Invariants
//!
//! - Resolvers read fighter facts (alive, cooldowns) from `current` and write
//!   HP, cooldowns and flags to `next`
//! - Both directions of a fighter contact are judged from `current`, so
//!   neither fighter gains from being first in the roster
//! - Every HP change is recorded as a [`DamageEvent`]
//!
//! # Available Resolvers
//!
//! - [`CombatResolver`]: weapons, momentum, spinner contact damage
//! - [`HazardResolver`]: walls, pits, spikes

mod combat;
mod hazard;

pub use combat::{
    CombatResolver, FLIPPER_KNOCKBACK, FLIPPER_LIFT, HAMMER_VELOCITY_FACTOR, MOMENTUM_FACTOR,
    SPINNER_TICK_FACTOR,
};
pub use hazard::{HazardResolver, SPIKE_DEFAULT_DAMAGE, SPIKE_TICK_FACTOR, WALL_DAMAGE_THRESHOLD};

use glam::Vec2;

use crate::catalog::ArenaDef;
use crate::events::{DamageCause, DamageEvent};
use crate::fighter::{armor_reduced, FighterState, Roster};
use crate::physics::{Contact, ContactClass};

/// Read-only inputs shared by every resolver for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Entrants, indexed like the state buffers and physics bodies.
    pub roster: &'a Roster,
    /// Arena, for hazard lookups by sensor index.
    pub arena: &'a ArenaDef,
    /// Simulated time of this tick.
    pub timestamp: f32,
    /// Drive force per point of speed, the unit of scripted knockback.
    pub force_per_speed: f32,
}

/// What resolution produced beyond state changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutput {
    /// Damage applied this tick, in resolution order.
    pub damage: Vec<DamageEvent>,
    /// Forces to feed the physics engine before the next step.
    pub forces: Vec<(usize, Vec2)>,
}

impl TickOutput {
    /// Applies armor-reduced damage to `next[target]` and logs it.
    ///
    /// Does nothing if the target is already destroyed in `next` or the
    /// amount rounds to nothing.
    pub(crate) fn hit(
        &mut self,
        ctx: &TickContext<'_>,
        next: &mut [FighterState],
        attacker: Option<usize>,
        target: usize,
        raw: f32,
        cause: DamageCause,
    ) {
        let Some(entrant) = ctx.roster.get(target) else {
            return;
        };
        let Some(state) = next.get_mut(target) else {
            return;
        };
        if !state.is_alive() || raw <= 0.0 {
            return;
        }

        let applied = armor_reduced(raw, entrant.stats.damage_reduction);
        if applied <= 0.0 {
            return;
        }
        state.apply_damage(applied);

        self.damage.push(DamageEvent {
            attacker_id: attacker.and_then(|i| ctx.roster.get(i)).map(|e| e.id().clone()),
            target_id: entrant.id().clone(),
            damage: applied,
            cause,
            timestamp: ctx.timestamp,
        });
    }
}

/// Resolves contacts into state mutations.
///
/// # Example
///
/// ```
/// use botbrawl_core::fighter::FighterState;
/// use botbrawl_core::physics::{Contact, ContactClass};
/// use botbrawl_core::resolver::{Resolver, TickContext, TickOutput};
///
/// struct Quiet;
///
/// impl Resolver for Quiet {
///     fn handles(&self) -> &[ContactClass] {
///         &[ContactClass::Wall]
///     }
///
///     fn resolve(
///         &self,
///         _contacts: &[&Contact],
///         _ctx: &TickContext<'_>,
///         _current: &[FighterState],
///         _next: &mut [FighterState],
///         _out: &mut TickOutput,
///     ) {
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Contact classes this resolver handles.
    fn handles(&self) -> &[ContactClass];

    /// Applies this resolver's rules.
    ///
    /// `contacts` holds only the classes named by [`handles()`](Self::handles),
    /// in physics order.
    fn resolve(
        &self,
        contacts: &[&Contact],
        ctx: &TickContext<'_>,
        current: &[FighterState],
        next: &mut [FighterState],
        out: &mut TickOutput,
    );
}

/// The resolvers used by every match, in execution order.
#[must_use]
pub fn standard_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![Box::new(CombatResolver::new()), Box::new(HazardResolver::new())]
}
