//! Arena damage: walls, spike zones and pits.

use tracing::debug;

use crate::catalog::HazardKind;
use crate::events::{DamageCause, DamageEvent};
use crate::fighter::{FighterState, StatusFlags};
use crate::physics::{Contact, ContactClass, ContactKind};

use super::{Resolver, TickContext, TickOutput};

/// Wall impacts at or below this speed are harmless.
pub const WALL_DAMAGE_THRESHOLD: f32 = 8.0;

/// Spike damage per tick when the hazard does not set one.
pub const SPIKE_DEFAULT_DAMAGE: f32 = 0.5;

/// Fraction of a spike zone's rated damage dealt per tick.
pub const SPIKE_TICK_FACTOR: f32 = 0.1;

const WALL_DAMAGE_PER_SPEED: f32 = 2.0;

/// Resolver for wall and sensor contacts.
///
/// Walls hurt once per impact, scaled by how far the impact speed exceeds
/// [`WALL_DAMAGE_THRESHOLD`]. Spikes hurt every tick of overlap. Pits
/// destroy outright, ignoring armor.
#[derive(Debug, Clone, Default)]
pub struct HazardResolver;

impl HazardResolver {
    /// Creates a new hazard resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn wall(ctx: &TickContext<'_>, next: &mut [FighterState], out: &mut TickOutput, contact: &Contact) {
        if !contact.began() || contact.speed <= WALL_DAMAGE_THRESHOLD {
            return;
        }
        let raw = (contact.speed - WALL_DAMAGE_THRESHOLD) * WALL_DAMAGE_PER_SPEED;
        out.hit(ctx, next, None, contact.body.index(), raw, DamageCause::WALL);
    }

    fn spikes(
        ctx: &TickContext<'_>,
        next: &mut [FighterState],
        out: &mut TickOutput,
        target: usize,
        rated: Option<f32>,
    ) {
        if let Some(state) = next.get_mut(target) {
            state.status.insert(StatusFlags::ON_SPIKES);
        }
        let raw = rated.map_or(SPIKE_DEFAULT_DAMAGE, |d| d * SPIKE_TICK_FACTOR);
        out.hit(ctx, next, None, target, raw, DamageCause::SPIKES);
    }

    fn pit(ctx: &TickContext<'_>, next: &mut [FighterState], out: &mut TickOutput, target: usize) {
        let Some(state) = next.get_mut(target).filter(|s| s.is_alive()) else {
            return;
        };
        let lost = state.hp;
        state.destroy();
        state.status.insert(StatusFlags::IN_PIT);
        debug!(fighter = %state.id, lost, "fell into pit");

        out.damage.push(DamageEvent {
            attacker_id: None,
            target_id: state.id.clone(),
            damage: lost,
            cause: DamageCause::PIT,
            timestamp: ctx.timestamp,
        });
    }
}

impl Resolver for HazardResolver {
    fn handles(&self) -> &[ContactClass] {
        &[ContactClass::Wall, ContactClass::Sensor]
    }

    fn resolve(
        &self,
        contacts: &[&Contact],
        ctx: &TickContext<'_>,
        _current: &[FighterState],
        next: &mut [FighterState],
        out: &mut TickOutput,
    ) {
        for contact in contacts {
            let target = contact.body.index();
            match contact.other {
                ContactKind::Wall(_) => Self::wall(ctx, next, out, contact),
                ContactKind::Sensor(index) => match ctx.arena.hazards.get(index) {
                    Some(hazard) if hazard.kind == HazardKind::Spike => {
                        Self::spikes(ctx, next, out, target, hazard.damage);
                    }
                    Some(_) => Self::pit(ctx, next, out, target),
                    None => {}
                },
                ContactKind::Body(_) => {}
            }
        }
    }
}
