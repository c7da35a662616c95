//! Fighter-versus-fighter damage.
//!
//! The `CombatResolver` handles:
//! - Discrete strikes when a contact begins: every triggered weapon plus a
//!   momentum term, armor applied once to the total
//! - Continuous spinner damage on every tick of contact, begin included
//!
//! # Weapon Rules
//!
//! | Type | Ready | Cooling down |
//! |------|-------|--------------|
//! | flipper | `base * 0.5`, knockback, cooldown | nothing |
//! | hammer | `base * (1 + v * 0.1)`, cooldown | nothing |
//! | saw | `base`, cooldown | `base * 0.3` |
//! | wedge | `base * 0.3` | `base * 0.3` |
//! | other triggered types | `base`, cooldown | nothing |
//! | spinner | `base * 0.1` per tick, never cools down | |
//!
//! `v` is the relative contact speed. The momentum term is
//! `v * (attacker weight / defender weight) * 0.5`.

use glam::Vec2;
use tracing::trace;

use crate::catalog::WeaponType;
use crate::events::DamageCause;
use crate::fighter::{FighterState, StatusFlags};
use crate::physics::{Contact, ContactClass, ContactKind};

use super::{Resolver, TickContext, TickOutput};

/// Scale of the momentum term.
pub const MOMENTUM_FACTOR: f32 = 0.5;

/// Hammer bonus per unit of contact speed.
pub const HAMMER_VELOCITY_FACTOR: f32 = 0.1;

/// Fraction of spinner base damage dealt per tick of contact.
pub const SPINNER_TICK_FACTOR: f32 = 0.1;

/// Flipper push along the attacker-to-target line, in multiples of
/// `force_per_speed`. Roughly fourteen ticks of a typical drive force.
pub const FLIPPER_KNOCKBACK: f32 = 58.0;

/// Flipper push toward the top of the arena, in multiples of `force_per_speed`.
pub const FLIPPER_LIFT: f32 = 35.0;

const SAW_COOLING_FACTOR: f32 = 0.3;
const WEDGE_FACTOR: f32 = 0.3;
const FLIPPER_FACTOR: f32 = 0.5;

/// Resolver for fighter contacts.
///
/// # Example
///
/// ```
/// use botbrawl_core::physics::ContactClass;
/// use botbrawl_core::resolver::{CombatResolver, Resolver};
///
/// let resolver = CombatResolver::new();
/// assert_eq!(resolver.handles(), &[ContactClass::Fighter]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a new combat resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// One direction of a contact-begin strike.
    fn strike(
        ctx: &TickContext<'_>,
        current: &[FighterState],
        next: &mut [FighterState],
        out: &mut TickOutput,
        (attacker, target): (usize, usize),
        speed: f32,
    ) {
        let (Some(att), Some(def)) = (current.get(attacker), current.get(target)) else {
            return;
        };
        let (Some(att_entrant), Some(def_entrant)) = (ctx.roster.get(attacker), ctx.roster.get(target))
        else {
            return;
        };
        if !att.is_alive() || !def.is_alive() {
            return;
        }

        let mut raw = 0.0;
        let mut cause = None;
        for (slot, weapon) in att_entrant.loadout.weapons.iter().enumerate() {
            let spec = weapon.def;
            let ready = att.weapon_ready(slot);
            let damage = match spec.kind {
                WeaponType::Spinner => continue,
                WeaponType::Wedge => spec.base_damage * WEDGE_FACTOR,
                WeaponType::Saw if !ready => spec.base_damage * SAW_COOLING_FACTOR,
                _ if !ready => 0.0,
                WeaponType::Flipper => {
                    let line = (def.position - att.position).try_normalize().unwrap_or(Vec2::X);
                    let kick = (line * FLIPPER_KNOCKBACK - Vec2::Y * FLIPPER_LIFT) * ctx.force_per_speed;
                    out.forces.push((target, kick));
                    spec.base_damage * FLIPPER_FACTOR
                }
                WeaponType::Hammer => spec.base_damage * (1.0 + speed * HAMMER_VELOCITY_FACTOR),
                WeaponType::Saw
                | WeaponType::Flamethrower
                | WeaponType::Emp
                | WeaponType::Grapple
                | WeaponType::Drill
                | WeaponType::Plasma => spec.base_damage,
            };
            if ready && spec.kind != WeaponType::Wedge {
                if let Some(state) = next.get_mut(attacker) {
                    state.trigger_weapon(slot, spec.cooldown_ms);
                }
            }
            if damage > 0.0 {
                raw += damage;
                cause = cause.or(Some(DamageCause::Weapon(spec.kind)));
            }
        }

        raw += speed * (att_entrant.stats.weight / def_entrant.stats.weight) * MOMENTUM_FACTOR;
        trace!(attacker = %att.id, target = %def.id, raw, speed, "contact strike");
        out.hit(ctx, next, Some(attacker), target, raw, cause.unwrap_or(DamageCause::COLLISION));
    }

    /// One direction of continuous spinner damage.
    fn spin(
        ctx: &TickContext<'_>,
        current: &[FighterState],
        next: &mut [FighterState],
        out: &mut TickOutput,
        (attacker, target): (usize, usize),
    ) {
        let alive = current.get(attacker).is_some_and(FighterState::is_alive);
        let Some(entrant) = ctx.roster.get(attacker).filter(|_| alive) else {
            return;
        };
        for weapon in entrant.loadout.weapons.iter().filter(|w| w.def.kind.is_continuous()) {
            let raw = weapon.def.base_damage * SPINNER_TICK_FACTOR;
            out.hit(ctx, next, Some(attacker), target, raw, DamageCause::Weapon(weapon.def.kind));
        }
    }
}

impl Resolver for CombatResolver {
    fn handles(&self) -> &[ContactClass] {
        &[ContactClass::Fighter]
    }

    fn resolve(
        &self,
        contacts: &[&Contact],
        ctx: &TickContext<'_>,
        current: &[FighterState],
        next: &mut [FighterState],
        out: &mut TickOutput,
    ) {
        for contact in contacts {
            let ContactKind::Body(other) = contact.other else {
                continue;
            };
            let (a, b) = (contact.body.index(), other.index());
            for index in [a, b] {
                if let Some(state) = next.get_mut(index) {
                    state.status.insert(StatusFlags::IN_CONTACT);
                }
            }

            if contact.began() {
                Self::strike(ctx, current, next, out, (a, b), contact.speed);
                Self::strike(ctx, current, next, out, (b, a), contact.speed);
            }
            Self::spin(ctx, current, next, out, (a, b));
            Self::spin(ctx, current, next, out, (b, a));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArenaDef;
    use crate::config::PhysicsConfig;
    use crate::fighter::{BotConfig, Roster};
    use crate::physics::ContactPhase;
    use crate::resolver::fixtures::{fighter_contact, roster, states};

    fn bot(id: &str, weapons: &[&str]) -> BotConfig {
        BotConfig::scripted(id, "brawler", "").with_weapons(weapons.iter().copied())
    }

    fn run(roster: &Roster, current: &[FighterState], contact: Contact) -> (Vec<FighterState>, TickOutput) {
        let arena = ArenaDef::default();
        let ctx = TickContext {
            roster,
            arena: &arena,
            timestamp: 0.0,
            force_per_speed: PhysicsConfig::default().force_per_speed,
        };
        let mut next = current.to_vec();
        let mut out = TickOutput::default();
        CombatResolver::new().resolve(&[&contact], &ctx, current, &mut next, &mut out);
        (next, out)
    }

    mod strike_tests {
        use super::*;

        #[test]
        fn hammer_scales_with_speed_and_resets_cooldown() {
            let roster = roster(bot("a", &["spikeHammer"]), bot("b", &[]));
            let current = states(&roster);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 2.0));

            // 20 * 1.2 + 2 * (125 / 100) * 0.5
            let to_b = &out.damage[0];
            assert_eq!(to_b.target_id.as_str(), "b");
            assert!((to_b.damage - 25.25).abs() < 1e-4);
            assert_eq!(to_b.cause, DamageCause::Weapon(WeaponType::Hammer));
            assert!((next[1].hp - 74.75).abs() < 1e-4);
            assert_eq!(next[0].weapon_cooldowns[0], 3000.0);

            // b only has momentum
            let to_a = &out.damage[1];
            assert_eq!(to_a.cause, DamageCause::COLLISION);
            assert!((to_a.damage - 0.8).abs() < 1e-4);
        }

        #[test]
        fn hammer_on_cooldown_adds_nothing() {
            let roster = roster(bot("a", &["spikeHammer"]), bot("b", &[]));
            let mut current = states(&roster);
            current[0].trigger_weapon(0, 1000.0);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 2.0));
            assert!((out.damage[0].damage - 1.25).abs() < 1e-4);
            assert_eq!(out.damage[0].cause, DamageCause::COLLISION);
            assert_eq!(next[0].weapon_cooldowns[0], 1000.0);
        }

        #[test]
        fn saw_keeps_cutting_while_cooling_down() {
            let roster = roster(bot("a", &["buzzSaw"]), bot("b", &[]));
            let mut current = states(&roster);
            current[0].trigger_weapon(0, 200.0);
            let (_, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert!((out.damage[0].damage - 3.6).abs() < 1e-4);
            assert_eq!(out.damage[0].cause, DamageCause::Weapon(WeaponType::Saw));
        }

        #[test]
        fn wedge_is_always_reduced_and_never_cools() {
            let roster = roster(bot("a", &["basicWedge"]), bot("b", &[]));
            let current = states(&roster);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert!((out.damage[0].damage - 0.9).abs() < 1e-4);
            assert!(next[0].weapon_ready(0));
        }

        #[test]
        fn flipper_knocks_target_away_and_up() {
            let roster = roster(bot("a", &["basicFlipper"]), bot("b", &[]));
            let current = states(&roster);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert!((out.damage[0].damage - 2.5).abs() < 1e-4);
            assert_eq!(out.forces, vec![(1, Vec2::new(290.0, -175.0))]);
            assert_eq!(next[0].weapon_cooldowns[0], 2000.0);
        }

        #[test]
        fn generic_weapon_fires_once_per_cooldown() {
            let roster = roster(bot("a", &["combatDrill"]), bot("b", &[]));
            let current = states(&roster);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert!((out.damage[0].damage - 18.0).abs() < 1e-4);
            assert_eq!(next[0].weapon_cooldowns[0], 1500.0);

            let (_, out) = run(&roster, &next, fighter_contact(ContactPhase::Begin, 0.0));
            assert!(out.damage.is_empty());
        }

        #[test]
        fn armor_reduces_the_total() {
            let armored = bot("b", &[]).with_armor("fortressPlating");
            let roster = roster(bot("a", &["combatDrill"]), armored);
            let current = states(&roster);
            let (_, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert!((out.damage[0].damage - 18.0 * 0.6).abs() < 1e-4);
        }

        #[test]
        fn persisting_contact_does_not_strike() {
            let roster = roster(bot("a", &["spikeHammer"]), bot("b", &[]));
            let current = states(&roster);
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Persist, 5.0));
            assert!(out.damage.is_empty());
            assert!(next[0].weapon_ready(0));
            assert!(next[0].status.contains(StatusFlags::IN_CONTACT));
            assert!(next[1].status.contains(StatusFlags::IN_CONTACT));
        }

        #[test]
        fn both_directions_read_the_same_snapshot() {
            let roster = roster(bot("a", &["novaCore"]), bot("b", &["novaCore"]));
            let mut current = states(&roster);
            current[0].hp = 10.0;
            current[1].hp = 10.0;
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 0.0));
            assert_eq!(out.damage.len(), 2);
            assert!(!next[0].is_alive());
            assert!(!next[1].is_alive());
        }

        #[test]
        fn dead_fighters_neither_strike_nor_bleed() {
            let roster = roster(bot("a", &["novaCore"]), bot("b", &["novaCore"]));
            let mut current = states(&roster);
            current[1].destroy();
            let (next, out) = run(&roster, &current, fighter_contact(ContactPhase::Begin, 3.0));
            assert!(out.damage.is_empty());
            assert_eq!(next[0].hp, next[0].max_hp);
        }
    }

    mod spinner_tests {
        use super::*;

        #[test]
        fn spinner_accumulates_per_tick_of_contact() {
            let roster = roster(bot("a", &["deathBlossom"]), bot("b", &[]));
            let mut state = states(&roster);
            let ticks = 30;
            for tick in 0..ticks {
                let phase = if tick == 0 {
                    ContactPhase::Begin
                } else {
                    ContactPhase::Persist
                };
                state = run(&roster, &state, fighter_contact(phase, 0.0)).0;
            }
            let taken = state[1].max_hp - state[1].hp;
            assert!((taken - 15.0 * 0.1 * ticks as f32).abs() < 1e-3);
        }

        #[test]
        fn spinner_ignores_cooldown() {
            let roster = roster(bot("a", &["miniSpinner"]), bot("b", &[]));
            let mut current = states(&roster);
            current[0].trigger_weapon(0, 10_000.0);
            let (_, out) = run(&roster, &current, fighter_contact(ContactPhase::Persist, 0.0));
            assert_eq!(out.damage.len(), 1);
            assert!((out.damage[0].damage - 0.8).abs() < 1e-5);
            assert_eq!(out.damage[0].cause, DamageCause::Weapon(WeaponType::Spinner));
        }
    }
}
