//! Catalog resolution and derived stats.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::BotConfig;
use crate::catalog::{ArmorDef, Catalog, ChassisDef, WeaponDef};

/// A weapon as mounted on a specific fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountedWeapon {
    /// Catalog id the weapon was resolved from.
    pub id: String,
    /// Resolved definition.
    pub def: WeaponDef,
}

/// A [`BotConfig`] with every catalog reference resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    /// Resolved chassis (fallback applied).
    pub chassis: ChassisDef,
    /// Weapons that exist in the catalog, in config order.
    pub weapons: Vec<MountedWeapon>,
    /// Resolved armor, if any.
    pub armor: Option<ArmorDef>,
}

/// Effective stats derived from a loadout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FighterStats {
    /// Maximum hit points.
    pub max_hp: f32,
    /// Effective speed, `base_speed * 100 / weight`.
    pub speed: f32,
    /// Total mass: chassis, weapons and armor.
    pub weight: f32,
    /// Armor damage reduction, 0 without armor.
    pub damage_reduction: f32,
    /// Collision radius.
    pub radius: f32,
}

impl Loadout {
    /// Resolves a config against a catalog.
    ///
    /// Unknown chassis ids fall back to the catalog default. Unknown weapon
    /// and armor ids are dropped with a warning.
    #[must_use]
    pub fn resolve(config: &BotConfig, catalog: &Catalog) -> Self {
        let chassis = catalog.chassis_or_fallback(&config.chassis_id);

        let weapons = config
            .weapon_ids
            .iter()
            .filter_map(|id| match catalog.weapon(id) {
                Some(def) => Some(MountedWeapon {
                    id: id.clone(),
                    def: *def,
                }),
                None => {
                    warn!(fighter = %config.id, weapon = %id, "unknown weapon id, skipping");
                    None
                }
            })
            .collect();

        let armor = config.armor_id.as_deref().and_then(|id| {
            let armor = catalog.armor(id).copied();
            if armor.is_none() {
                warn!(fighter = %config.id, armor = id, "unknown armor id, fighting unarmored");
            }
            armor
        });

        Self {
            chassis,
            weapons,
            armor,
        }
    }

    /// Sum of chassis, weapon and armor weight.
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        let weapons: f32 = self.weapons.iter().map(|w| w.def.weight).sum();
        let armor = self.armor.map_or(0.0, |a| a.weight);
        self.chassis.weight + weapons + armor
    }

    /// Derives effective stats.
    #[must_use]
    pub fn stats(&self) -> FighterStats {
        let weight = self.total_weight().max(f32::EPSILON);
        FighterStats {
            max_hp: self.chassis.base_hp,
            speed: self.chassis.base_speed * (100.0 / weight),
            weight,
            damage_reduction: self.armor.map_or(0.0, |a| a.damage_reduction.clamp(0.0, 1.0)),
            radius: self.chassis.radius,
        }
    }

    /// True if any mounted weapon deals continuous damage.
    #[must_use]
    pub fn has_spinner(&self) -> bool {
        self.weapons.iter().any(|w| w.def.kind.is_continuous())
    }
}

/// Applies armor multiplicatively: `raw * (1 - reduction)`, never negative.
#[must_use]
pub fn armor_reduced(raw: f32, reduction: f32) -> f32 {
    (raw * (1.0 - reduction.clamp(0.0, 1.0))).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fighter::BotConfig;
    use proptest::prelude::*;

    mod resolve_tests {
        use super::*;

        #[test]
        fn speed_scales_inversely_with_weight() {
            let catalog = Catalog::standard();
            let config = BotConfig::scripted("a", "brawler", "")
                .with_weapons(["spikeHammer", "basicWedge"])
                .with_armor("basicPlating");
            let stats = Loadout::resolve(&config, &catalog).stats();
            // 100 + 25 + 10 + 15
            assert_eq!(stats.weight, 150.0);
            assert!((stats.speed - 5.0 * 100.0 / 150.0).abs() < 1e-6);
            assert!((stats.damage_reduction - 0.1).abs() < 1e-6);
        }

        #[test]
        fn unknown_parts_degrade() {
            let catalog = Catalog::standard();
            let config = BotConfig::scripted("a", "warship", "")
                .with_weapons(["laser", "buzzSaw"])
                .with_armor("forcefield");
            let loadout = Loadout::resolve(&config, &catalog);
            assert_eq!(loadout.chassis, *catalog.chassis("brawler").unwrap());
            assert_eq!(loadout.weapons.len(), 1);
            assert_eq!(loadout.weapons[0].id, "buzzSaw");
            assert!(loadout.armor.is_none());
            assert_eq!(loadout.stats().damage_reduction, 0.0);
        }

        #[test]
        fn has_spinner_detects_weapon_type() {
            let catalog = Catalog::standard();
            let spinner = BotConfig::scripted("a", "scout", "").with_weapons(["deathBlossom"]);
            let hammer = BotConfig::scripted("b", "scout", "").with_weapons(["mjolnir"]);
            assert!(Loadout::resolve(&spinner, &catalog).has_spinner());
            assert!(!Loadout::resolve(&hammer, &catalog).has_spinner());
        }
    }

    mod armor_tests {
        use super::*;

        #[test]
        fn armor_is_multiplicative() {
            assert!((armor_reduced(20.0, 0.25) - 15.0).abs() < 1e-6);
            assert_eq!(armor_reduced(20.0, 0.0), 20.0);
            assert_eq!(armor_reduced(20.0, 1.0), 0.0);
        }

        proptest! {
            #[test]
            fn armor_never_negative_and_exact(d in 0.0f32..1000.0, r in 0.0f32..=1.0) {
                let applied = armor_reduced(d, r);
                prop_assert!(applied >= 0.0);
                prop_assert!((applied - d * (1.0 - r)).abs() <= 1e-3);
            }
        }
    }
}
