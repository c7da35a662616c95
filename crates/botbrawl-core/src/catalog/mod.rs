//! Immutable part catalogs: chassis, weapons, armor and arenas.
//!
//! A [`Catalog`] is built once (usually via [`Catalog::standard`]) and passed
//! by reference into a match. Nothing in the engine reads global tables, so
//! tests can swap in a catalog of their own.
//!
//! # Fallbacks
//!
//! Lookups never fail. An unknown chassis resolves to [`FALLBACK_CHASSIS`],
//! an unknown arena to [`FALLBACK_ARENA`]. Unknown weapons and armor simply
//! resolve to `None` and the fighter goes without.
//!
//! # Example
//!
//! ```
//! use botbrawl_core::catalog::{Catalog, WeaponType};
//!
//! let catalog = Catalog::standard();
//! let hammer = catalog.weapon("spikeHammer").unwrap();
//! assert_eq!(hammer.kind, WeaponType::Hammer);
//!
//! // Unknown ids degrade instead of failing.
//! let chassis = catalog.chassis_or_fallback("no-such-chassis");
//! assert_eq!(chassis.base_hp, 100.0);
//! ```

mod standard;

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;

/// Chassis id used when a fighter names an unknown chassis.
pub const FALLBACK_CHASSIS: &str = "brawler";

/// Arena id used when a match names an unknown arena.
pub const FALLBACK_ARENA: &str = "basicPit";

// =============================================================================
// Definitions
// =============================================================================

/// Body platform of a fighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisDef {
    /// Hit points at full health.
    pub base_hp: f32,
    /// Speed rating before weight scaling.
    pub base_speed: f32,
    /// Chassis mass.
    pub weight: f32,
    /// Collision radius.
    pub radius: f32,
    /// Number of weapons the chassis can carry.
    pub weapon_slots: u8,
}

impl Default for ChassisDef {
    /// Brawler stats.
    fn default() -> Self {
        Self {
            base_hp: 100.0,
            base_speed: 5.0,
            weight: 100.0,
            radius: 35.0,
            weapon_slots: 2,
        }
    }
}

/// Damage formula family of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    /// Continuous contact damage, ignores cooldown.
    Spinner,
    /// Half damage plus a launching knockback.
    Flipper,
    /// Damage scales with impact speed.
    Hammer,
    /// Full damage when ready, reduced damage while cooling down.
    Saw,
    /// Always-on low damage.
    Wedge,
    /// Generic triggered weapon.
    Flamethrower,
    /// Generic triggered weapon.
    Emp,
    /// Generic triggered weapon.
    Grapple,
    /// Generic triggered weapon.
    Drill,
    /// Generic triggered weapon.
    Plasma,
}

impl WeaponType {
    /// Returns true for weapons that deal damage every tick of contact.
    #[must_use]
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Spinner)
    }

    /// Lowercase tag used in damage logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spinner => "spinner",
            Self::Flipper => "flipper",
            Self::Hammer => "hammer",
            Self::Saw => "saw",
            Self::Wedge => "wedge",
            Self::Flamethrower => "flamethrower",
            Self::Emp => "emp",
            Self::Grapple => "grapple",
            Self::Drill => "drill",
            Self::Plasma => "plasma",
        }
    }
}

/// A mountable weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDef {
    /// Damage formula family.
    #[serde(rename = "type")]
    pub kind: WeaponType,
    /// Base damage before type scaling and armor.
    pub base_damage: f32,
    /// Mass added to the fighter.
    pub weight: f32,
    /// Milliseconds between activations; 0 for passive weapons.
    pub cooldown_ms: f32,
}

/// Passive plating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorDef {
    /// Fraction of incoming damage absorbed, in `[0, 1]`.
    pub damage_reduction: f32,
    /// Mass added to the fighter.
    pub weight: f32,
}

/// Hazard behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    /// Instant elimination on entry.
    Pit,
    /// Small damage every tick of overlap.
    Spike,
}

/// Rectangular hazard zone, positioned by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardDef {
    /// Hazard behavior.
    #[serde(rename = "type")]
    pub kind: HazardKind,
    /// Center of the zone.
    pub position: Vec2,
    /// Full width and height.
    pub size: Vec2,
    /// Damage rating for spike zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
}

impl HazardDef {
    /// Creates a pit centered at `position`.
    #[must_use]
    pub const fn pit(position: Vec2, size: Vec2) -> Self {
        Self {
            kind: HazardKind::Pit,
            position,
            size,
            damage: None,
        }
    }

    /// Creates a spike zone centered at `position`.
    #[must_use]
    pub const fn spike(position: Vec2, size: Vec2, damage: f32) -> Self {
        Self {
            kind: HazardKind::Spike,
            position,
            size,
            damage: Some(damage),
        }
    }

    /// Returns true when a circle overlaps this rectangle.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let half = self.size * 0.5;
        let nearest = center.clamp(self.position - half, self.position + half);
        nearest.distance_squared(center) <= radius * radius
    }
}

/// Bounded fighting floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaDef {
    /// Outer width, walls included.
    pub width: f32,
    /// Outer height, walls included.
    pub height: f32,
    /// Thickness of the four boundary walls.
    pub wall_thickness: f32,
    /// Hazard zones in declaration order.
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
}

impl Default for ArenaDef {
    /// The basic pit: 800x600, no hazards.
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            wall_thickness: 20.0,
            hazards: Vec::new(),
        }
    }
}

impl ArenaDef {
    /// Center of the arena.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Distance from `point` to the nearest outer edge.
    #[must_use]
    pub fn distance_to_wall(&self, point: Vec2) -> f32 {
        point
            .x
            .min(self.width - point.x)
            .min(point.y)
            .min(self.height - point.y)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable lookup tables for every part a fighter or match can reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    chassis: BTreeMap<String, ChassisDef>,
    weapons: BTreeMap<String, WeaponDef>,
    armor: BTreeMap<String, ArmorDef>,
    arenas: BTreeMap<String, ArenaDef>,
}

impl Catalog {
    /// Creates an empty catalog. Every lookup will use its fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock part tables.
    #[must_use]
    pub fn standard() -> Self {
        standard::build()
    }

    /// Decodes a catalog from JSON and validates its entries.
    ///
    /// The document has four optional maps, `chassis`, `weapons`, `armor`
    /// and `arenas`, keyed by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed documents and
    /// [`CatalogError::InvalidEntry`] for entries the engine cannot simulate.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |table, id: &str, reason| CatalogError::InvalidEntry {
            table,
            id: id.to_owned(),
            reason,
        };
        for (id, chassis) in &self.chassis {
            if chassis.base_hp <= 0.0 {
                return Err(invalid("chassis", id, "base hp must be positive"));
            }
            if chassis.radius <= 0.0 {
                return Err(invalid("chassis", id, "radius must be positive"));
            }
            if chassis.weight <= 0.0 {
                return Err(invalid("chassis", id, "weight must be positive"));
            }
        }
        for (id, weapon) in &self.weapons {
            if weapon.cooldown_ms < 0.0 {
                return Err(invalid("weapons", id, "cooldown must not be negative"));
            }
        }
        for (id, armor) in &self.armor {
            if !(0.0..=1.0).contains(&armor.damage_reduction) {
                return Err(invalid("armor", id, "damage reduction must lie in [0, 1]"));
            }
        }
        for (id, arena) in &self.arenas {
            if arena.width <= 2.0 * arena.wall_thickness || arena.height <= 2.0 * arena.wall_thickness {
                return Err(invalid("arenas", id, "walls leave no floor"));
            }
        }
        Ok(())
    }

    /// Adds or replaces a chassis.
    #[must_use]
    pub fn with_chassis(mut self, id: impl Into<String>, def: ChassisDef) -> Self {
        self.chassis.insert(id.into(), def);
        self
    }

    /// Adds or replaces a weapon.
    #[must_use]
    pub fn with_weapon(mut self, id: impl Into<String>, def: WeaponDef) -> Self {
        self.weapons.insert(id.into(), def);
        self
    }

    /// Adds or replaces an armor.
    #[must_use]
    pub fn with_armor(mut self, id: impl Into<String>, def: ArmorDef) -> Self {
        self.armor.insert(id.into(), def);
        self
    }

    /// Adds or replaces an arena.
    #[must_use]
    pub fn with_arena(mut self, id: impl Into<String>, def: ArenaDef) -> Self {
        self.arenas.insert(id.into(), def);
        self
    }

    /// Looks up a chassis by id.
    #[must_use]
    pub fn chassis(&self, id: &str) -> Option<&ChassisDef> {
        self.chassis.get(id)
    }

    /// Looks up a weapon by id.
    #[must_use]
    pub fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapons.get(id)
    }

    /// Looks up an armor by id.
    #[must_use]
    pub fn armor(&self, id: &str) -> Option<&ArmorDef> {
        self.armor.get(id)
    }

    /// Looks up an arena by id.
    #[must_use]
    pub fn arena(&self, id: &str) -> Option<&ArenaDef> {
        self.arenas.get(id)
    }

    /// Resolves a chassis, falling back to [`FALLBACK_CHASSIS`].
    ///
    /// If the catalog has no fallback entry either, brawler stats are used.
    #[must_use]
    pub fn chassis_or_fallback(&self, id: &str) -> ChassisDef {
        if let Some(def) = self.chassis.get(id) {
            return *def;
        }
        warn!(chassis = id, fallback = FALLBACK_CHASSIS, "unknown chassis id");
        self.chassis
            .get(FALLBACK_CHASSIS)
            .copied()
            .unwrap_or_default()
    }

    /// Resolves an arena, falling back to [`FALLBACK_ARENA`].
    #[must_use]
    pub fn arena_or_fallback(&self, id: &str) -> ArenaDef {
        if let Some(def) = self.arenas.get(id) {
            return def.clone();
        }
        warn!(arena = id, fallback = FALLBACK_ARENA, "unknown arena id");
        self.arenas.get(FALLBACK_ARENA).cloned().unwrap_or_default()
    }

    /// Chassis ids in sorted order.
    pub fn chassis_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.chassis.keys().map(String::as_str)
    }

    /// Weapon ids in sorted order.
    pub fn weapon_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.weapons.keys().map(String::as_str)
    }

    /// Armor ids in sorted order.
    pub fn armor_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.armor.keys().map(String::as_str)
    }

    /// Arena ids in sorted order.
    pub fn arena_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.arenas.keys().map(String::as_str)
    }
}

// =============================================================================
// Tests
// =============================================================================
