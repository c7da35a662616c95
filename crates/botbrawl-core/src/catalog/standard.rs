//! Stock part tables.

use glam::Vec2;

use super::{ArenaDef, ArmorDef, Catalog, ChassisDef, HazardDef, WeaponDef, WeaponType};

fn chassis(base_hp: f32, base_speed: f32, weight: f32, radius: f32, weapon_slots: u8) -> ChassisDef {
    ChassisDef {
        base_hp,
        base_speed,
        weight,
        radius,
        weapon_slots,
    }
}

fn weapon(kind: WeaponType, base_damage: f32, weight: f32, cooldown_ms: f32) -> WeaponDef {
    WeaponDef {
        kind,
        base_damage,
        weight,
        cooldown_ms,
    }
}

fn armor(damage_reduction: f32, weight: f32) -> ArmorDef {
    ArmorDef {
        damage_reduction,
        weight,
    }
}

fn pit(x: f32, y: f32, w: f32, h: f32) -> HazardDef {
    HazardDef::pit(Vec2::new(x, y), Vec2::new(w, h))
}

fn spike(x: f32, y: f32, w: f32, h: f32, damage: f32) -> HazardDef {
    HazardDef::spike(Vec2::new(x, y), Vec2::new(w, h), damage)
}

fn arena(width: f32, height: f32, wall_thickness: f32, hazards: Vec<HazardDef>) -> ArenaDef {
    ArenaDef {
        width,
        height,
        wall_thickness,
        hazards,
    }
}

#[allow(clippy::too_many_lines)]
pub(super) fn build() -> Catalog {
    use WeaponType::{Drill, Emp, Flamethrower, Flipper, Grapple, Hammer, Plasma, Saw, Spinner, Wedge};

    Catalog::new()
        // Chassis
        .with_chassis("scout", chassis(60.0, 8.0, 50.0, 25.0, 1))
        .with_chassis("brawler", chassis(100.0, 5.0, 100.0, 35.0, 2))
        .with_chassis("tank", chassis(150.0, 3.0, 180.0, 45.0, 2))
        .with_chassis("phantom", chassis(40.0, 12.0, 30.0, 20.0, 1))
        .with_chassis("juggernaut", chassis(200.0, 2.0, 250.0, 55.0, 2))
        .with_chassis("striker", chassis(120.0, 6.0, 120.0, 40.0, 2))
        // Weapons
        .with_weapon("miniSpinner", weapon(Spinner, 8.0, 15.0, 100.0))
        .with_weapon("deathBlossom", weapon(Spinner, 15.0, 30.0, 100.0))
        .with_weapon("basicFlipper", weapon(Flipper, 5.0, 20.0, 2000.0))
        .with_weapon("skyLauncher", weapon(Flipper, 8.0, 35.0, 2500.0))
        .with_weapon("spikeHammer", weapon(Hammer, 20.0, 25.0, 3000.0))
        .with_weapon("mjolnir", weapon(Hammer, 35.0, 45.0, 4000.0))
        .with_weapon("buzzSaw", weapon(Saw, 12.0, 20.0, 500.0))
        .with_weapon("circularDoom", weapon(Saw, 25.0, 40.0, 800.0))
        .with_weapon("basicWedge", weapon(Wedge, 3.0, 10.0, 0.0))
        .with_weapon("razorWedge", weapon(Wedge, 8.0, 15.0, 0.0))
        .with_weapon("miniTorch", weapon(Flamethrower, 6.0, 18.0, 200.0))
        .with_weapon("inferno", weapon(Flamethrower, 12.0, 35.0, 150.0))
        .with_weapon("shockPulse", weapon(Emp, 3.0, 22.0, 5000.0))
        .with_weapon("blackout", weapon(Emp, 5.0, 40.0, 8000.0))
        .with_weapon("hookShot", weapon(Grapple, 4.0, 20.0, 3000.0))
        .with_weapon("titanGrip", weapon(Grapple, 8.0, 45.0, 4000.0))
        .with_weapon("combatDrill", weapon(Drill, 18.0, 28.0, 1500.0))
        .with_weapon("coreBreaker", weapon(Drill, 30.0, 50.0, 2000.0))
        .with_weapon("plasmaBlaster", weapon(Plasma, 22.0, 25.0, 2500.0))
        .with_weapon("novaCore", weapon(Plasma, 40.0, 55.0, 4000.0))
        // Armor
        .with_armor("basicPlating", armor(0.10, 15.0))
        .with_armor("reinforcedSteel", armor(0.18, 25.0))
        .with_armor("titaniumShell", armor(0.15, 12.0))
        .with_armor("spikedArmor", armor(0.12, 20.0))
        .with_armor("compositeArmor", armor(0.25, 35.0))
        .with_armor("ablativePlates", armor(0.22, 28.0))
        .with_armor("reactiveArmor", armor(0.28, 40.0))
        .with_armor("nanoweaveArmor", armor(0.32, 30.0))
        .with_armor("fortressPlating", armor(0.40, 60.0))
        .with_armor("phantomShield", armor(0.35, 20.0))
        // Arenas
        .with_arena("basicPit", arena(800.0, 600.0, 20.0, vec![]))
        .with_arena(
            "warzone",
            arena(900.0, 700.0, 25.0, vec![pit(450.0, 350.0, 100.0, 100.0)]),
        )
        .with_arena(
            "thunderdome",
            arena(
                1000.0,
                800.0,
                30.0,
                vec![
                    pit(200.0, 200.0, 60.0, 60.0),
                    pit(800.0, 200.0, 60.0, 60.0),
                    pit(200.0, 600.0, 60.0, 60.0),
                    pit(800.0, 600.0, 60.0, 60.0),
                    spike(500.0, 400.0, 100.0, 100.0, 5.0),
                ],
            ),
        )
        .with_arena(
            "gauntlet",
            arena(
                1200.0,
                500.0,
                25.0,
                vec![
                    spike(300.0, 100.0, 150.0, 40.0, 3.0),
                    spike(600.0, 100.0, 150.0, 40.0, 3.0),
                    spike(900.0, 100.0, 150.0, 40.0, 3.0),
                    spike(300.0, 400.0, 150.0, 40.0, 3.0),
                    spike(600.0, 400.0, 150.0, 40.0, 3.0),
                    spike(900.0, 400.0, 150.0, 40.0, 3.0),
                    pit(600.0, 250.0, 80.0, 80.0),
                ],
            ),
        )
        .with_arena(
            "inferno",
            arena(
                900.0,
                900.0,
                30.0,
                vec![
                    spike(150.0, 150.0, 80.0, 80.0, 4.0),
                    spike(450.0, 100.0, 100.0, 60.0, 4.0),
                    spike(750.0, 150.0, 80.0, 80.0, 4.0),
                    spike(100.0, 450.0, 60.0, 100.0, 4.0),
                    spike(800.0, 450.0, 60.0, 100.0, 4.0),
                    spike(150.0, 750.0, 80.0, 80.0, 4.0),
                    spike(450.0, 800.0, 100.0, 60.0, 4.0),
                    spike(750.0, 750.0, 80.0, 80.0, 4.0),
                ],
            ),
        )
        .with_arena(
            "abyss",
            arena(
                1000.0,
                800.0,
                25.0,
                vec![
                    pit(250.0, 200.0, 70.0, 70.0),
                    pit(500.0, 200.0, 70.0, 70.0),
                    pit(750.0, 200.0, 70.0, 70.0),
                    pit(375.0, 400.0, 70.0, 70.0),
                    pit(625.0, 400.0, 70.0, 70.0),
                    pit(250.0, 600.0, 70.0, 70.0),
                    pit(500.0, 600.0, 70.0, 70.0),
                    pit(750.0, 600.0, 70.0, 70.0),
                ],
            ),
        )
        .with_arena(
            "colosseum",
            arena(
                1200.0,
                900.0,
                35.0,
                vec![
                    pit(150.0, 150.0, 80.0, 80.0),
                    pit(1050.0, 150.0, 80.0, 80.0),
                    pit(150.0, 750.0, 80.0, 80.0),
                    pit(1050.0, 750.0, 80.0, 80.0),
                    spike(550.0, 400.0, 60.0, 60.0, 5.0),
                    spike(650.0, 400.0, 60.0, 60.0, 5.0),
                    spike(550.0, 500.0, 60.0, 60.0, 5.0),
                    spike(650.0, 500.0, 60.0, 60.0, 5.0),
                    pit(600.0, 150.0, 100.0, 60.0),
                    pit(600.0, 750.0, 100.0, 60.0),
                ],
            ),
        )
        .with_arena(
            "cage",
            arena(500.0, 500.0, 20.0, vec![spike(250.0, 250.0, 50.0, 50.0, 6.0)]),
        )
        .with_arena(
            "oblivion",
            arena(
                1100.0,
                850.0,
                30.0,
                vec![
                    pit(200.0, 200.0, 50.0, 50.0),
                    pit(550.0, 120.0, 50.0, 50.0),
                    pit(900.0, 200.0, 50.0, 50.0),
                    pit(200.0, 650.0, 50.0, 50.0),
                    pit(550.0, 730.0, 50.0, 50.0),
                    pit(900.0, 650.0, 50.0, 50.0),
                    spike(550.0, 425.0, 120.0, 40.0, 4.0),
                    spike(550.0, 425.0, 40.0, 120.0, 4.0),
                    spike(150.0, 425.0, 40.0, 150.0, 3.0),
                    spike(950.0, 425.0, 40.0, 150.0, 3.0),
                ],
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HazardKind;

    #[test]
    fn stock_counts() {
        let catalog = build();
        assert_eq!(catalog.chassis_ids().count(), 6);
        assert_eq!(catalog.weapon_ids().count(), 20);
        assert_eq!(catalog.armor_ids().count(), 10);
        assert_eq!(catalog.arena_ids().count(), 9);
    }

    #[test]
    fn hazards_sit_inside_their_arena() {
        let catalog = build();
        for id in catalog.arena_ids() {
            let arena = catalog.arena(id).unwrap();
            for hazard in &arena.hazards {
                assert!(hazard.position.x > 0.0 && hazard.position.x < arena.width, "{id}");
                assert!(hazard.position.y > 0.0 && hazard.position.y < arena.height, "{id}");
                if hazard.kind == HazardKind::Spike {
                    assert!(hazard.damage.is_some(), "{id} spike without rating");
                }
            }
        }
    }

    #[test]
    fn passive_weapons_have_no_cooldown() {
        let catalog = build();
        for id in ["basicWedge", "razorWedge"] {
            assert_eq!(catalog.weapon(id).unwrap().cooldown_ms, 0.0);
        }
    }
}
