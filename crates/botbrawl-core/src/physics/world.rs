//! Built-in physics: circles bouncing inside a walled rectangle.

use std::collections::BTreeSet;

use glam::Vec2;

use super::{
    wrap_angle, BodyDesc, BodyHandle, BodyState, Contact, ContactKind, ContactPhase,
    PhysicsEngine, WallSide,
};
use crate::catalog::ArenaDef;
use crate::config::{PhysicsConfig, TICK_MS};

#[derive(Debug, Clone)]
struct Body {
    state: BodyState,
    radius: f32,
    inv_mass: f32,
    force: Vec2,
    omega: f32,
}

#[derive(Debug, Clone, Copy)]
struct Sensor {
    min: Vec2,
    max: Vec2,
}

impl Sensor {
    fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        let nearest = center.clamp(self.min, self.max);
        nearest.distance_squared(center) <= radius * radius
    }
}

/// Zero-gravity top-down world bounded by the arena's inner walls.
///
/// Integration is semi-implicit Euler in units per tick. Fighter collisions
/// are resolved with an impulse along the contact normal; walls reflect the
/// normal velocity component. Sensors never push back.
///
/// # Example
///
/// ```
/// use botbrawl_core::catalog::ArenaDef;
/// use botbrawl_core::config::{PhysicsConfig, TICK_MS};
/// use botbrawl_core::physics::{ArenaPhysics, BodyDesc, PhysicsEngine};
/// use glam::Vec2;
///
/// let mut world = ArenaPhysics::new(&ArenaDef::default(), PhysicsConfig::default());
/// let body = world.add_body(BodyDesc { position: Vec2::new(400.0, 300.0), radius: 30.0, mass: 100.0 });
///
/// world.apply_force(body, Vec2::new(100.0, 0.0));
/// world.step(TICK_MS);
///
/// let state = world.body(body).unwrap();
/// assert!(state.velocity.x > 0.0);
/// assert!(world.contacts().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ArenaPhysics {
    config: PhysicsConfig,
    min: Vec2,
    max: Vec2,
    bodies: Vec<Body>,
    sensors: Vec<Sensor>,
    contacts: Vec<Contact>,
    touching: BTreeSet<(BodyHandle, ContactKind)>,
}

impl ArenaPhysics {
    /// Builds walls from the arena and registers its hazards as sensors, in
    /// declaration order, so sensor index equals hazard index.
    #[must_use]
    pub fn new(arena: &ArenaDef, config: PhysicsConfig) -> Self {
        let wall = arena.wall_thickness;
        let mut world = Self {
            config,
            min: Vec2::splat(wall),
            max: Vec2::new(arena.width - wall, arena.height - wall),
            bodies: Vec::new(),
            sensors: Vec::new(),
            contacts: Vec::new(),
            touching: BTreeSet::new(),
        };
        for hazard in &arena.hazards {
            world.add_sensor(hazard.position, hazard.size);
        }
        world
    }

    /// Overrides a body's velocity.
    pub fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.index()) {
            b.state.velocity = velocity;
        }
    }

    /// Number of dynamic bodies.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn integrate(&mut self, scale: f32) {
        let damping = (1.0 - self.config.air_friction * scale).max(0.0);
        let max_speed = self.config.max_speed;
        for body in &mut self.bodies {
            let accel = body.force * body.inv_mass;
            let mut velocity = (body.state.velocity + accel * scale) * damping;
            if max_speed > 0.0 {
                velocity = velocity.clamp_length_max(max_speed);
            }
            body.state.velocity = velocity;
            body.state.position += velocity * scale;
            body.state.angle = wrap_angle(body.state.angle + body.omega * scale);
            body.force = Vec2::ZERO;
        }
    }

    fn collide_bodies(&mut self, found: &mut Vec<(BodyHandle, ContactKind, f32)>) {
        let restitution = self.config.restitution;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (head, tail) = self.bodies.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let delta = b.state.position - a.state.position;
                let distance = delta.length();
                let reach = a.radius + b.radius;
                if distance >= reach {
                    continue;
                }

                let relative_speed = (a.state.velocity - b.state.velocity).length();
                let normal = if distance > 0.0 { delta / distance } else { Vec2::X };
                let total = a.inv_mass + b.inv_mass;
                if total > 0.0 {
                    let overlap = reach - distance;
                    a.state.position -= normal * overlap * (a.inv_mass / total);
                    b.state.position += normal * overlap * (b.inv_mass / total);

                    let closing = (b.state.velocity - a.state.velocity).dot(normal);
                    if closing < 0.0 {
                        let impulse = -(1.0 + restitution) * closing / total;
                        a.state.velocity -= normal * impulse * a.inv_mass;
                        b.state.velocity += normal * impulse * b.inv_mass;
                    }
                }

                found.push((BodyHandle::new(i), ContactKind::Body(BodyHandle::new(j)), relative_speed));
            }
        }
    }

    fn collide_walls(&mut self, found: &mut Vec<(BodyHandle, ContactKind, f32)>) {
        let restitution = self.config.restitution;
        let (min, max) = (self.min, self.max);
        for (i, body) in self.bodies.iter_mut().enumerate() {
            for side in WallSide::ALL {
                let normal = side.inward_normal();
                let plane = match side {
                    WallSide::Left => min.x,
                    WallSide::Right => -max.x,
                    WallSide::Top => min.y,
                    WallSide::Bottom => -max.y,
                };
                let gap = body.state.position.dot(normal) - plane - body.radius;
                if gap >= 0.0 {
                    continue;
                }

                let normal_speed = body.state.velocity.dot(normal);
                let impact = (-normal_speed).max(0.0);
                body.state.position -= normal * gap;
                if normal_speed < 0.0 {
                    body.state.velocity -= normal * (1.0 + restitution) * normal_speed;
                }

                found.push((BodyHandle::new(i), ContactKind::Wall(side), impact));
            }
        }
    }

    fn sense(&self, found: &mut Vec<(BodyHandle, ContactKind, f32)>) {
        for (i, body) in self.bodies.iter().enumerate() {
            for (s, sensor) in self.sensors.iter().enumerate() {
                if sensor.overlaps(body.state.position, body.radius) {
                    found.push((BodyHandle::new(i), ContactKind::Sensor(s), body.state.velocity.length()));
                }
            }
        }
    }
}

impl PhysicsEngine for ArenaPhysics {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle::new(self.bodies.len());
        self.bodies.push(Body {
            state: BodyState {
                position: desc.position,
                ..BodyState::default()
            },
            radius: desc.radius.max(0.0),
            inv_mass: if desc.mass > 0.0 { desc.mass.recip() } else { 0.0 },
            force: Vec2::ZERO,
            omega: 0.0,
        });
        handle
    }

    fn add_sensor(&mut self, center: Vec2, size: Vec2) -> usize {
        let half = size.abs() * 0.5;
        self.sensors.push(Sensor {
            min: center - half,
            max: center + half,
        });
        self.sensors.len() - 1
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.index()) {
            b.force += force;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, omega: f32) {
        if let Some(b) = self.bodies.get_mut(body.index()) {
            b.omega = omega;
        }
    }

    fn step(&mut self, dt_ms: f32) {
        let scale = dt_ms / TICK_MS;
        self.integrate(scale);

        let mut found = Vec::new();
        self.collide_bodies(&mut found);
        self.collide_walls(&mut found);
        self.sense(&mut found);
        found.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let previous = std::mem::take(&mut self.touching);
        self.contacts.clear();
        for (body, other, speed) in found {
            let phase = if previous.contains(&(body, other)) {
                ContactPhase::Persist
            } else {
                ContactPhase::Begin
            };
            self.touching.insert((body, other));
            self.contacts.push(Contact {
                body,
                other,
                phase,
                speed,
            });
        }
    }

    fn body(&self, body: BodyHandle) -> Option<BodyState> {
        self.bodies.get(body.index()).map(|b| b.state)
    }

    fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}
