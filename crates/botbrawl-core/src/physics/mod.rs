//! Physics boundary.
//!
//! Combat resolution only needs a handful of things from a rigid-body engine:
//! apply a force, step, read bodies back, and see which contacts began or
//! persisted this step. [`PhysicsEngine`] is that seam. [`ArenaPhysics`] is
//! the built-in implementation: circles in a walled box with rectangular
//! sensor zones.
//!
//! # Contact Streams
//!
//! After each [`step`](PhysicsEngine::step), [`contacts`](PhysicsEngine::contacts)
//! lists every touching pair once:
//!
//! | Kind | `phase` | `speed` |
//! |------|---------|---------|
//! | fighter vs fighter | begin / persist | relative speed before response |
//! | fighter vs wall | begin / persist | impact speed along the wall normal |
//! | fighter vs sensor | begin / persist | body speed |
//!
//! Contacts are ordered by body handle, then by kind, so two engines fed the
//! same inputs report identical streams.

mod world;

pub use world::ArenaPhysics;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a body in the physics world.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyHandle({})", self.0)
    }
}

/// Parameters for a new dynamic body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Initial center.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Mass; must be positive.
    pub mass: f32,
}

/// Read-back of a body after a step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    /// Center.
    pub position: Vec2,
    /// Velocity in units per tick.
    pub velocity: Vec2,
    /// Facing in radians.
    pub angle: f32,
}

/// Boundary wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    /// `x = wall_thickness`.
    Left,
    /// `x = width - wall_thickness`.
    Right,
    /// `y = wall_thickness`.
    Top,
    /// `y = height - wall_thickness`.
    Bottom,
}

impl WallSide {
    /// All four walls.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Unit normal pointing into the arena.
    #[must_use]
    pub const fn inward_normal(self) -> Vec2 {
        match self {
            Self::Left => Vec2::X,
            Self::Right => Vec2::NEG_X,
            Self::Top => Vec2::Y,
            Self::Bottom => Vec2::NEG_Y,
        }
    }
}

/// What a body touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactKind {
    /// Another dynamic body with a higher handle.
    Body(BodyHandle),
    /// A boundary wall.
    Wall(WallSide),
    /// A sensor zone, by registration index.
    Sensor(usize),
}

impl ContactKind {
    /// Coarse category, used to route contacts to resolvers.
    #[must_use]
    pub const fn class(self) -> ContactClass {
        match self {
            Self::Body(_) => ContactClass::Fighter,
            Self::Wall(_) => ContactClass::Wall,
            Self::Sensor(_) => ContactClass::Sensor,
        }
    }
}

/// Contact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactClass {
    /// Fighter against fighter.
    Fighter,
    /// Fighter against a wall.
    Wall,
    /// Fighter inside a sensor zone.
    Sensor,
}

/// Whether a contact is new this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    /// Not touching last step.
    Begin,
    /// Touching last step too.
    Persist,
}

/// One touching pair reported by a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The body with the lower handle.
    pub body: BodyHandle,
    /// What it touched.
    pub other: ContactKind,
    /// New or ongoing.
    pub phase: ContactPhase,
    /// Speed associated with the contact; see the module table.
    pub speed: f32,
}

impl Contact {
    /// True on the step the contact started.
    #[must_use]
    pub fn began(&self) -> bool {
        self.phase == ContactPhase::Begin
    }
}

/// The rigid-body engine seam.
///
/// Forces accumulate until the next [`step`](Self::step), which consumes them.
pub trait PhysicsEngine: Send {
    /// Adds a dynamic body.
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle;

    /// Adds a static sensor rectangle centered at `center`. Returns its index.
    fn add_sensor(&mut self, center: Vec2, size: Vec2) -> usize;

    /// Accumulates a force for the next step.
    fn apply_force(&mut self, body: BodyHandle, force: Vec2);

    /// Sets angular velocity in radians per tick.
    fn set_angular_velocity(&mut self, body: BodyHandle, omega: f32);

    /// Advances the world by `dt_ms`.
    fn step(&mut self, dt_ms: f32);

    /// Reads a body back.
    fn body(&self, body: BodyHandle) -> Option<BodyState>;

    /// Contacts produced by the last step.
    fn contacts(&self) -> &[Contact];
}

/// Wraps an angle into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.sin().atan2(angle.cos())
}
