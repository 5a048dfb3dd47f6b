//! Kinematic record shared by every entity
//!
//! Position, velocity, heading and collision radius. Motion is plain
//! Euler integration with no forces.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::integrate;

/// Common kinematic state of a simulated entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees (0 = +y)
    pub rotation: f32,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            pos,
            vel,
            rotation: 0.0,
            radius,
        }
    }

    /// A body with no velocity
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, Vec2::ZERO, radius)
    }

    /// Advance position by `vel * dt`
    #[inline]
    pub fn step(&mut self, dt: f32) {
        self.pos = integrate(self.pos, self.vel, dt);
    }

    /// Collision shape of this body
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}
