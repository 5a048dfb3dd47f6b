//! Asteroid field spawner
//!
//! Periodically drops a new asteroid just outside one of the four screen
//! edges, aimed roughly inward.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::EntityId;
use super::registry::EntityRegistry;
use crate::consts::*;
use crate::rotate_deg;
use crate::tuning::Tuning;

/// A screen border: spawn points lie on the segment `start..end`, and new
/// asteroids head along `normal` (pointing into the screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub normal: Vec2,
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    /// Point at fraction `t` (0..=1) along the edge
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t)
    }
}

/// The four borders of a `width x height` screen, pushed outward by `offset`
/// so spawned asteroids start fully off-screen.
pub fn screen_edges(width: f32, height: f32, offset: f32) -> [Edge; 4] {
    [
        // Left, heading right
        Edge {
            normal: Vec2::X,
            start: Vec2::new(-offset, 0.0),
            end: Vec2::new(-offset, height),
        },
        // Right, heading left
        Edge {
            normal: Vec2::NEG_X,
            start: Vec2::new(width + offset, 0.0),
            end: Vec2::new(width + offset, height),
        },
        // Top, heading down
        Edge {
            normal: Vec2::Y,
            start: Vec2::new(0.0, -offset),
            end: Vec2::new(width, -offset),
        },
        // Bottom, heading up
        Edge {
            normal: Vec2::NEG_Y,
            start: Vec2::new(0.0, height + offset),
            end: Vec2::new(width, height + offset),
        },
    ]
}

/// Time-driven asteroid spawner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidField {
    /// Seconds accumulated since the last spawn
    pub spawn_timer: f32,
    pub edges: [Edge; 4],
}

impl AsteroidField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_timer: 0.0,
            edges: screen_edges(tuning.screen_width, tuning.screen_height, ASTEROID_MAX_RADIUS),
        }
    }

    /// Accumulate `dt`; once the interval is reached, reset and spawn one
    /// asteroid. Returns the new asteroid's id, if any.
    pub fn update(
        &mut self,
        dt: f32,
        registry: &mut EntityRegistry,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        self.spawn_timer += dt;
        if self.spawn_timer < tuning.spawn_interval {
            return None;
        }
        self.spawn_timer = 0.0;

        let body = self.roll_asteroid(tuning, rng);
        let id = registry.spawn_asteroid(body, 0);
        log::debug!(
            "Field spawned asteroid {:?} r={} at ({:.0}, {:.0})",
            id,
            body.radius,
            body.pos.x,
            body.pos.y
        );
        Some(id)
    }

    /// Pick edge, position, size and trajectory for a new asteroid
    pub fn roll_asteroid(&self, tuning: &Tuning, rng: &mut impl Rng) -> Body {
        let edge = self.edges[rng.random_range(0..self.edges.len())];

        let speed = rng.random_range(tuning.spawn_min_speed..=tuning.spawn_max_speed);
        let spread = tuning.spawn_spread.abs();
        let deviation = rng.random_range(-spread..=spread);
        let vel = rotate_deg(edge.normal * speed, deviation);

        let pos = edge.point_at(rng.random_range(0.0..=1.0));

        let radius = if tuning.random_spawn_tiers {
            ASTEROID_MIN_RADIUS * rng.random_range(1..=ASTEROID_KINDS) as f32
        } else {
            ASTEROID_MAX_RADIUS
        };

        Body::new(pos, vel, radius)
    }
}
