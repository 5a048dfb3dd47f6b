//! Asteroid fragmentation
//!
//! A destroyed asteroid either vanishes (smallest tier) or breaks into two
//! children that are one tier smaller and fly apart at a random angle.
//! Radius drops by `ASTEROID_MIN_RADIUS` per generation, so repeated
//! splitting always terminates.

use rand::Rng;

use super::body::Body;
use super::entity::EntityId;
use super::registry::EntityRegistry;
use crate::consts::ASTEROID_MIN_RADIUS;
use crate::rotate_deg;
use crate::tuning::Tuning;

/// Children produced by splitting `parent`: empty for terminal fragments,
/// otherwise exactly two.
pub fn split(parent: &Body, tuning: &Tuning, rng: &mut impl Rng) -> Vec<Body> {
    if parent.radius <= ASTEROID_MIN_RADIUS {
        return Vec::new();
    }

    let angle = rng.random_range(tuning.fragment_min_angle..=tuning.fragment_max_angle);
    let radius = parent.radius - ASTEROID_MIN_RADIUS;

    [angle, -angle]
        .into_iter()
        .map(|a| {
            let vel = rotate_deg(parent.vel, a) * tuning.fragment_speedup;
            Body::new(parent.pos, vel, radius)
        })
        .collect()
}

impl EntityRegistry {
    /// Destroy asteroid `id` and register its children (if any).
    /// Returns the children's ids.
    pub fn split_asteroid(
        &mut self,
        id: EntityId,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Vec<EntityId> {
        let Some(parent) = self.despawn(id) else {
            debug_assert!(false, "split_asteroid on dead entity {id:?}");
            return Vec::new();
        };
        let Some(asteroid) = parent.as_asteroid().copied() else {
            debug_assert!(false, "split_asteroid on non-asteroid {id:?}");
            return Vec::new();
        };

        let children: Vec<EntityId> = split(&parent.body, tuning, rng)
            .into_iter()
            .map(|body| self.spawn_asteroid(body, asteroid.generation + 1))
            .collect();

        log::debug!(
            "Asteroid {:?} (r={}) split into {} fragments",
            id,
            parent.body.radius,
            children.len()
        );
        children
    }
}
