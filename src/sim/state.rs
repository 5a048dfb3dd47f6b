//! Play-through state
//!
//! Everything one run of the asteroid field needs: the registry, the
//! ship's handle, the spawner, the score and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::entity::{EntityId, EntityKind, Ship};
use super::field::AsteroidField;
use super::registry::EntityRegistry;
use crate::tuning::Tuning;

/// Complete state of a single run (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub registry: EntityRegistry,
    /// The player's ship; always live in `registry`
    pub ship: EntityId,
    pub field: AsteroidField,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Sum of every `dt` simulated so far (seconds)
    pub elapsed: f32,
    /// Set when the ship touches an asteroid; the run is over
    pub ship_destroyed: bool,
}

impl GameState {
    /// Fresh run: ship at screen center, empty field
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut registry = EntityRegistry::new();
        let center = Vec2::new(tuning.screen_width, tuning.screen_height) / 2.0;
        let ship = registry.spawn_ship(Body::at_rest(center, tuning.player_radius));

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field: AsteroidField::new(&tuning),
            tuning,
            registry,
            ship,
            score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            ship_destroyed: false,
        }
    }

    /// The ship's kinematic state
    pub fn ship_body(&self) -> &Body {
        &self
            .registry
            .get(self.ship)
            .expect("ship is never despawned during a run")
            .body
    }

    /// Mutable access to the ship's body and payload
    pub fn ship_mut(&mut self) -> (&mut Body, &mut Ship) {
        let entity = self
            .registry
            .get_mut(self.ship)
            .expect("ship is never despawned during a run");
        match &mut entity.kind {
            EntityKind::Ship(ship) => (&mut entity.body, ship),
            other => unreachable!("ship handle points at {other:?}"),
        }
    }

    /// Add an asteroid directly (scenario setup, tests, demos)
    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> EntityId {
        self.registry.spawn_asteroid(Body::new(pos, vel, radius), 0)
    }

    /// Seconds of simulated play
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityClass;

    #[test]
    fn test_new_run_has_only_ship() {
        let state = GameState::new(42, Tuning::default());
        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.registry.count(EntityClass::Ship), 1);
        assert_eq!(state.score, 0);
        assert!(!state.ship_destroyed);

        let ship = state.ship_body();
        assert_eq!(ship.pos, Vec2::new(640.0, 360.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.radius, crate::consts::PLAYER_RADIUS);
    }

    #[test]
    fn test_ship_mut() {
        let mut state = GameState::new(1, Tuning::default());
        {
            let (body, ship) = state.ship_mut();
            body.rotation = 90.0;
            ship.shoot_cooldown = 0.25;
        }
        assert_eq!(state.ship_body().rotation, 90.0);
    }
}
