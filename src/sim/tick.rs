//! Simulation tick
//!
//! One step of active play. Collisions are resolved in two phases: a
//! read-only pass collects hits, then all registry mutations are applied
//! after the pass, so nothing is removed while it is being iterated.

use glam::Vec2;

use super::body::Body;
use super::collision::overlaps;
use super::entity::{EntityId, EntityKind};
use super::scoring::points_for;
use super::state::GameState;
use crate::forward;
use crate::tuning::Tuning;

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// -1 turns left, +1 turns right
    pub turn: f32,
    /// +1 forward, -1 reverse
    pub thrust: f32,
    /// Fire when the cooldown allows
    pub fire: bool,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired(EntityId),
    AsteroidSpawned(EntityId),
    AsteroidDestroyed {
        asteroid: EntityId,
        shot: EntityId,
        radius: f32,
        points: u64,
        fragments: Vec<EntityId>,
    },
    ShipDestroyed {
        asteroid: EntityId,
    },
}

/// Advance the run by `dt` seconds. Does nothing once the ship is destroyed.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.ship_destroyed {
        return events;
    }
    state.time_ticks += 1;
    state.elapsed += dt;

    steer_ship(state, input, dt, &mut events);

    // Motion
    for entity in state.registry.iter_mut() {
        entity.body.step(dt);
        if let EntityKind::Shot(shot) = &mut entity.kind {
            shot.ttl -= dt;
        }
    }

    // --- Phase 1: detect (read-only) ---
    let ship_circle = state.ship_body().circle();
    let mut ship_hit_by: Option<EntityId> = None;
    let mut hits: Vec<(EntityId, EntityId, f32)> = Vec::new(); // (asteroid, shot, radius)
    let mut spent_shots: Vec<EntityId> = Vec::new();

    for asteroid in state.registry.asteroids() {
        let rock = asteroid.body.circle();

        if ship_hit_by.is_none() && overlaps(rock, ship_circle) {
            ship_hit_by = Some(asteroid.id);
        }

        let shot = state
            .registry
            .shots()
            .find(|s| !spent_shots.contains(&s.id) && overlaps(s.body.circle(), rock));
        if let Some(shot) = shot {
            spent_shots.push(shot.id);
            hits.push((asteroid.id, shot.id, asteroid.body.radius));
        }
    }

    let culled: Vec<EntityId> = state
        .registry
        .iter()
        .filter(|e| match &e.kind {
            EntityKind::Ship(_) => false,
            EntityKind::Shot(shot) => {
                !spent_shots.contains(&e.id)
                    && (shot.ttl <= 0.0 || out_of_bounds(e.body.pos, &state.tuning))
            }
            EntityKind::Asteroid(_) => {
                !hits.iter().any(|&(a, _, _)| a == e.id)
                    && out_of_bounds(e.body.pos, &state.tuning)
            }
        })
        .map(|e| e.id)
        .collect();

    // --- Phase 2: apply ---
    state.registry.despawn_all(&spent_shots);
    for (asteroid, shot, radius) in hits {
        let points = points_for(radius);
        state.score += points;
        let fragments = state
            .registry
            .split_asteroid(asteroid, &state.tuning, &mut state.rng);
        events.push(GameEvent::AsteroidDestroyed {
            asteroid,
            shot,
            radius,
            points,
            fragments,
        });
    }
    state.registry.despawn_all(&culled);

    if let Some(id) = state
        .field
        .update(dt, &mut state.registry, &state.tuning, &mut state.rng)
    {
        events.push(GameEvent::AsteroidSpawned(id));
    }

    if let Some(asteroid) = ship_hit_by {
        state.ship_destroyed = true;
        log::info!(
            "Ship destroyed by asteroid {:?} after {} ticks, score {}",
            asteroid,
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::ShipDestroyed { asteroid });
    }

    events
}

/// Turn, thrust, and fire
fn steer_ship(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let turn_speed = state.tuning.player_turn_speed;
    let speed = state.tuning.player_speed;
    let cooldown = state.tuning.shot_cooldown;
    let shot_speed = state.tuning.shot_speed;

    let turn = input.turn.clamp(-1.0, 1.0);
    let thrust = input.thrust.clamp(-1.0, 1.0);

    let (body, ship) = state.ship_mut();
    body.rotation = (body.rotation + turn * turn_speed * dt).rem_euclid(360.0);
    let facing = forward(body.rotation);
    body.vel = facing * thrust * speed;

    ship.shoot_cooldown = (ship.shoot_cooldown - dt).max(0.0);
    let launch = if input.fire && ship.shoot_cooldown <= 0.0 {
        ship.shoot_cooldown = cooldown;
        Some((body.pos, facing * shot_speed))
    } else {
        None
    };

    if let Some((pos, vel)) = launch {
        let shot = state.registry.spawn_shot(
            Body::new(pos, vel, state.tuning.shot_radius),
            state.tuning.shot_lifetime,
        );
        events.push(GameEvent::ShotFired(shot));
    }
}

/// Farther than `cull_margin` outside the screen rectangle
fn out_of_bounds(pos: Vec2, tuning: &Tuning) -> bool {
    let m = tuning.cull_margin;
    pos.x < -m || pos.y < -m || pos.x > tuning.screen_width + m || pos.y > tuning.screen_height + m
}
