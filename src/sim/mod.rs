//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod field;
pub mod fragment;
pub mod registry;
pub mod scoring;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{Circle, overlaps};
pub use entity::{Asteroid, Entity, EntityClass, EntityId, EntityKind, Ship, Shot};
pub use field::{AsteroidField, Edge, screen_edges};
pub use fragment::split;
pub use registry::EntityRegistry;
pub use scoring::points_for;
pub use state::GameState;
pub use tick::{GameEvent, TickInput, tick};
