//! Entity variants
//!
//! Every entity is a `Body` plus a variant tag carrying the data only that
//! variant needs.

use serde::{Deserialize, Serialize};

use super::body::Body;

/// Registry-assigned handle. Ids are never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ship {
    /// Seconds until the next shot may be fired
    pub shoot_cooldown: f32,
}

/// A drifting rock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Asteroid {
    /// Number of splits between this rock and the one the field spawned
    pub generation: u32,
}

/// A projectile fired by the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Seconds left before the shot expires
    pub ttl: f32,
}

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship(Ship),
    Asteroid(Asteroid),
    Shot(Shot),
}

/// Variant discriminant without payload (for snapshots and filters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Ship,
    Asteroid,
    Shot,
}

impl EntityKind {
    pub fn class(&self) -> EntityClass {
        match self {
            EntityKind::Ship(_) => EntityClass::Ship,
            EntityKind::Asteroid(_) => EntityClass::Asteroid,
            EntityKind::Shot(_) => EntityClass::Shot,
        }
    }
}

/// A live entity owned by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    #[inline]
    pub fn class(&self) -> EntityClass {
        self.kind.class()
    }

    #[inline]
    pub fn is_asteroid(&self) -> bool {
        matches!(self.kind, EntityKind::Asteroid(_))
    }

    #[inline]
    pub fn is_shot(&self) -> bool {
        matches!(self.kind, EntityKind::Shot(_))
    }

    /// Asteroid payload, if this is an asteroid
    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(a) => Some(a),
            _ => None,
        }
    }
}
