//! Points awarded for shooting an asteroid

use crate::consts::{ASTEROID_MAX_RADIUS, ASTEROID_MIN_RADIUS};

pub const SMALL_ASTEROID_POINTS: u64 = 50;
pub const MEDIUM_ASTEROID_POINTS: u64 = 100;
pub const LARGE_ASTEROID_POINTS: u64 = 200;

/// Point value of an asteroid of the given radius. Larger rocks are worth more.
pub fn points_for(radius: f32) -> u64 {
    if radius <= ASTEROID_MIN_RADIUS {
        SMALL_ASTEROID_POINTS
    } else if radius < ASTEROID_MAX_RADIUS {
        MEDIUM_ASTEROID_POINTS
    } else {
        LARGE_ASTEROID_POINTS
    }
}
