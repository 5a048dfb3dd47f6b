//! Asteroids - an asteroid-field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, fragmentation, scoring)
//! - `session`: Screen state machine driven by abstract input events
//! - `highscores`: Top-10 leaderboard
//! - `persistence`: Durable storage for the leaderboard
//! - `tuning`: Data-driven game balance
//! - `settings`: File-backed configuration

pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{GameSession, InputEvent, Key, Screen, Snapshot};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Nominal frame step (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Asteroid size tiers: radius = tier * ASTEROID_MIN_RADIUS
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;

    /// Seconds between field spawns
    pub const ASTEROID_SPAWN_RATE: f32 = 0.8;
    /// Spawn speed range (px/s)
    pub const ASTEROID_MIN_SPEED: f32 = 40.0;
    pub const ASTEROID_MAX_SPEED: f32 = 100.0;
    /// Max deviation from the inward normal (degrees)
    pub const ASTEROID_SPAWN_SPREAD: f32 = 30.0;

    /// Fragment divergence range (degrees) and speed-up
    pub const FRAGMENT_MIN_ANGLE: f32 = 20.0;
    pub const FRAGMENT_MAX_ANGLE: f32 = 50.0;
    pub const FRAGMENT_SPEEDUP: f32 = 1.2;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_TURN_SPEED: f32 = 300.0; // degrees/s
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Shots
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const PLAYER_SHOOT_SPEED: f32 = 500.0;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;
    pub const SHOT_LIFETIME: f32 = 3.0;

    /// Name entry buffer limit (characters)
    pub const MAX_NAME_LEN: usize = 15;
}

/// Advance a position by a velocity over `dt` seconds
#[inline]
pub fn integrate(pos: Vec2, vel: Vec2, dt: f32) -> Vec2 {
    pos + vel * dt
}

/// Rotate a vector counter-clockwise by `degrees`
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit vector the ship faces at `rotation` degrees; 0° points along +y
#[inline]
pub fn forward(rotation: f32) -> Vec2 {
    rotate_deg(Vec2::Y, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate() {
        let p = integrate(Vec2::new(1.0, 2.0), Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(p, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_integrate_zero_dt_is_noop() {
        let p = Vec2::new(3.5, -7.25);
        assert_eq!(integrate(p, Vec2::new(100.0, 100.0), 0.0), p);
    }

    #[test]
    fn test_rotate_deg() {
        let v = rotate_deg(Vec2::X, 90.0);
        assert!((v - Vec2::Y).length() < 1e-5);

        let v = rotate_deg(Vec2::new(0.0, 2.0), -90.0);
        assert!((v - Vec2::new(2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        for deg in [-50.0, -20.0, 0.0, 33.0, 180.0] {
            assert!((rotate_deg(v, deg).length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_forward() {
        assert!((forward(0.0) - Vec2::Y).length() < 1e-6);
        assert!((forward(180.0) + Vec2::Y).length() < 1e-5);
    }
}
