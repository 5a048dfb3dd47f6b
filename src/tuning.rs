//! Data-driven game balance
//!
//! Every number the simulation reads at runtime. Defaults come from
//! `consts`; any field may be overridden from the settings file.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Distance beyond the screen edge at which entities are culled
    pub cull_margin: f32,

    // === Asteroid field ===
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub spawn_min_speed: f32,
    pub spawn_max_speed: f32,
    /// Max deviation from the edge's inward normal (degrees)
    pub spawn_spread: f32,
    /// Draw spawn size from every tier instead of always the largest
    pub random_spawn_tiers: bool,

    // === Fragmentation ===
    pub fragment_min_angle: f32,
    pub fragment_max_angle: f32,
    pub fragment_speedup: f32,

    // === Ship ===
    pub player_radius: f32,
    pub player_turn_speed: f32,
    pub player_speed: f32,

    // === Shots ===
    pub shot_radius: f32,
    pub shot_speed: f32,
    pub shot_cooldown: f32,
    pub shot_lifetime: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cull_margin: ASTEROID_MAX_RADIUS * 2.0,

            spawn_interval: ASTEROID_SPAWN_RATE,
            spawn_min_speed: ASTEROID_MIN_SPEED,
            spawn_max_speed: ASTEROID_MAX_SPEED,
            spawn_spread: ASTEROID_SPAWN_SPREAD,
            random_spawn_tiers: false,

            fragment_min_angle: FRAGMENT_MIN_ANGLE,
            fragment_max_angle: FRAGMENT_MAX_ANGLE,
            fragment_speedup: FRAGMENT_SPEEDUP,

            player_radius: PLAYER_RADIUS,
            player_turn_speed: PLAYER_TURN_SPEED,
            player_speed: PLAYER_SPEED,

            shot_radius: SHOT_RADIUS,
            shot_speed: PLAYER_SHOOT_SPEED,
            shot_cooldown: PLAYER_SHOOT_COOLDOWN,
            shot_lifetime: SHOT_LIFETIME,
        }
    }
}

impl Tuning {
    /// Repair values that would break simulation invariants.
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let d = Self::default();
        let positive = |v: f32| v > 0.0;
        let any = |_: f32| true;
        let mut changed = false;

        changed |= repair(&mut self.screen_width, d.screen_width, "screen_width", positive);
        changed |= repair(&mut self.screen_height, d.screen_height, "screen_height", positive);
        changed |= repair(&mut self.cull_margin, d.cull_margin, "cull_margin", any);
        changed |= repair(&mut self.spawn_interval, d.spawn_interval, "spawn_interval", positive);
        changed |= repair(&mut self.spawn_min_speed, d.spawn_min_speed, "spawn_min_speed", any);
        changed |= repair(&mut self.spawn_max_speed, d.spawn_max_speed, "spawn_max_speed", any);
        changed |= repair(&mut self.spawn_spread, d.spawn_spread, "spawn_spread", any);
        changed |= repair(
            &mut self.fragment_min_angle,
            d.fragment_min_angle,
            "fragment_min_angle",
            any,
        );
        changed |= repair(
            &mut self.fragment_max_angle,
            d.fragment_max_angle,
            "fragment_max_angle",
            any,
        );
        // Children must fly faster than their parent
        changed |= repair(
            &mut self.fragment_speedup,
            d.fragment_speedup,
            "fragment_speedup",
            |v| v > 1.0,
        );
        changed |= repair(&mut self.player_radius, d.player_radius, "player_radius", positive);
        changed |= repair(
            &mut self.player_turn_speed,
            d.player_turn_speed,
            "player_turn_speed",
            any,
        );
        changed |= repair(&mut self.player_speed, d.player_speed, "player_speed", any);
        changed |= repair(&mut self.shot_radius, d.shot_radius, "shot_radius", positive);
        changed |= repair(&mut self.shot_speed, d.shot_speed, "shot_speed", any);
        changed |= repair(&mut self.shot_cooldown, d.shot_cooldown, "shot_cooldown", any);
        changed |= repair(&mut self.shot_lifetime, d.shot_lifetime, "shot_lifetime", positive);

        if self.spawn_min_speed > self.spawn_max_speed {
            std::mem::swap(&mut self.spawn_min_speed, &mut self.spawn_max_speed);
            changed = true;
        }
        if self.fragment_min_angle > self.fragment_max_angle {
            std::mem::swap(&mut self.fragment_min_angle, &mut self.fragment_max_angle);
            changed = true;
        }
        if self.cull_margin < ASTEROID_MAX_RADIUS {
            self.cull_margin = ASTEROID_MAX_RADIUS;
            changed = true;
        }
        changed
    }
}

/// Reset `value` to `fallback` unless it is finite and passes `valid`
fn repair(value: &mut f32, fallback: f32, name: &str, valid: impl Fn(f32) -> bool) -> bool {
    if value.is_finite() && valid(*value) {
        return false;
    }
    log::warn!("tuning.{name} = {value} is invalid, using {fallback}");
    *value = fallback;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.spawn_interval, ASTEROID_SPAWN_RATE);
        assert_eq!(t.fragment_speedup, 1.2);
        assert!(!t.random_spawn_tiers);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let mut t = Tuning {
            spawn_interval: 0.0,
            spawn_min_speed: 120.0,
            spawn_max_speed: 40.0,
            cull_margin: 0.0,
            ..Default::default()
        };
        assert!(t.sanitize());
        assert_eq!(t.spawn_interval, ASTEROID_SPAWN_RATE);
        assert!(t.spawn_min_speed <= t.spawn_max_speed);
        assert!(t.cull_margin >= ASTEROID_MAX_RADIUS);

        let mut ok = Tuning::default();
        assert!(!ok.sanitize());
    }

    #[test]
    fn test_sanitize_replaces_non_finite() {
        let mut t = Tuning {
            spawn_min_speed: f32::NAN,
            spawn_max_speed: f32::INFINITY,
            spawn_spread: f32::NEG_INFINITY,
            fragment_min_angle: f32::INFINITY,
            fragment_max_angle: f32::NAN,
            cull_margin: f32::NAN,
            shot_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(t.sanitize());
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_sanitize_requires_fragment_speedup() {
        for bad in [1.0, 0.5, -2.0, f32::INFINITY] {
            let mut t = Tuning {
                fragment_speedup: bad,
                ..Default::default()
            };
            assert!(t.sanitize());
            assert_eq!(t.fragment_speedup, FRAGMENT_SPEEDUP);
        }

        let mut t = Tuning {
            fragment_speedup: 1.5,
            ..Default::default()
        };
        assert!(!t.sanitize());
        assert_eq!(t.fragment_speedup, 1.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t: Tuning = serde_json::from_str(r#"{ "spawn_interval": 2.5 }"#).unwrap();
        assert_eq!(t.spawn_interval, 2.5);
        assert_eq!(t.player_speed, PLAYER_SPEED);
    }
}
