//! Game configuration
//!
//! Every gameplay tunable lives here with a default matching the shipped
//! balance. Configs deserialize from TOML; missing fields fall back to the
//! defaults, and a missing or malformed file falls back wholesale with a
//! warning (startup never fails on config).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::foundation::math::{deg_to_rad, Rangef};
use crate::scene::FOG_END;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// File was not valid TOML for [`GameConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level game configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World-scale distances and timing
    pub world: WorldConfig,
    /// Asteroid population and tier tables
    pub asteroids: AsteroidConfig,
    /// Sun population
    pub suns: SunConfig,
    /// Ship handling and chase camera
    pub ship: ShipConfig,
    /// Missile ballistics
    pub missiles: MissileConfig,
    /// Free-fly camera handling
    pub freecam: FreecamConfig,
    /// Menu attract scene
    pub menu: MenuConfig,
    /// Input debouncing and gamepad layout
    pub input: InputConfig,
    /// Mix volumes
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Load configuration from a TOML file, falling back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "could not load config from {}: {e}; using defaults",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// World-scale distances and timing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Distance from the reference point at which new entities appear
    pub spawn_distance: f32,
    /// Margin past the spawn distance before entities are culled
    pub despawn_margin: f32,
    /// Near clip plane for the gameplay cameras
    pub near_bound: f32,
    /// Far clip plane / view distance in play
    pub view_distance: f32,
    /// Ticks to linger after clearing a level before advancing
    pub level_wait_ticks: u64,
    /// Simulation ticks per second (clock display only; the host owns cadence)
    pub ticks_per_second: u64,
}

impl WorldConfig {
    /// Distance past which entities are removed
    pub fn despawn_distance(&self) -> f32 {
        self.spawn_distance + self.despawn_margin
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            // Just past the fog wall so entities never pop into view
            spawn_distance: FOG_END + 1.0,
            despawn_margin: 1.0,
            near_bound: 1.0 / 32.0,
            view_distance: 32.0,
            level_wait_ticks: 30,
            ticks_per_second: 60,
        }
    }
}

/// Asteroid tier tables and spawn shaping
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Radius range per tier (tier 0 = large)
    pub radius_tiers: [Rangef; 2],
    /// Hit points per tier
    pub health_tiers: [i32; 2],
    /// Score value per tier
    pub point_tiers: [u32; 2],
    /// Spin speed range, radians per tick
    pub rotation_speed: Rangef,
    /// Split impulse speed range
    pub split_speed: Rangef,
    /// Placement distance range for a level's opening population
    pub initial_spawn_distance: Rangef,
    /// Angular cone around the ship's forward vector for spawn positions
    pub spawn_arc: f32,
    /// Angular cone around the reference-facing vector for spawn velocities
    pub velocity_arc: f32,
    /// Collision radius multiplier, tilted in the player's favor
    pub radius_fudge_factor: f32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            radius_tiers: [Rangef::new(1.4, 1.8), Rangef::new(0.6, 0.8)],
            health_tiers: [2, 1],
            point_tiers: [100, 50],
            rotation_speed: Rangef::new(0.005, 0.1),
            split_speed: Rangef::new(0.01, 0.08),
            initial_spawn_distance: Rangef::new(16.0, 32.0),
            spawn_arc: deg_to_rad(120.0),
            velocity_arc: deg_to_rad(45.0),
            radius_fudge_factor: 0.85,
        }
    }
}

/// Sun population settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Target number of live suns
    pub count: usize,
    /// Placement distance range at level start
    pub initial_spawn_distance: Rangef,
    /// Angular cone around the ship's velocity for respawn positions
    pub spawn_arc: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            count: 4,
            initial_spawn_distance: Rangef::new(10.0, 28.0),
            spawn_arc: deg_to_rad(50.0),
        }
    }
}

/// Ship handling and chase camera tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Acceleration per tick at full throttle
    pub max_thrust: f32,
    /// Asymmetric throttle easing limits (per tick; lo = falloff, hi = ramp)
    pub throttle_speed_limit: Rangef,
    /// Field of view range in degrees, widened by throttle squared
    pub fov_degrees: Rangef,
    /// Chase camera smoothing factor (1 = no lag)
    pub camera_chase_factor: f32,
    /// Rotation magnitude treated as fully dissipated
    pub rotation_epsilon: f32,
    /// Rotation magnitude at which damping tops out
    pub rotation_topout: f32,
    /// Scaling constant applied to the damping factor
    pub rotation_topout_scaling: f32,
    /// Radians of turn per pixel of mouse movement
    pub mouse_turn_speed: f32,
    /// Radians of turn per tick at full gamepad deflection
    pub gamepad_turn_speed: f32,
    /// Roll rate from the roll keys, radians per tick
    pub roll_speed: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            max_thrust: 0.001,
            throttle_speed_limit: Rangef::new(-1.0 / 9.0, 1.0 / 15.0),
            fov_degrees: Rangef::new(80.0, 86.0),
            camera_chase_factor: 0.6,
            rotation_epsilon: 1e-10,
            rotation_topout: 0.01,
            rotation_topout_scaling: 0.925,
            mouse_turn_speed: 0.0001,
            gamepad_turn_speed: 0.003,
            roll_speed: deg_to_rad(0.3),
        }
    }
}

/// Missile ballistics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MissileConfig {
    /// Distance traveled per tick, relative to the firing ship
    ///
    /// Should stay well below the smallest asteroid radius or missiles can
    /// phase through between ticks.
    pub speed: f32,
    /// Minimum ticks between shots
    pub cooldown_ticks: u64,
}

impl MissileConfig {
    /// Lifetime in ticks: long enough to cover the despawn distance
    pub fn life_ticks(&self, despawn_distance: f32) -> u64 {
        (despawn_distance / self.speed).round() as u64
    }
}

impl Default for MissileConfig {
    fn default() -> Self {
        Self {
            speed: 0.7,
            cooldown_ticks: 30,
        }
    }
}

/// Free-fly camera handling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FreecamConfig {
    /// Radians of turn per pixel of mouse movement
    pub mouse_turn_speed: f32,
    /// Roll rate from the roll keys, radians per tick
    pub roll_speed: f32,
    /// Starting movement speed, units per tick
    pub default_move_speed: f32,
    /// Speed adjustment step; also the minimum speed floor
    pub move_speed_increment: f32,
    /// Near clip plane
    pub near_bound: f32,
    /// Far clip plane (wider than play so the whole scene is inspectable)
    pub far_bound: f32,
}

impl Default for FreecamConfig {
    fn default() -> Self {
        Self {
            mouse_turn_speed: 0.002,
            roll_speed: 0.02,
            default_move_speed: 0.04,
            move_speed_increment: 0.005,
            near_bound: 1.0 / 32.0,
            far_bound: 64.0,
        }
    }
}

/// Menu attract scene settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Target number of drifting asteroids
    pub asteroid_count: usize,
    /// Velocity cone range; the lower bound stays off zero so asteroids
    /// never fly straight through the camera
    pub velocity_arc: Rangef,
    /// Spawn position cone around the camera's forward vector
    pub spawn_arc: f32,
    /// Drift speed range
    pub speed: Rangef,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 64,
            velocity_arc: Rangef::new(deg_to_rad(3.0), deg_to_rad(45.0)),
            spawn_arc: deg_to_rad(120.0),
            speed: Rangef::new(0.01, 0.1),
        }
    }
}

/// Input debouncing and gamepad layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Debounce window for mode-toggle keys, milliseconds
    pub debounce_ms: u64,
    /// Gamepad layout
    pub gamepad: GamepadMapping,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            gamepad: GamepadMapping::default(),
        }
    }
}

/// Gamepad axis/button layout
///
/// Plain configuration data rather than a remapping abstraction; the
/// defaults match a standard twin-stick layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GamepadMapping {
    /// Axis index for pitch
    pub pitch_axis: usize,
    /// Axis index for yaw
    pub yaw_axis: usize,
    /// Axis index for roll
    pub roll_axis: usize,
    /// Analog button index for throttle
    pub throttle_trigger: usize,
    /// Button indices that fire missiles
    pub fire_buttons: Vec<usize>,
    /// Axis deflection below which input is ignored
    pub deadzone: f32,
}

impl Default for GamepadMapping {
    fn default() -> Self {
        Self {
            pitch_axis: 1,
            yaw_axis: 0,
            roll_axis: 2,
            throttle_trigger: 7,
            fire_buttons: vec![0, 5],
            deadzone: 0.15,
        }
    }
}

/// Mix volumes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Music channel volume, 0.0 - 1.0
    pub music_volume: f32,
    /// Sound-effect channel volume, 0.0 - 1.0
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 1.0,
            sfx_volume: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = GameConfig::default();
        assert!(config.world.despawn_distance() > config.world.spawn_distance);
        assert!(config.asteroids.radius_tiers[1].hi < config.asteroids.radius_tiers[0].lo);
        assert_eq!(
            config.missiles.life_ticks(config.world.despawn_distance()),
            (34.0_f32 / 0.7).round() as u64
        );
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [missiles]
            cooldown_ticks = 10

            [asteroids]
            point_tiers = [200, 75]
            "#,
        )
        .expect("valid partial config");
        assert_eq!(config.missiles.cooldown_ticks, 10);
        assert_eq!(config.asteroids.point_tiers, [200, 75]);
        // Untouched sections keep their defaults.
        assert_eq!(config.suns.count, 4);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = GameConfig::load_or_default("/definitely/not/here.toml");
        assert_eq!(config.world.level_wait_ticks, 30);
    }
}
