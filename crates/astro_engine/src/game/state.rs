//! Per-mode simulation state
//!
//! Each mode owns its state outright and it is passed explicitly to the
//! subsystems that mutate it.

use std::collections::VecDeque;

use crate::camera::{self, CameraView, FreeCamera, FreeCameraParams};
use crate::config::GameConfig;
use crate::entities::{Asteroid, Missile, Ship, Sun, ASTEROID_TIERS};
use crate::foundation::math::{deg_to_rad, Rangef, Vec3};
use crate::input::Debouncer;

/// Live state of a play run
///
/// Also rendered (frozen) behind the pause and freecam modes.
#[derive(Debug, Clone)]
pub struct PlayState {
    /// The player ship
    pub ship: Ship,
    /// In-flight missiles, oldest first so expiry can pop from the front
    pub missiles: VecDeque<Missile>,
    /// Live asteroids, one list per tier
    pub asteroid_tiers: [Vec<Asteroid>; ASTEROID_TIERS],
    /// Per-tier population targets the spawner tops up to
    pub spawn_targets: [u32; ASTEROID_TIERS],
    /// Live suns
    pub suns: Vec<Sun>,
    /// Ticks elapsed since the level run started
    pub ticks: u64,
    /// Accumulated score
    pub score: u32,
    /// Chase camera eye from last tick, for smoothing
    pub last_camera_eye: Vec3,
    /// Current chase camera
    pub camera: CameraView,
    /// Velocity magnitude range for freshly spawned asteroids
    pub asteroid_speed: Rangef,
    /// Current level, starting at 1
    pub level: u32,
    /// Tick the last target was destroyed on, while waiting to advance
    pub level_finished_at: Option<u64>,
}

impl PlayState {
    /// Create an empty run: fresh ship at the origin, nothing spawned
    pub fn new(cfg: &GameConfig, aspect: f32) -> Self {
        let ship = Ship::new(cfg.ship.throttle_speed_limit);
        let eye = ship.eye();
        let camera = camera::chase_camera(&ship, eye, aspect, &cfg.ship, &cfg.world);

        Self {
            ship,
            missiles: VecDeque::new(),
            asteroid_tiers: [Vec::new(), Vec::new()],
            spawn_targets: [0; ASTEROID_TIERS],
            suns: Vec::new(),
            ticks: 0,
            score: 0,
            last_camera_eye: eye,
            camera,
            asteroid_speed: Rangef::new(0.0, 0.0),
            level: 0,
            level_finished_at: None,
        }
    }

    /// All live asteroids across tiers
    pub fn asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroid_tiers.iter().flatten()
    }
}

/// Menu attract-scene state
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Scene camera; steerable once free-look is toggled on
    pub camera: FreeCamera,
    /// Drifting backdrop asteroids
    pub asteroids: Vec<Asteroid>,
    /// Fixed scene lights
    pub suns: Vec<Sun>,
    /// Whether free-look is enabled
    pub moving_camera: bool,
    /// Debounces the free-look toggle
    pub move_debouncer: Debouncer,
}

impl MenuState {
    /// Build the menu scene: a tilted camera, a key light, and a backlight
    pub fn new(cfg: &GameConfig, aspect: f32) -> Self {
        let mut camera = FreeCamera::new(&FreeCameraParams {
            eye: Vec3::zeros(),
            look_at: Vec3::new(0.0, 0.0, 1.0),
            look_up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: cfg.ship.fov_degrees.lo,
            aspect,
            near: cfg.world.near_bound,
            far: cfg.world.view_distance,
            move_speed: cfg.freecam.default_move_speed,
        });
        camera.yaw_left(deg_to_rad(-30.0));
        camera.pitch_up(deg_to_rad(-20.0));

        let mut key_light = Sun::new();
        key_light.node.translate(Vec3::new(3.5, -4.0, 10.0));
        let mut backlight = Sun::new();
        backlight.node.translate(camera.eye - camera.forward * 2.0);

        Self {
            camera,
            asteroids: Vec::new(),
            suns: vec![key_light, backlight],
            moving_camera: false,
            move_debouncer: Debouncer::new(cfg.input.debounce_ms),
        }
    }
}

/// Freecam inspection-mode state
#[derive(Debug, Clone)]
pub struct FreecamState {
    /// The free-fly camera
    pub camera: FreeCamera,
    /// Whether fog is applied to the inspected scene
    pub fog: bool,
    /// Whether ship collision points are drawn as debug markers
    pub show_ship_collisions: bool,
    /// Debounces entering and leaving the mode
    pub mode_debouncer: Debouncer,
    /// Debounces the in-mode toggles (fog, markers, level adjust)
    pub toggle_debouncer: Debouncer,
}

impl FreecamState {
    /// Freecam with default pose and tuning
    pub fn new(cfg: &GameConfig, aspect: f32) -> Self {
        Self {
            camera: FreeCamera::for_freecam(&cfg.freecam, cfg.ship.fov_degrees.lo, aspect),
            fog: true,
            show_ship_collisions: false,
            mode_debouncer: Debouncer::new(cfg.input.debounce_ms),
            toggle_debouncer: Debouncer::new(cfg.input.debounce_ms),
        }
    }
}
