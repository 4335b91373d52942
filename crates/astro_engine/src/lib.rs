//! # Astro Engine
//!
//! Simulation core for a real-time 3D asteroids-style space shooter.
//!
//! The engine owns the per-frame simulation loop: entity spawning and
//! despawning around a moving reference point, Euler physics integration,
//! pairwise collision detection, asteroid tier-splitting, and a mode-driven
//! control and camera system (menu, play, pause, freecam).
//!
//! Rendering, audio, and HUD text are external collaborators injected as
//! trait objects (see [`backend`]), so the whole simulation runs headless --
//! including in tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use astro_engine::prelude::*;
//! use rand::SeedableRng;
//!
//! # struct MyRenderer; struct MyAudio; struct MyHud;
//! # impl Renderer for MyRenderer {
//! #     fn render(&mut self, _: &RenderFrame) -> Result<(), RenderError> { Ok(()) }
//! # }
//! # impl AudioOutput for MyAudio {
//! #     fn play(&mut self, _: Sound) {}
//! #     fn pause(&mut self, _: Sound) {}
//! #     fn rewind(&mut self, _: Sound) {}
//! #     fn set_volume(&mut self, _: Sound, _: f32) {}
//! #     fn play_oneshot(&mut self, _: Sound, _: f32) {}
//! # }
//! # impl Hud for MyHud {
//! #     fn set_score(&mut self, _: u32) {}
//! #     fn set_clock(&mut self, _: u64, _: u64) {}
//! #     fn set_level(&mut self, _: u32) {}
//! #     fn set_stats_visible(&mut self, _: bool) {}
//! #     fn set_main_text(&mut self, _: Option<&str>) {}
//! #     fn set_buttons(&mut self, _: Option<&str>, _: Option<&str>) {}
//! # }
//! let config = GameConfig::load_or_default("asteroids3d.toml");
//! let rng = rand::rngs::StdRng::from_entropy();
//! let mut game = Game::new(
//!     config,
//!     Box::new(MyRenderer),
//!     Box::new(MyAudio),
//!     Box::new(MyHud),
//!     16.0 / 9.0,
//!     rng,
//! );
//!
//! loop {
//!     let input = InputState::default(); // host polls real devices here
//!     let _effects = game.step(&input).expect("render failure is fatal");
//! }
//! ```

pub mod backend;
pub mod camera;
pub mod collision;
pub mod config;
pub mod entities;
pub mod foundation;
pub mod game;
pub mod input;
pub mod physics;
pub mod scene;
pub mod spawn;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        backend::{AudioOutput, Hud, HudButton, RenderError, Renderer, Sound},
        camera::{CameraView, FreeCamera},
        config::GameConfig,
        foundation::math::{Mat4, Quat, Vec3},
        game::{Game, GameMode, HostEffect},
        input::{InputState, Key},
        scene::RenderFrame,
    };
}
