//! Collaborator interfaces
//!
//! The simulation core never talks to a GPU, an audio device, or UI text
//! directly. Hosts inject implementations of these traits at [`Game`]
//! construction, which keeps the core headless and the test suite free of
//! device dependencies.
//!
//! [`Game`]: crate::game::Game

use thiserror::Error;

use crate::scene::RenderFrame;

/// Rendering failures
///
/// Setup failures are fatal by design: there is no degraded mode for a
/// real-time renderer, so hosts should abort startup on the first error.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The graphics context could not be created or was lost
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    /// Shader compilation or linking failed
    #[error("shader setup failed: {0}")]
    ShaderSetup(String),

    /// A required GPU buffer could not be allocated
    #[error("buffer allocation failed: {0}")]
    BufferAllocation(String),

    /// Frame submission failed
    #[error("frame submission failed: {0}")]
    Submission(String),
}

/// Frame renderer
///
/// Called exactly once per simulation step with the full renderable set for
/// that frame.
pub trait Renderer {
    /// Draw one frame
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError>;
}

/// Named sound handles the game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Looping background music
    Music,
    /// Looping engine thrust; volume tracks the throttle
    Thruster,
    /// Missile launch one-shot
    MissileFire,
}

/// Audio playback collaborator
///
/// `play` on an already-playing sound is a no-op; looping behavior for
/// [`Sound::Music`] and [`Sound::Thruster`] is the backend's concern.
pub trait AudioOutput {
    /// Start (or keep) a sound playing
    fn play(&mut self, sound: Sound);

    /// Pause a sound, keeping its position
    fn pause(&mut self, sound: Sound);

    /// Seek a sound back to its start
    fn rewind(&mut self, sound: Sound);

    /// Set a sound's volume, 0.0 - 1.0
    fn set_volume(&mut self, sound: Sound, volume: f32);

    /// Fire-and-forget playback of an independent clone of a sound
    ///
    /// Used for missile fire so overlapping shots don't cut each other off.
    fn play_oneshot(&mut self, sound: Sound, volume: f32);
}

/// HUD buttons the host surfaces
///
/// Button presses flow back into the game through
/// [`InputState::hud_click`](crate::input::InputState::hud_click); the
/// meaning of each button depends on the current mode (start, unpause,
/// restart, quit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudButton {
    /// Start / Unpause / Restart
    Primary,
    /// Quit to menu
    Secondary,
}

/// HUD text collaborator
pub trait Hud {
    /// Update the score line
    fn set_score(&mut self, score: u32);

    /// Update the elapsed-time line
    fn set_clock(&mut self, minutes: u64, seconds: u64);

    /// Update the level line
    fn set_level(&mut self, level: u32);

    /// Show or hide the score/time/level lines together
    fn set_stats_visible(&mut self, visible: bool);

    /// Set the main banner message; `None` hides it
    fn set_main_text(&mut self, text: Option<&str>);

    /// Set the button labels; `None` hides a button
    fn set_buttons(&mut self, primary: Option<&str>, secondary: Option<&str>);
}
