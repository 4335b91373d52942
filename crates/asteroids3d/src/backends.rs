//! Headless collaborator implementations
//!
//! Stand-ins for a real graphics/audio/UI host: the renderer counts frames,
//! the audio sink swallows playback, and the HUD mirrors its updates to the
//! log. Useful for soak-testing the simulation and as a template for real
//! backends.

use astro_engine::prelude::*;

/// Renderer that counts frames instead of drawing
#[derive(Default)]
pub struct CountingRenderer {
    frames: u64,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
        self.frames += 1;
        if self.frames % 300 == 0 {
            log::debug!(
                "frame {}: {} objects, {} lights, fog {}",
                self.frames,
                frame.objects.len(),
                frame.lights.len(),
                frame.fog
            );
        }
        Ok(())
    }
}

/// Audio sink that discards playback
pub struct SilentAudio;

impl AudioOutput for SilentAudio {
    fn play(&mut self, sound: Sound) {
        log::trace!("audio play {sound:?}");
    }

    fn pause(&mut self, sound: Sound) {
        log::trace!("audio pause {sound:?}");
    }

    fn rewind(&mut self, sound: Sound) {
        log::trace!("audio rewind {sound:?}");
    }

    fn set_volume(&mut self, _sound: Sound, _volume: f32) {}

    fn play_oneshot(&mut self, sound: Sound, volume: f32) {
        log::trace!("audio oneshot {sound:?} at {volume}");
    }
}

/// HUD that mirrors updates to the log
#[derive(Default)]
pub struct ConsoleHud {
    score: u32,
    level: u32,
}

impl Hud for ConsoleHud {
    fn set_score(&mut self, score: u32) {
        if score != self.score {
            log::info!("score: {score}");
        }
        self.score = score;
    }

    fn set_clock(&mut self, _minutes: u64, _seconds: u64) {}

    fn set_level(&mut self, level: u32) {
        if level != self.level {
            log::info!("level: {level}");
        }
        self.level = level;
    }

    fn set_stats_visible(&mut self, _visible: bool) {}

    fn set_main_text(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            log::info!("banner: {text}");
        }
    }

    fn set_buttons(&mut self, primary: Option<&str>, secondary: Option<&str>) {
        log::debug!("buttons: {primary:?} / {secondary:?}");
    }
}
