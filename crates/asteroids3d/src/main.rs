//! Headless asteroids demo
//!
//! Drives the simulation with a scripted pilot at 60 ticks per second:
//! clicks Start on the menu, then holds the throttle open and fires on a
//! cadence until the run ends or the tick cap is hit. Run with
//! `RUST_LOG=info` (or `debug` for frame stats) to watch it play.

mod backends;

use std::time::{Duration, Instant};

use astro_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::backends::{ConsoleHud, CountingRenderer, SilentAudio};

const TICKS_PER_SECOND: u64 = 60;
/// One minute of simulated play before the demo gives up
const MAX_TICKS: u64 = 60 * TICKS_PER_SECOND;

fn main() {
    env_logger::init();

    let config = GameConfig::load_or_default("asteroids3d.toml");
    let mut game = Game::new(
        config,
        Box::new(CountingRenderer::default()),
        Box::new(SilentAudio),
        Box::new(ConsoleHud::default()),
        16.0 / 9.0,
        StdRng::from_entropy(),
    );

    let tick = Duration::from_millis(1000 / TICKS_PER_SECOND);
    let start = Instant::now();
    let mut pointer_locked = false;

    for frame in 0..MAX_TICKS {
        let mut input = InputState::default();
        input.now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        input.pointer_locked = pointer_locked;

        if frame == 0 {
            input.hud_click = Some(HudButton::Primary);
        } else {
            input.pressed.insert(Key::W);
            if frame % 45 == 0 {
                input.pressed.insert(Key::Space);
            }
        }

        let effects = match game.step(&input) {
            Ok(effects) => effects,
            Err(e) => {
                log::error!("render failed: {e}");
                break;
            }
        };
        for effect in effects {
            match effect {
                HostEffect::RequestPointerLock => pointer_locked = true,
                HostEffect::ExitPointerLock => pointer_locked = false,
            }
        }

        if game.is_game_over() {
            break;
        }

        std::thread::sleep(tick);
    }

    log::info!(
        "demo over: level {}, score {}, {} ticks",
        game.level(),
        game.score(),
        game.ticks()
    );
}
