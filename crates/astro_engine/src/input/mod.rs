//! Input snapshot and debouncing
//!
//! The host polls its real devices (keyboard, mouse, gamepad, HUD buttons)
//! and hands the game one [`InputState`] per step. The game never registers
//! callbacks, which keeps input fully scriptable in tests.

use std::collections::HashSet;

use crate::backend::HudButton;

/// Keys the game cares about
///
/// Named after physical key positions, matching the original bindings
/// (thrust on W, roll on Q/E, pause on P, freecam on B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// W key: ship throttle / freecam forward
    W,
    /// A key: freecam strafe left
    A,
    /// S key: freecam backward
    S,
    /// D key: freecam strafe right
    D,
    /// Q key: roll left
    Q,
    /// E key: roll right
    E,
    /// P key: pause / unpause
    P,
    /// B key: freecam toggle, menu free-look toggle
    B,
    /// C key: collision-marker toggle (freecam)
    C,
    /// F key: fog toggle (freecam)
    F,
    /// Space: fire / freecam up
    Space,
    /// Left shift: freecam down
    LeftShift,
    /// Up arrow: freecam speed up
    ArrowUp,
    /// Down arrow: freecam speed down
    ArrowDown,
    /// Left arrow: level-down debug adjustment (freecam)
    ArrowLeft,
    /// Right arrow: level-up debug adjustment (freecam)
    ArrowRight,
}

/// One gamepad button: digital state plus analog value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadButton {
    /// Whether the button is pressed
    pub pressed: bool,
    /// Analog value in [0, 1] (triggers)
    pub value: f32,
}

/// Snapshot of a connected gamepad
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Axis values in [-1, 1]
    pub axes: Vec<f32>,
    /// Button states
    pub buttons: Vec<GamepadButton>,
}

impl GamepadSnapshot {
    /// Axis value, zero when the axis doesn't exist
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Button state, released when the button doesn't exist
    pub fn button(&self, index: usize) -> GamepadButton {
        self.buttons.get(index).copied().unwrap_or_default()
    }
}

/// Per-step input snapshot
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently held keys
    pub pressed: HashSet<Key>,
    /// Whether the primary mouse button is held
    pub mouse_down: bool,
    /// Mouse movement since the last step (pixels)
    pub mouse_delta: (f32, f32),
    /// Whether pointer lock is active; mouse deltas only steer while locked
    pub pointer_locked: bool,
    /// Connected gamepad, if any
    pub gamepad: Option<GamepadSnapshot>,
    /// HUD button clicked since the last step, if any
    pub hud_click: Option<HudButton>,
    /// Whether the host window lost focus since the last step
    pub focus_lost: bool,
    /// Host wall-clock time in milliseconds, for debouncing
    pub now_ms: u64,
}

impl InputState {
    /// Whether a key is currently held
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Time-based debouncer for mode-toggle actions
///
/// Holding a toggle key would otherwise flip the toggle every tick.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    last: i64,
}

impl Debouncer {
    /// Create a debouncer that is immediately ready
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last: -(delay_ms as i64),
        }
    }

    /// Whether the delay has elapsed since the last fire
    pub fn ready(&self, now_ms: u64) -> bool {
        now_ms as i64 - self.last >= self.delay_ms as i64
    }

    /// Consume the debouncer if ready; returns whether the action should run
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.ready(now_ms) {
            self.last = now_ms as i64;
            true
        } else {
            false
        }
    }

    /// Make the debouncer immediately ready again
    pub fn reset(&mut self) {
        self.last = -(self.delay_ms as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_fires_immediately_then_waits() {
        let mut debouncer = Debouncer::new(200);
        assert!(debouncer.try_fire(0));
        assert!(!debouncer.try_fire(100));
        assert!(!debouncer.try_fire(199));
        assert!(debouncer.try_fire(200));
    }

    #[test]
    fn test_debouncer_reset() {
        let mut debouncer = Debouncer::new(200);
        assert!(debouncer.try_fire(50));
        debouncer.reset();
        assert!(debouncer.try_fire(51));
    }

    #[test]
    fn test_gamepad_snapshot_out_of_range() {
        let pad = GamepadSnapshot {
            axes: vec![0.5],
            buttons: vec![GamepadButton {
                pressed: true,
                value: 1.0,
            }],
        };
        assert_eq!(pad.axis(0), 0.5);
        assert_eq!(pad.axis(7), 0.0);
        assert!(pad.button(0).pressed);
        assert!(!pad.button(9).pressed);
    }
}
