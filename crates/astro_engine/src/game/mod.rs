//! Game controller and mode state machine
//!
//! [`Game`] owns all simulation state and the injected collaborators. One
//! call to [`Game::step`] consumes an input snapshot, advances exactly one
//! tick of whichever mode is active, and renders one frame. Mode dispatch is
//! an exhaustive match, so adding a mode forces every call site to handle it.

pub mod state;

use std::mem;

use rand::rngs::StdRng;

use crate::backend::{AudioOutput, Hud, HudButton, RenderError, Renderer, Sound};
use crate::camera::{self, CameraView, FreeCamera};
use crate::collision;
use crate::config::{FreecamConfig, GameConfig};
use crate::foundation::math::Vec3;
use crate::input::{Debouncer, InputState, Key};
use crate::physics;
use crate::scene::{models, RenderFrame, SceneNode};
use crate::spawn;

pub use state::{FreecamState, MenuState, PlayState};

/// Top-level game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Attract screen with drifting asteroids
    Menu,
    /// Frozen play state; also hosts the game-over screen
    Pause,
    /// Live gameplay
    Play,
    /// Free-fly inspection of the frozen play state
    Freecam,
}

/// Requests the game makes of its host, returned from [`Game::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEffect {
    /// Capture the pointer so mouse deltas steer instead of moving a cursor
    RequestPointerLock,
    /// Release a captured pointer
    ExitPointerLock,
}

/// The game: all state plus the injected collaborators
pub struct Game {
    config: GameConfig,
    mode: GameMode,
    game_over: bool,

    play: PlayState,
    menu: MenuState,
    freecam: FreecamState,

    pause_debouncer: Debouncer,
    rng: StdRng,
    aspect: f32,

    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioOutput>,
    hud: Box<dyn Hud>,

    effects: Vec<HostEffect>,
}

impl Game {
    /// Create a game showing the menu
    pub fn new(
        config: GameConfig,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioOutput>,
        hud: Box<dyn Hud>,
        aspect: f32,
        rng: StdRng,
    ) -> Self {
        let play = PlayState::new(&config, aspect);
        let menu = MenuState::new(&config, aspect);
        let freecam = FreecamState::new(&config, aspect);
        let pause_debouncer = Debouncer::new(config.input.debounce_ms);

        let mut game = Self {
            config,
            mode: GameMode::Menu,
            game_over: false,
            play,
            menu,
            freecam,
            pause_debouncer,
            rng,
            aspect,
            renderer,
            audio,
            hud,
            effects: Vec::new(),
        };

        game.audio
            .set_volume(Sound::Music, game.config.audio.music_volume * 0.75);
        game.audio.set_volume(Sound::Thruster, 0.0);
        game.show_menu_hud();
        game
    }

    /// Current mode
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether the current pause screen is a game-over screen
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Current score
    pub fn score(&self) -> u32 {
        self.play.score
    }

    /// Current level
    pub fn level(&self) -> u32 {
        self.play.level
    }

    /// Ticks elapsed in the current run
    pub fn ticks(&self) -> u64 {
        self.play.ticks
    }

    /// Advance one tick and render one frame
    ///
    /// Returns the host effects requested during this step.
    pub fn step(&mut self, input: &InputState) -> Result<Vec<HostEffect>, RenderError> {
        if input.focus_lost {
            self.audio.pause(Sound::Music);
            if self.mode == GameMode::Play {
                self.pause_game();
            }
        }

        match self.mode {
            GameMode::Menu => self.menu_step(input)?,
            GameMode::Pause => self.pause_step(input)?,
            GameMode::Play => self.play_step(input)?,
            GameMode::Freecam => self.freecam_step(input)?,
        }

        Ok(mem::take(&mut self.effects))
    }

    /// Start a run at the given level
    ///
    /// Resets the whole play state; score and clock restart from zero.
    pub fn start_level(&mut self, level: u32) {
        log::info!("starting level {level}");

        self.hud.set_stats_visible(true);
        self.hud.set_main_text(None);
        self.hud.set_buttons(None, None);
        if level == 1 {
            self.audio.rewind(Sound::Music);
        }
        self.audio.play(Sound::Music);
        self.effects.push(HostEffect::RequestPointerLock);

        self.mode = GameMode::Play;
        self.game_over = false;

        self.play = PlayState::new(&self.config, self.aspect);
        self.play.level = level;
        self.play.spawn_targets = spawn::level_targets(level);
        self.play.asteroid_speed = spawn::level_speed(level);
        spawn::populate_level(&mut self.play, &self.config, &mut self.rng);

        self.hud.set_score(self.play.score);
        self.hud.set_level(level);
        self.refresh_clock();
    }

    fn play_step(&mut self, input: &InputState) -> Result<(), RenderError> {
        self.check_next_level();

        self.handle_play_input(input);
        if self.mode != GameMode::Play {
            // Pausing freezes the simulation mid-tick; still show a frame.
            let frame = self.play_frame(&self.play.camera, true, false);
            return self.renderer.render(&frame);
        }

        spawn::despawn_suns(&mut self.play, &self.config);
        spawn::despawn_asteroids(&mut self.play, &self.config);
        spawn::despawn_missiles(&mut self.play, &self.config);
        spawn::spawn_suns(&mut self.play, &self.config, &mut self.rng);
        spawn::spawn_asteroids(&mut self.play, &self.config, &mut self.rng);

        collision::collide_missile_sun(&mut self.play);
        collision::collide_missile_asteroid(&mut self.play, &self.config.asteroids);
        let points =
            collision::handle_dead_asteroids(&mut self.play, &self.config.asteroids, &mut self.rng);
        if points > 0 {
            self.play.score += points;
            self.hud.set_score(self.play.score);
        }

        physics::accelerate_ship(&mut self.play.ship, &self.config.ship);
        physics::move_ship(&mut self.play.ship);
        physics::move_missiles(&mut self.play.missiles);
        physics::move_asteroids(&mut self.play.asteroid_tiers);

        // During the end-of-level pause the ship is invulnerable.
        if self.play.level_finished_at.is_none()
            && (collision::ship_hit_asteroid(&self.play, &self.config.asteroids)
                || collision::ship_hit_sun(&self.play))
        {
            self.end_run();
            let frame = self.play_frame(&self.play.camera, true, false);
            return self.renderer.render(&frame);
        }

        self.refresh_clock();

        self.play.camera = camera::chase_camera(
            &self.play.ship,
            self.play.last_camera_eye,
            self.aspect,
            &self.config.ship,
            &self.config.world,
        );
        self.play.last_camera_eye = self.play.ship.eye();

        let throttle = physics::refresh_ship_visuals(&mut self.play.ship);
        self.audio
            .set_volume(Sound::Thruster, self.config.audio.sfx_volume * throttle);
        physics::rotate_ship(&mut self.play.ship, &self.config.ship);

        if input.is_pressed(Key::B) && self.freecam.mode_debouncer.try_fire(input.now_ms) {
            self.enter_freecam();
        }

        self.play.ticks += 1;

        let frame = self.play_frame(&self.play.camera, true, false);
        self.renderer.render(&frame)
    }

    fn menu_step(&mut self, input: &InputState) -> Result<(), RenderError> {
        if input.hud_click == Some(HudButton::Primary) {
            self.start_level(1);
            let frame = self.play_frame(&self.play.camera, true, false);
            return self.renderer.render(&frame);
        }

        spawn::despawn_menu_asteroids(&mut self.menu, &self.config);
        spawn::spawn_menu_asteroids(&mut self.menu, &self.config, &mut self.rng);
        for asteroid in &mut self.menu.asteroids {
            physics::step_asteroid(asteroid);
        }

        if input.is_pressed(Key::B) && self.menu.move_debouncer.try_fire(input.now_ms) {
            self.menu.moving_camera = !self.menu.moving_camera;
            self.effects.push(if self.menu.moving_camera {
                HostEffect::RequestPointerLock
            } else {
                HostEffect::ExitPointerLock
            });
        }
        if self.menu.moving_camera {
            handle_freecam_moves(&mut self.menu.camera, input, &self.config.freecam);
        }
        if input.pointer_locked {
            let (dx, dy) = input.mouse_delta;
            let turn = self.config.freecam.mouse_turn_speed;
            self.menu.camera.yaw_left(-turn * dx);
            self.menu.camera.pitch_up(-turn * dy);
        }

        let frame = self.menu_frame();
        self.renderer.render(&frame)
    }

    fn pause_step(&mut self, input: &InputState) -> Result<(), RenderError> {
        // A game-over screen only leaves through its buttons.
        if !self.game_over
            && input.is_pressed(Key::P)
            && self.pause_debouncer.try_fire(input.now_ms)
        {
            self.unpause();
        }
        match input.hud_click {
            Some(HudButton::Primary) => {
                if self.game_over {
                    self.start_level(1);
                } else {
                    self.unpause();
                }
            }
            Some(HudButton::Secondary) => self.quit_to_menu(),
            None => {}
        }

        let frame = self.play_frame(&self.play.camera, true, false);
        self.renderer.render(&frame)
    }

    fn freecam_step(&mut self, input: &InputState) -> Result<(), RenderError> {
        handle_freecam_moves(&mut self.freecam.camera, input, &self.config.freecam);
        if input.pointer_locked {
            let (dx, dy) = input.mouse_delta;
            let turn = self.config.freecam.mouse_turn_speed;
            self.freecam.camera.yaw_left(-turn * dx);
            self.freecam.camera.pitch_up(-turn * dy);
        }

        if input.is_pressed(Key::ArrowLeft) && self.freecam.toggle_debouncer.try_fire(input.now_ms)
        {
            self.adjust_level(self.play.level.saturating_sub(1).max(1));
        }
        if input.is_pressed(Key::ArrowRight) && self.freecam.toggle_debouncer.try_fire(input.now_ms)
        {
            self.adjust_level(self.play.level + 1);
        }
        if input.is_pressed(Key::F) && self.freecam.toggle_debouncer.try_fire(input.now_ms) {
            self.freecam.fog = !self.freecam.fog;
        }
        if input.is_pressed(Key::C) && self.freecam.toggle_debouncer.try_fire(input.now_ms) {
            self.freecam.show_ship_collisions = !self.freecam.show_ship_collisions;
        }
        if input.is_pressed(Key::B) && self.freecam.mode_debouncer.try_fire(input.now_ms) {
            log::info!("leaving freecam");
            self.mode = GameMode::Play;
        }

        let camera = self.freecam.camera.view();
        let frame = self.play_frame(&camera, self.freecam.fog, self.freecam.show_ship_collisions);
        self.renderer.render(&frame)
    }

    fn handle_play_input(&mut self, input: &InputState) {
        if input.is_pressed(Key::P) && self.pause_debouncer.try_fire(input.now_ms) {
            self.pause_game();
            return;
        }

        if input.mouse_down {
            self.fire_missile();
        }
        if input.is_pressed(Key::E) {
            self.play.ship.roll_right(self.config.ship.roll_speed);
        }
        if input.is_pressed(Key::Q) {
            self.play.ship.roll_right(-self.config.ship.roll_speed);
        }
        if input.is_pressed(Key::W) {
            self.set_ship_throttle(1.0);
        } else {
            self.set_ship_throttle(0.0);
        }
        if input.is_pressed(Key::Space) {
            self.fire_missile();
        }
        if input.pointer_locked {
            let (dx, dy) = input.mouse_delta;
            let turn = self.config.ship.mouse_turn_speed;
            self.play.ship.yaw_left(-turn * dx);
            self.play.ship.pitch_up(-turn * dy);
        }

        if let Some(pad) = input.gamepad.clone() {
            let map = self.config.input.gamepad.clone();
            let turn = self.config.ship.gamepad_turn_speed;
            let live = |v: f32| if v.abs() < map.deadzone { 0.0 } else { v };

            self.play.ship.pitch_up(turn * live(pad.axis(map.pitch_axis)));
            self.play.ship.yaw_left(-turn * live(pad.axis(map.yaw_axis)));
            self.play.ship.roll_right(turn * live(pad.axis(map.roll_axis)));

            // A connected gamepad's trigger owns the throttle.
            self.set_ship_throttle(pad.button(map.throttle_trigger).value);

            if map.fire_buttons.iter().any(|&b| pad.button(b).pressed) {
                self.fire_missile();
            }
        }
    }

    fn set_ship_throttle(&mut self, amount: f32) {
        if amount != 0.0 {
            self.audio.play(Sound::Thruster);
        }
        self.play.ship.set_throttle(amount);
    }

    fn fire_missile(&mut self) {
        let ticks = self.play.ticks;
        if let Some(missile) = self.play.ship.try_fire(ticks, &self.config.missiles) {
            self.audio
                .play_oneshot(Sound::MissileFire, self.config.audio.sfx_volume * 0.15);
            self.play.missiles.push_back(missile);
        }
    }

    /// Record the level-clear tick, then advance once the wait has elapsed
    fn check_next_level(&mut self) {
        if let Some(finished_at) = self.play.level_finished_at {
            if self.play.ticks - finished_at < self.config.world.level_wait_ticks {
                return;
            }
            let next = self.play.level + 1;
            self.start_level(next);
            return;
        }

        if self.play.spawn_targets.iter().all(|&target| target == 0) {
            log::info!(
                "level {} cleared at tick {}",
                self.play.level,
                self.play.ticks
            );
            self.play.level_finished_at = Some(self.play.ticks);
        }
    }

    fn adjust_level(&mut self, level: u32) {
        self.play.level = level;
        self.play.spawn_targets = spawn::level_targets(level);
        self.hud.set_level(level);
    }

    fn enter_freecam(&mut self) {
        log::info!("entering freecam at tick {}", self.play.ticks);
        self.freecam.camera.sync(&self.play.ship, &self.play.camera);
        self.mode = GameMode::Freecam;
    }

    fn pause_game(&mut self) {
        log::info!("paused at tick {}", self.play.ticks);
        self.hud.set_stats_visible(true);
        self.hud.set_main_text(Some("Pause"));
        self.hud.set_buttons(Some("Unpause"), Some("Quit"));
        self.audio.pause(Sound::Music);
        self.audio.pause(Sound::Thruster);
        self.effects.push(HostEffect::ExitPointerLock);
        self.mode = GameMode::Pause;
        self.game_over = false;
    }

    fn unpause(&mut self) {
        self.hud.set_stats_visible(true);
        self.hud.set_main_text(None);
        self.hud.set_buttons(None, None);
        self.audio.play(Sound::Music);
        self.effects.push(HostEffect::RequestPointerLock);
        self.mode = GameMode::Play;
    }

    fn end_run(&mut self) {
        log::info!(
            "run over: level {}, score {}, tick {}",
            self.play.level,
            self.play.score,
            self.play.ticks
        );
        self.hud.set_stats_visible(true);
        self.hud.set_main_text(Some("Game over"));
        self.hud.set_buttons(Some("Restart"), Some("Quit"));
        self.audio.pause(Sound::Thruster);
        self.effects.push(HostEffect::ExitPointerLock);
        self.mode = GameMode::Pause;
        self.game_over = true;
    }

    fn quit_to_menu(&mut self) {
        self.show_menu_hud();
        self.mode = GameMode::Menu;
        self.game_over = false;
    }

    fn show_menu_hud(&mut self) {
        self.hud.set_stats_visible(false);
        self.hud.set_main_text(Some("Asteroids"));
        self.hud.set_buttons(Some("Start"), None);
    }

    fn refresh_clock(&mut self) {
        let total_seconds = self.play.ticks / self.config.world.ticks_per_second;
        self.hud.set_clock(total_seconds / 60, total_seconds % 60);
    }

    /// Build the frame for the play world in a fixed order: ship parts,
    /// optional collision markers, missiles, asteroids by tier, suns
    fn play_frame(&self, camera: &CameraView, fog: bool, show_markers: bool) -> RenderFrame {
        let play = &self.play;
        let mut objects = Vec::new();

        objects.push(play.ship.hull.clone());
        if play.ship.throttle.current() > 0.0 {
            objects.push(play.ship.flame.clone());
            objects.push(play.ship.flame_accent.clone());
        }
        objects.push(play.ship.reticle.clone());

        if show_markers {
            for point in play.ship.collision_points() {
                let mut dot = SceneNode::new(models::dot_mesh(), models::dot_material());
                dot.translate(point);
                objects.push(dot);
            }
        }

        for missile in &play.missiles {
            objects.push(missile.node.clone());
        }
        for asteroid in play.asteroids() {
            objects.push(asteroid.node.clone());
        }
        for sun in &play.suns {
            objects.push(sun.node.clone());
        }

        RenderFrame {
            lights: play.suns.iter().map(|s| s.node.pos()).collect(),
            objects,
            camera: camera.clone(),
            fog,
        }
    }

    fn menu_frame(&self) -> RenderFrame {
        let mut objects = Vec::new();
        for asteroid in &self.menu.asteroids {
            objects.push(asteroid.node.clone());
        }
        for sun in &self.menu.suns {
            objects.push(sun.node.clone());
        }

        RenderFrame {
            lights: self.menu.suns.iter().map(|s| s.node.pos()).collect(),
            objects,
            camera: self.menu.camera.view(),
            fog: true,
        }
    }
}

/// Apply the shared free-fly movement bindings to a camera
fn handle_freecam_moves(camera: &mut FreeCamera, input: &InputState, cfg: &FreecamConfig) {
    let mut movement = Vec3::zeros();
    if input.is_pressed(Key::A) {
        movement -= camera.right;
    }
    if input.is_pressed(Key::D) {
        movement += camera.right;
    }
    if input.is_pressed(Key::W) {
        movement += camera.forward;
    }
    if input.is_pressed(Key::S) {
        movement -= camera.forward;
    }
    if input.is_pressed(Key::LeftShift) {
        movement -= camera.up;
    }
    if input.is_pressed(Key::Space) {
        movement += camera.up;
    }
    if movement != Vec3::zeros() {
        let distance = camera.move_speed;
        camera.move_along(movement.normalize(), distance);
    }

    if input.is_pressed(Key::E) {
        camera.roll_right(cfg.roll_speed);
    }
    if input.is_pressed(Key::Q) {
        camera.roll_right(-cfg.roll_speed);
    }

    if input.is_pressed(Key::ArrowUp) {
        camera.move_speed += cfg.move_speed_increment;
    }
    if input.is_pressed(Key::ArrowDown) && camera.move_speed > cfg.move_speed_increment {
        camera.move_speed -= cfg.move_speed_increment;
    }
}
