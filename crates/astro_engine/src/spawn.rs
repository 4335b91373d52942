//! Spawning and despawning
//!
//! The world is a bubble around the ship: entities spawn on arcs just past
//! the fog wall and are culled once they drift past the despawn distance.
//! Population is target-driven; every tick the spawner tops each tier back
//! up to its target.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Asteroid, Sun, ASTEROID_TIERS};
use crate::foundation::math::{random_arc, random_arc_range, random_vector, Rangef};
use crate::game::state::{MenuState, PlayState};

/// Asteroid speed range for a level
pub fn level_speed(level: u32) -> Rangef {
    let level = level as f32;
    Rangef::new(0.01 + level * 0.005, 0.09 + level * 0.03)
}

/// Per-tier asteroid population targets for a level
pub fn level_targets(level: u32) -> [u32; ASTEROID_TIERS] {
    let level = level as f32;
    [
        (0.5 * level * level + 8.0 * level).round() as u32,
        (0.125 * level * level + 4.0 * level + 4.0).round() as u32,
    ]
}

/// Cull asteroids that drifted past the despawn distance
pub fn despawn_asteroids(play: &mut PlayState, cfg: &GameConfig) {
    let origin = play.ship.hull.pos();
    let limit = cfg.world.despawn_distance();
    for tier in &mut play.asteroid_tiers {
        let before = tier.len();
        tier.retain(|a| (a.node.pos() - origin).norm() <= limit);
        let culled = before - tier.len();
        if culled > 0 {
            log::debug!("despawned {culled} drifting asteroids");
        }
    }
}

/// Cull suns that drifted past the despawn distance
///
/// Suns don't move, but the ship does; a sun left far enough behind is
/// gone for good.
pub fn despawn_suns(play: &mut PlayState, cfg: &GameConfig) {
    let origin = play.ship.hull.pos();
    let limit = cfg.world.despawn_distance();
    play.suns
        .retain(|s| (s.node.pos() - origin).norm() <= limit);
}

/// Cull missiles whose tick budget has run out
///
/// Missiles are pushed in firing order, so expiry only ever pops from the
/// front.
pub fn despawn_missiles(play: &mut PlayState, cfg: &GameConfig) {
    let life_ticks = cfg.missiles.life_ticks(cfg.world.despawn_distance());
    while let Some(missile) = play.missiles.front() {
        if !missile.is_expired(play.ticks, life_ticks) {
            break;
        }
        play.missiles.pop_front();
    }
}

/// Top each tier up to its population target
///
/// New asteroids appear on an arc around the ship's facing at the spawn
/// distance, moving on a cone back toward the ship so the field converges
/// on the player rather than dispersing.
pub fn spawn_asteroids<R: Rng + ?Sized>(play: &mut PlayState, cfg: &GameConfig, rng: &mut R) {
    let ship_pos = play.ship.hull.pos();
    let facing = play.ship.forward;

    for tier in 0..ASTEROID_TIERS {
        while play.asteroid_tiers[tier].len() < play.spawn_targets[tier] as usize {
            let outward = random_arc(rng, &facing, cfg.asteroids.spawn_arc);
            let offset = outward * cfg.world.spawn_distance;
            let heading = random_arc(rng, &-outward, cfg.asteroids.velocity_arc);
            let velocity = heading * play.asteroid_speed.sample(rng);

            let mut asteroid = Asteroid::new(rng, &cfg.asteroids, tier, velocity, None);
            asteroid.node.translate(ship_pos + offset);
            play.asteroid_tiers[tier].push(asteroid);
        }
    }
}

/// Top the sun population up to its target
///
/// Replacements appear ahead of the ship's travel so the player keeps
/// flying into hazards. A stationary ship has no travel direction; fall
/// back to its facing.
pub fn spawn_suns<R: Rng + ?Sized>(play: &mut PlayState, cfg: &GameConfig, rng: &mut R) {
    let ship_pos = play.ship.hull.pos();
    let speed = play.ship.velocity.norm();
    let heading = if speed > 1e-6 {
        play.ship.velocity / speed
    } else {
        play.ship.forward
    };

    while play.suns.len() < cfg.suns.count {
        let offset = random_arc(rng, &heading, cfg.suns.spawn_arc) * cfg.world.spawn_distance;
        let mut sun = Sun::new();
        sun.node.translate(ship_pos + offset);
        play.suns.push(sun);
    }
}

/// Place a level's opening population around the ship
///
/// Unlike steady-state spawning, the opening asteroids vary their distance
/// across a band while staying inside the forward spawn cone; suns land
/// anywhere on the sphere.
pub fn populate_level<R: Rng + ?Sized>(play: &mut PlayState, cfg: &GameConfig, rng: &mut R) {
    let ship_pos = play.ship.hull.pos();
    let facing = play.ship.forward;

    for tier in 0..ASTEROID_TIERS {
        for _ in 0..play.spawn_targets[tier] {
            let distance = cfg.asteroids.initial_spawn_distance.sample(rng);
            let outward = random_arc(rng, &facing, cfg.asteroids.spawn_arc);
            let heading = random_arc(rng, &-outward, cfg.asteroids.velocity_arc);
            let velocity = heading * play.asteroid_speed.sample(rng);

            let mut asteroid = Asteroid::new(rng, &cfg.asteroids, tier, velocity, None);
            asteroid.node.translate(ship_pos + outward * distance);
            play.asteroid_tiers[tier].push(asteroid);
        }
    }

    for _ in 0..cfg.suns.count {
        let distance = cfg.suns.initial_spawn_distance.sample(rng);
        let offset = random_vector(rng, distance);
        let mut sun = Sun::new();
        sun.node.translate(ship_pos + offset);
        play.suns.push(sun);
    }
}

/// Cull menu asteroids that drifted past the despawn distance
pub fn despawn_menu_asteroids(menu: &mut MenuState, cfg: &GameConfig) {
    let origin = menu.camera.eye;
    let limit = cfg.world.despawn_distance();
    menu.asteroids
        .retain(|a| (a.node.pos() - origin).norm() <= limit);
}

/// Top the menu backdrop up to its asteroid count
///
/// Velocities point loosely back toward the camera but stay off the exact
/// line so nothing flies straight through the eye.
pub fn spawn_menu_asteroids<R: Rng + ?Sized>(menu: &mut MenuState, cfg: &GameConfig, rng: &mut R) {
    while menu.asteroids.len() < cfg.menu.asteroid_count {
        let outward = random_arc(rng, &menu.camera.forward, cfg.menu.spawn_arc);
        let position = menu.camera.eye + outward * cfg.world.spawn_distance;

        let heading = random_arc_range(rng, &-outward, cfg.menu.velocity_arc);
        let velocity = heading * cfg.menu.speed.sample(rng);

        let mut asteroid = Asteroid::new(rng, &cfg.asteroids, 1, velocity, None);
        asteroid.node.translate(position);
        menu.asteroids.push(asteroid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh_play(cfg: &GameConfig, level: u32) -> PlayState {
        let mut play = PlayState::new(cfg, 16.0 / 9.0);
        play.level = level;
        play.spawn_targets = level_targets(level);
        play.asteroid_speed = level_speed(level);
        play
    }

    #[test]
    fn test_level_curves() {
        assert_eq!(level_targets(1), [9, 8]);
        assert_eq!(level_targets(4), [40, 22]);

        let speed = level_speed(3);
        assert!((speed.lo - 0.025).abs() < 1e-6);
        assert!((speed.hi - 0.18).abs() < 1e-6);
    }

    #[test]
    fn test_spawner_converges_on_targets() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        let mut play = fresh_play(&cfg, 2);

        spawn_asteroids(&mut play, &cfg, &mut rng);
        spawn_suns(&mut play, &cfg, &mut rng);

        for tier in 0..ASTEROID_TIERS {
            assert_eq!(
                play.asteroid_tiers[tier].len(),
                play.spawn_targets[tier] as usize
            );
        }
        assert_eq!(play.suns.len(), cfg.suns.count);

        // A second pass with populations already at target changes nothing.
        let speeds: Vec<f32> = play.asteroids().map(|a| a.velocity.norm()).collect();
        spawn_asteroids(&mut play, &cfg, &mut rng);
        let after: Vec<f32> = play.asteroids().map(|a| a.velocity.norm()).collect();
        assert_eq!(speeds, after);
    }

    #[test]
    fn test_spawned_asteroids_sit_on_spawn_shell() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(22);
        let mut play = fresh_play(&cfg, 1);

        spawn_asteroids(&mut play, &cfg, &mut rng);
        let origin = play.ship.hull.pos();
        for asteroid in play.asteroids() {
            let distance = (asteroid.node.pos() - origin).norm();
            assert!((distance - cfg.world.spawn_distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_opening_population_stays_in_forward_cone() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(77);
        let mut play = fresh_play(&cfg, 1);

        populate_level(&mut play, &cfg, &mut rng);

        let origin = play.ship.hull.pos();
        let facing = play.ship.forward;
        let band = cfg.asteroids.initial_spawn_distance;
        for asteroid in play.asteroids() {
            let offset = asteroid.node.pos() - origin;
            let distance = offset.norm();
            assert!(distance >= band.lo - 1e-3 && distance <= band.hi + 1e-3);
            // Never behind the ship: placement is confined to the spawn arc.
            let angle = (offset / distance).dot(&facing).clamp(-1.0, 1.0).acos();
            assert!(
                angle <= cfg.asteroids.spawn_arc + 1e-4,
                "asteroid at {angle} rad off forward"
            );
        }
        assert_eq!(play.suns.len(), cfg.suns.count);
    }

    #[test]
    fn test_despawn_culls_within_one_pass() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(23);
        let mut play = fresh_play(&cfg, 1);
        spawn_asteroids(&mut play, &cfg, &mut rng);

        // Teleport one asteroid past the cull distance.
        let runaway = Vec3::new(0.0, cfg.world.despawn_distance() + 5.0, 0.0);
        let current = play.asteroid_tiers[0][0].node.pos();
        play.asteroid_tiers[0][0].node.translate(runaway - current);

        let before = play.asteroids().count();
        despawn_asteroids(&mut play, &cfg);
        assert_eq!(play.asteroids().count(), before - 1);
    }

    #[test]
    fn test_sun_spawn_with_stationary_ship() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(24);
        let mut play = fresh_play(&cfg, 1);
        assert_eq!(play.ship.velocity, Vec3::zeros());

        spawn_suns(&mut play, &cfg, &mut rng);
        for sun in &play.suns {
            assert!(sun.node.pos().iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_missile_despawn_respects_budget() {
        let cfg = GameConfig::default();
        let mut play = fresh_play(&cfg, 1);
        let budget = cfg.missiles.life_ticks(cfg.world.despawn_distance());

        let missile = play
            .ship
            .try_fire(0, &cfg.missiles)
            .expect("first shot always fires");
        play.missiles.push_back(missile);

        play.ticks = budget - 1;
        despawn_missiles(&mut play, &cfg);
        assert_eq!(play.missiles.len(), 1);

        play.ticks = budget;
        despawn_missiles(&mut play, &cfg);
        assert!(play.missiles.is_empty());
    }

    #[test]
    fn test_menu_population_and_cull() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(25);
        let mut menu = MenuState::new(&cfg, 16.0 / 9.0);

        spawn_menu_asteroids(&mut menu, &cfg, &mut rng);
        assert_eq!(menu.asteroids.len(), cfg.menu.asteroid_count);
        for asteroid in &menu.asteroids {
            assert_eq!(asteroid.tier, 1);
            let speed = asteroid.velocity.norm();
            assert!(speed >= cfg.menu.speed.lo && speed <= cfg.menu.speed.hi);
        }

        let runaway = Vec3::new(cfg.world.despawn_distance() + 2.0, 0.0, 0.0);
        let current = menu.asteroids[0].node.pos();
        menu.asteroids[0].node.translate(runaway - current);
        despawn_menu_asteroids(&mut menu, &cfg);
        assert_eq!(menu.asteroids.len(), cfg.menu.asteroid_count - 1);
    }
}
