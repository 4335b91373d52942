//! Collision detection and resolution
//!
//! Missiles and asteroids collide as point-versus-sphere using each
//! asteroid's measured mesh radius. Ship collisions sample the hull's
//! transformed vertices against asteroid spheres (shrunk by a fudge factor
//! in the player's favor) and against sun cubes.

use rand::Rng;

use crate::config::AsteroidConfig;
use crate::entities::{Asteroid, ASTEROID_TIERS};
use crate::game::state::PlayState;

/// Destroy missiles that flew into a sun
pub fn collide_missile_sun(play: &mut PlayState) {
    let suns = &play.suns;
    play.missiles
        .retain(|m| !suns.iter().any(|s| s.contains(&m.node.pos())));
}

/// Resolve missile hits on asteroids
///
/// Every overlapping asteroid takes a point of damage; a missile passing
/// through a cluster can wound several in one tick. Each spent missile is
/// removed exactly once even if it hit more than one asteroid.
pub fn collide_missile_asteroid(play: &mut PlayState, cfg: &AsteroidConfig) {
    let mut spent: Vec<usize> = Vec::new();

    for tier in &mut play.asteroid_tiers {
        for asteroid in tier {
            let center = asteroid.node.pos();
            for (i, missile) in play.missiles.iter().enumerate() {
                if (missile.node.pos() - center).norm() <= asteroid.radius {
                    asteroid.damage(cfg);
                    spent.push(i);
                }
            }
        }
    }

    spent.sort_unstable();
    spent.dedup();
    for i in spent.into_iter().rev() {
        play.missiles.remove(i);
    }
}

/// Remove dead asteroids, splitting those with a smaller tier below them
///
/// Splitting raises the child tier's population target by two so the spawner
/// doesn't cull the children back down; the dead parent lowers its own
/// tier's target by one. Returns the points scored.
pub fn handle_dead_asteroids<R: Rng + ?Sized>(
    play: &mut PlayState,
    cfg: &AsteroidConfig,
    rng: &mut R,
) -> u32 {
    let mut points = 0;

    for tier in 0..ASTEROID_TIERS {
        let mut children: Vec<Asteroid> = Vec::new();

        let mut i = play.asteroid_tiers[tier].len();
        while i > 0 {
            i -= 1;
            if play.asteroid_tiers[tier][i].health > 0 {
                continue;
            }
            if tier + 1 < ASTEROID_TIERS {
                children.extend(play.asteroid_tiers[tier][i].split(rng, cfg));
            }
            play.asteroid_tiers[tier].remove(i);
            play.spawn_targets[tier] = play.spawn_targets[tier].saturating_sub(1);
            points += cfg.point_tiers[tier];
        }

        if !children.is_empty() {
            play.spawn_targets[tier + 1] += children.len() as u32;
            play.asteroid_tiers[tier + 1].extend(children);
        }
    }

    points
}

/// Whether any hull vertex sits inside an asteroid's fudged radius
pub fn ship_hit_asteroid(play: &PlayState, cfg: &AsteroidConfig) -> bool {
    let points = play.ship.collision_points();
    play.asteroids().any(|asteroid| {
        let center = asteroid.node.pos();
        let reach = asteroid.radius * cfg.radius_fudge_factor;
        points.iter().any(|p| (p - center).norm() <= reach)
    })
}

/// Whether any hull vertex sits inside a sun
pub fn ship_hit_sun(play: &PlayState) -> bool {
    let points = play.ship.collision_points();
    play.suns
        .iter()
        .any(|sun| points.iter().any(|p| sun.contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::Sun;
    use crate::foundation::math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn play_with_asteroid_at(
        cfg: &GameConfig,
        rng: &mut StdRng,
        tier: usize,
        pos: Vec3,
    ) -> PlayState {
        let mut play = PlayState::new(cfg, 16.0 / 9.0);
        let mut asteroid = Asteroid::new(rng, &cfg.asteroids, tier, Vec3::zeros(), None);
        asteroid.node.translate(pos);
        play.spawn_targets[tier] = 1;
        play.asteroid_tiers[tier].push(asteroid);
        play
    }

    fn fire_at(play: &mut PlayState, pos: Vec3) {
        play.ship.last_fired = None;
        let mut missile = play
            .ship
            .try_fire(play.ticks, &GameConfig::default().missiles)
            .expect("cooldown cleared");
        let current = missile.node.pos();
        missile.node.translate(pos - current);
        play.missiles.push_back(missile);
    }

    #[test]
    fn test_two_hits_split_a_large_asteroid() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(31);
        let target = Vec3::new(0.0, 8.0, 0.0);
        let mut play = play_with_asteroid_at(&cfg, &mut rng, 0, target);

        // First hit wounds but doesn't kill.
        fire_at(&mut play, target);
        collide_missile_asteroid(&mut play, &cfg.asteroids);
        assert!(play.missiles.is_empty());
        assert_eq!(play.asteroid_tiers[0][0].health, 1);
        assert_eq!(handle_dead_asteroids(&mut play, &cfg.asteroids, &mut rng), 0);

        // Second hit kills: two tier-1 children appear at the parent's spot.
        let parent_pos = play.asteroid_tiers[0][0].node.pos();
        fire_at(&mut play, parent_pos);
        collide_missile_asteroid(&mut play, &cfg.asteroids);
        let points = handle_dead_asteroids(&mut play, &cfg.asteroids, &mut rng);

        assert_eq!(points, cfg.asteroids.point_tiers[0]);
        assert!(play.asteroid_tiers[0].is_empty());
        assert_eq!(play.asteroid_tiers[1].len(), 2);
        assert_eq!(play.spawn_targets, [0, 2]);
    }

    #[test]
    fn test_small_asteroid_dies_without_children() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(32);
        let target = Vec3::new(3.0, 5.0, -2.0);
        let mut play = play_with_asteroid_at(&cfg, &mut rng, 1, target);

        fire_at(&mut play, target);
        collide_missile_asteroid(&mut play, &cfg.asteroids);
        let points = handle_dead_asteroids(&mut play, &cfg.asteroids, &mut rng);

        assert_eq!(points, cfg.asteroids.point_tiers[1]);
        assert!(play.asteroid_tiers[1].is_empty());
        assert_eq!(play.spawn_targets, [0, 0]);
    }

    #[test]
    fn test_one_missile_wounds_overlapping_asteroids_once_each() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(33);
        let target = Vec3::new(0.0, 6.0, 0.0);
        let mut play = play_with_asteroid_at(&cfg, &mut rng, 0, target);

        // A second asteroid overlapping the same point.
        let mut other = Asteroid::new(&mut rng, &cfg.asteroids, 0, Vec3::zeros(), None);
        other.node.translate(target + Vec3::new(0.3, 0.0, 0.0));
        play.spawn_targets[0] = 2;
        play.asteroid_tiers[0].push(other);

        fire_at(&mut play, target);
        collide_missile_asteroid(&mut play, &cfg.asteroids);

        // Both wounded, and the missile list isn't double-spliced.
        assert!(play.missiles.is_empty());
        assert!(play.asteroid_tiers[0].iter().all(|a| a.health == 1));
    }

    #[test]
    fn test_sun_eats_missiles() {
        let cfg = GameConfig::default();
        let mut play = PlayState::new(&cfg, 16.0 / 9.0);
        let mut sun = Sun::new();
        sun.node.translate(Vec3::new(0.0, 10.0, 0.0));
        play.suns.push(sun);

        fire_at(&mut play, Vec3::new(0.0, 10.0, 0.0));
        fire_at(&mut play, Vec3::new(0.0, 20.0, 0.0));

        collide_missile_sun(&mut play);
        assert_eq!(play.missiles.len(), 1);
    }

    #[test]
    fn test_ship_asteroid_collision_uses_fudged_radius() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(35);

        // On top of the ship: hit.
        let play = play_with_asteroid_at(&cfg, &mut rng, 0, Vec3::zeros());
        assert!(ship_hit_asteroid(&play, &cfg.asteroids));

        // Just outside the fudged radius: miss.
        let radius = play.asteroid_tiers[0][0].radius;
        let near_miss = Vec3::new(0.0, radius * cfg.asteroids.radius_fudge_factor + 1.0, 0.0);
        let play = play_with_asteroid_at(&cfg, &mut rng, 0, near_miss);
        let reach = play.asteroid_tiers[0][0].radius * cfg.asteroids.radius_fudge_factor;
        if play
            .ship
            .collision_points()
            .iter()
            .all(|p| (p - near_miss).norm() > reach)
        {
            assert!(!ship_hit_asteroid(&play, &cfg.asteroids));
        }
    }

    #[test]
    fn test_ship_sun_collision() {
        let cfg = GameConfig::default();
        let mut play = PlayState::new(&cfg, 16.0 / 9.0);
        assert!(!ship_hit_sun(&play));

        let sun = Sun::new();
        play.suns.push(sun);
        // A sun at the origin envelops the ship.
        assert!(ship_hit_sun(&play));
    }
}
