//! Physics integration
//!
//! Fixed-tick Euler integration: one simulation step translates every
//! entity by its velocity, spins asteroids, decays the ship's accumulated
//! steering rotation, and eases the throttle. No interpolation between
//! ticks.

use std::collections::VecDeque;

use crate::config::ShipConfig;
use crate::entities::{Asteroid, Missile, Ship};
use crate::foundation::math::{Mat4, Quat, UnitQuaternion, Vec3};

/// Accelerate the ship along its forward vector by the eased throttle
pub fn accelerate_ship(ship: &mut Ship, cfg: &ShipConfig) {
    ship.velocity += ship.forward * (cfg.max_thrust * ship.throttle.current());
}

/// Translate the ship by its velocity
pub fn move_ship(ship: &mut Ship) {
    let velocity = ship.velocity;
    ship.hull.translate(velocity);
}

/// Translate every missile by its velocity
pub fn move_missiles(missiles: &mut VecDeque<Missile>) {
    for missile in missiles {
        missile.node.translate(missile.velocity);
    }
}

/// Translate and spin one asteroid
pub fn step_asteroid(asteroid: &mut Asteroid) {
    let axis = asteroid.rotation_axis;
    asteroid.node.translate(asteroid.velocity);
    asteroid.node.rotate_about(&axis, asteroid.rotation_speed);
}

/// Translate and spin every asteroid across all tiers
pub fn move_asteroids(tiers: &mut [Vec<Asteroid>]) {
    for asteroid in tiers.iter_mut().flatten() {
        step_asteroid(asteroid);
    }
}

/// Scale a rotation quaternion's vector part and recompute the scalar part
/// so it stays a valid unit rotation
fn decay_rotation(q: &mut Quat, factor: f32) {
    let v = q.imag() * factor;
    let w = (1.0 - v.norm_squared()).abs().sqrt();
    *q = Quat::from_parts(w, v);
}

/// Decay the ship's steering rotation and apply it
///
/// The damping factor interpolates logarithmically between a low epsilon
/// (fully dissipated) and a topout threshold (maximum damping), clamped to
/// [0, 1] and scaled by a constant below one. Small persistent inputs keep
/// compounding; large accumulated rotation is aggressively damped. Both the
/// world and model rotations share the factor, then the world rotation
/// steers the basis vectors and the model rotation turns the hull.
pub fn rotate_ship(ship: &mut Ship, cfg: &ShipConfig) {
    let turn_speed = ship.world_rotation.imag().norm();
    let rotation_factor = ((turn_speed.ln() - cfg.rotation_epsilon.ln())
        / (cfg.rotation_topout.ln() - cfg.rotation_epsilon.ln()))
    .clamp(0.0, 1.0);
    let scale_factor = rotation_factor * cfg.rotation_topout_scaling;

    decay_rotation(&mut ship.world_rotation, scale_factor);
    decay_rotation(&mut ship.model_rotation, scale_factor);

    let world = UnitQuaternion::new_normalize(ship.world_rotation);
    ship.forward = world * ship.forward;
    ship.up = world * ship.up;
    ship.right = world * ship.right;

    let model = UnitQuaternion::new_normalize(ship.model_rotation);
    ship.hull.transform *= model.to_homogeneous();
}

/// Step the throttle easing and sync the dependent scene nodes
///
/// The flame stretches with the throttle, the accent rides the flame, and
/// the reticle rides the hull. Returns the eased throttle so the caller can
/// set the thruster volume.
pub fn refresh_ship_visuals(ship: &mut Ship) -> f32 {
    ship.throttle.step();
    let throttle = ship.throttle.current();

    ship.flame.transform =
        ship.hull.transform * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, throttle, 1.0));
    ship.flame_accent.transform = ship.flame.transform;
    ship.reticle.transform = ship.hull.transform;

    throttle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::chase_camera;
    use crate::config::{GameConfig, WorldConfig};
    use crate::foundation::math::{randf, Rangef};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn test_ship() -> Ship {
        Ship::new(Rangef::new(-1.0 / 9.0, 1.0 / 15.0))
    }

    #[test]
    fn test_decay_rotation_keeps_unit_norm() {
        let mut q = Quat::from_parts(0.9, Vec3::new(0.1, 0.2, -0.3));
        decay_rotation(&mut q, 0.925);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-5);
        assert!(q.scalar() >= 0.0);
    }

    #[test]
    fn test_rotation_decay_dissipates() {
        let cfg = ShipConfig::default();
        let mut ship = test_ship();
        ship.pitch_up(0.05);
        for _ in 0..600 {
            rotate_ship(&mut ship, &cfg);
        }
        // With no further impulses the accumulated rotation dies away.
        assert!(ship.world_rotation.imag().norm() < 1e-6);
    }

    #[test]
    fn test_basis_stays_orthonormal_under_impulses_and_decay() {
        let cfg = ShipConfig::default();
        let mut ship = test_ship();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            ship.pitch_up(randf(&mut rng, -0.003, 0.003));
            ship.yaw_left(randf(&mut rng, -0.003, 0.003));
            if rng.gen::<bool>() {
                ship.roll_right(0.005);
            }
            rotate_ship(&mut ship, &cfg);

            assert_relative_eq!(ship.world_rotation.norm(), 1.0, epsilon = 1e-4);
        }

        assert_relative_eq!(ship.forward.norm(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(ship.up.norm(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(ship.right.norm(), 1.0, epsilon = 1e-3);
        assert_relative_eq!(ship.forward.dot(&ship.up), 0.0, epsilon = 1e-3);
        assert_relative_eq!(ship.forward.dot(&ship.right), 0.0, epsilon = 1e-3);
        assert_relative_eq!(ship.up.dot(&ship.right), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_thrust_accumulates_along_forward() {
        let cfg = ShipConfig::default();
        let mut ship = test_ship();
        ship.set_throttle(1.0);
        for _ in 0..30 {
            ship.throttle.step();
        }
        accelerate_ship(&mut ship, &cfg);
        assert!(ship.velocity.dot(&ship.forward) > 0.0);
        assert_relative_eq!(ship.velocity.cross(&ship.forward).norm(), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_step_asteroid_translates_and_spins() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(6);
        let mut asteroid = Asteroid::new(
            &mut rng,
            &cfg.asteroids,
            0,
            Vec3::new(0.1, 0.0, -0.2),
            None,
        );
        let before = asteroid.node.pos();
        step_asteroid(&mut asteroid);
        assert_relative_eq!(
            asteroid.node.pos(),
            before + Vec3::new(0.1, 0.0, -0.2),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_chase_eye_lerps_toward_ideal() {
        let ship_cfg = ShipConfig::default();
        let world_cfg = WorldConfig::default();
        let ship = test_ship();
        let ideal = ship.eye();
        let last = ideal + Vec3::new(1.0, 0.0, 0.0);

        let view = chase_camera(&ship, last, 16.0 / 9.0, &ship_cfg, &world_cfg);
        let expected = last + (ideal - last) * ship_cfg.camera_chase_factor;
        assert_relative_eq!(view.eye, expected, epsilon = 1e-6);
    }
}
