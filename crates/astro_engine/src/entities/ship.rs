//! The player ship

use crate::config::MissileConfig;
use crate::entities::Missile;
use crate::foundation::math::{Mat4, Point3, Quat, Rangef, Unit, UnitQuaternion, Vec3};
use crate::scene::{models, SceneNode};

/// A scalar that eases toward a target under asymmetric speed limits
///
/// One [`step`](Eased::step) moves the current value toward the target by at
/// most the appropriate directional limit, never overshooting.
#[derive(Debug, Clone)]
pub struct Eased {
    want: f32,
    current: f32,
    speed_limit: Rangef,
}

impl Eased {
    /// Create an eased value starting at `value`
    pub fn new(value: f32, speed_limit: Rangef) -> Self {
        Self {
            want: value,
            current: value,
            speed_limit,
        }
    }

    /// Set the target value
    pub fn set(&mut self, value: f32) {
        self.want = value;
    }

    /// Target value
    pub fn want(&self) -> f32 {
        self.want
    }

    /// Current (eased) value
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one tick toward the target
    pub fn step(&mut self) {
        self.current += self.speed_limit.clamp(self.want - self.current);
    }
}

/// The player ship
///
/// Rotation state is kept twice: `world_rotation` steers the basis vectors
/// in world space while `model_rotation` turns the visual hull in model
/// space. Both receive the same impulses and decay together.
#[derive(Debug, Clone)]
pub struct Ship {
    /// Velocity, applied once per tick
    pub velocity: Vec3,

    /// Hull node; its transform is the ship's world transform
    pub hull: SceneNode,
    /// Exhaust flame, scaled by throttle
    pub flame: SceneNode,
    /// Inner flame accent; shares the flame's transform
    pub flame_accent: SceneNode,
    /// Aiming reticle; shares the hull's transform
    pub reticle: SceneNode,

    /// Tick of the last missile launch
    pub last_fired: Option<u64>,
    /// Eased throttle in [0, 1]
    pub throttle: Eased,

    /// Accumulated steering rotation, world space
    pub world_rotation: Quat,
    /// Accumulated steering rotation, model space
    pub model_rotation: Quat,

    /// Forward basis vector (unit)
    pub forward: Vec3,
    /// Up basis vector (unit)
    pub up: Vec3,
    /// Right basis vector (unit)
    pub right: Vec3,

    collision_template: Vec<Vec3>,
    nozzle: Vec3,
}

impl Ship {
    /// Create a fresh ship at the origin
    pub fn new(throttle_speed_limit: Rangef) -> Self {
        let hull_mesh = models::ship_mesh();
        let collision_template = hull_mesh.vertices.clone();
        let nozzle = hull_mesh.vertices[models::SHIP_NOZZLE_VERTEX];

        Self {
            velocity: Vec3::zeros(),
            hull: SceneNode::new(hull_mesh, models::ship_material()),
            flame: SceneNode::new(models::ship_flame_mesh(), models::ship_flame_material()),
            flame_accent: SceneNode::new(
                models::ship_flame_accent_mesh(),
                models::ship_flame_accent_material(),
            ),
            reticle: SceneNode::new(models::ship_reticle_mesh(), models::ship_reticle_material()),
            last_fired: None,
            throttle: Eased::new(0.0, throttle_speed_limit),
            world_rotation: Quat::identity(),
            model_rotation: Quat::identity(),
            up: Vec3::new(0.0, 0.0, -1.0),
            forward: Vec3::new(0.0, 1.0, 0.0),
            right: Vec3::new(-1.0, 0.0, 0.0),
            collision_template,
            nozzle,
        }
    }

    /// Set the desired throttle; easing catches the current value up
    pub fn set_throttle(&mut self, amount: f32) {
        self.throttle.set(amount);
    }

    /// Apply a pitch impulse (positive = nose up)
    pub fn pitch_up(&mut self, rads: f32) {
        self.rotate(rads, self.right, Vec3::new(-1.0, 0.0, 0.0));
    }

    /// Apply a yaw impulse (positive = nose left)
    pub fn yaw_left(&mut self, rads: f32) {
        self.rotate(rads, self.up, Vec3::new(0.0, 0.0, -1.0));
    }

    /// Apply a roll impulse (positive = clockwise from the pilot's seat)
    pub fn roll_right(&mut self, rads: f32) {
        self.rotate(rads, self.forward, Vec3::new(0.0, 1.0, 0.0));
    }

    fn rotate(&mut self, rads: f32, about_world: Vec3, about_model: Vec3) {
        let world_impulse =
            UnitQuaternion::from_axis_angle(&Unit::new_normalize(about_world), rads);
        self.world_rotation = self.world_rotation * world_impulse.into_inner();

        let model_impulse =
            UnitQuaternion::from_axis_angle(&Unit::new_normalize(about_model), rads);
        self.model_rotation = self.model_rotation * model_impulse.into_inner();
    }

    /// Hull vertices under the current world transform
    ///
    /// These are the sample points every ship collision test uses.
    pub fn collision_points(&self) -> Vec<Vec3> {
        self.collision_template
            .iter()
            .map(|v| self.hull.transform.transform_point(&Point3::from(*v)).coords)
            .collect()
    }

    /// Ideal (unsmoothed) chase-camera eye: behind and above the hull
    pub fn eye(&self) -> Vec3 {
        self.hull.pos() - self.forward * 0.7 + self.up * 0.35
    }

    /// Launch a missile if the cooldown has elapsed
    ///
    /// The missile inherits the ship's velocity plus the configured speed
    /// along `forward`, and spawns at the nozzle vertex in model space.
    pub fn try_fire(&mut self, ticks: u64, cfg: &MissileConfig) -> Option<Missile> {
        if let Some(last) = self.last_fired {
            if ticks - last <= cfg.cooldown_ticks {
                return None;
            }
        }
        self.last_fired = Some(ticks);

        let mut node = SceneNode::new(models::missile_mesh(), models::missile_material());
        node.transform = self.hull.transform * Mat4::new_translation(&self.nozzle);

        Some(Missile {
            birth: ticks,
            velocity: self.velocity + self.forward * cfg.speed,
            node,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn limits() -> Rangef {
        Rangef::new(-1.0 / 9.0, 1.0 / 15.0)
    }

    #[test]
    fn test_eased_respects_asymmetric_limits() {
        let mut throttle = Eased::new(0.0, limits());
        throttle.set(1.0);
        throttle.step();
        // Ramp-up limited by the upper bound.
        assert_relative_eq!(throttle.current(), 1.0 / 15.0);

        let mut throttle = Eased::new(1.0, limits());
        throttle.set(0.0);
        throttle.step();
        // Falloff limited by the (larger) lower bound.
        assert_relative_eq!(throttle.current(), 1.0 - 1.0 / 9.0);
    }

    #[test]
    fn test_eased_never_overshoots() {
        let mut throttle = Eased::new(0.0, limits());
        throttle.set(0.05);
        throttle.step();
        assert_relative_eq!(throttle.current(), 0.05);
        throttle.step();
        assert_relative_eq!(throttle.current(), 0.05);
    }

    #[test]
    fn test_initial_basis_is_orthonormal() {
        let ship = Ship::new(limits());
        assert_relative_eq!(ship.forward.norm(), 1.0);
        assert_relative_eq!(ship.up.norm(), 1.0);
        assert_relative_eq!(ship.right.norm(), 1.0);
        assert_relative_eq!(ship.forward.dot(&ship.up), 0.0);
        assert_relative_eq!(ship.forward.dot(&ship.right), 0.0);
        assert_relative_eq!(ship.up.dot(&ship.right), 0.0);
    }

    #[test]
    fn test_fire_cooldown() {
        let cfg = MissileConfig::default();
        let mut ship = Ship::new(limits());

        assert!(ship.try_fire(100, &cfg).is_some());
        // Within the cooldown window nothing launches.
        assert!(ship.try_fire(100 + cfg.cooldown_ticks, &cfg).is_none());
        // Strictly past it, the next missile goes out.
        assert!(ship.try_fire(101 + cfg.cooldown_ticks, &cfg).is_some());
    }

    #[test]
    fn test_missile_inherits_ship_velocity() {
        let cfg = MissileConfig::default();
        let mut ship = Ship::new(limits());
        ship.velocity = Vec3::new(0.1, 0.0, 0.0);
        let missile = ship.try_fire(0, &cfg).expect("first shot always fires");
        assert_relative_eq!(
            missile.velocity,
            Vec3::new(0.1, cfg.speed, 0.0),
            epsilon = 1e-6
        );
    }
}
