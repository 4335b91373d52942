//! Asteroids and tier splitting

use rand::Rng;

use crate::config::AsteroidConfig;
use crate::foundation::math::{random_unit_vector, Vec3};
use crate::scene::{models, SceneNode};

/// Number of asteroid size tiers (0 = large, 1 = small)
pub const ASTEROID_TIERS: usize = 2;

/// Properties a split child inherits from its parent
#[derive(Debug, Clone)]
pub struct SplitSeed {
    /// Requested radius, clamped to the child tier's range
    pub radius: f32,
    /// Spin axis
    pub rotation_axis: Vec3,
    /// Spin speed, radians per tick
    pub rotation_speed: f32,
}

/// A tiered asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Scene node; owns the world transform and the damage-tinted material
    pub node: SceneNode,
    /// Velocity, applied once per tick
    pub velocity: Vec3,
    /// Collision radius, measured from the generated mesh
    pub radius: f32,
    /// Size tier; higher is smaller
    pub tier: usize,
    /// Spin axis
    pub rotation_axis: Vec3,
    /// Spin speed, radians per tick
    pub rotation_speed: f32,
    /// Remaining hit points; the asteroid dies at zero
    pub health: i32,
}

impl Asteroid {
    /// Create an asteroid of the given tier
    ///
    /// Without a seed, the radius and spin are randomized within the tier's
    /// configured ranges; a seed (from splitting) fixes them, with the
    /// radius still clamped into the tier's range.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        cfg: &AsteroidConfig,
        tier: usize,
        velocity: Vec3,
        seed: Option<SplitSeed>,
    ) -> Self {
        let tier_radius = cfg.radius_tiers[tier];
        let radius = match &seed {
            Some(seed) => tier_radius.clamp(seed.radius),
            None => tier_radius.sample(rng),
        };

        let (measured_radius, mesh) = models::random_asteroid(rng, radius);
        let (rotation_axis, rotation_speed) = match seed {
            Some(seed) => (seed.rotation_axis, seed.rotation_speed),
            None => (random_unit_vector(rng), cfg.rotation_speed.sample(rng)),
        };

        Self {
            node: SceneNode::new(mesh, models::asteroid_material()),
            velocity,
            radius: measured_radius,
            tier,
            rotation_axis,
            rotation_speed,
            health: cfg.health_tiers[tier],
        }
    }

    /// Split into two next-tier children at this asteroid's position
    ///
    /// Children get half the parent's radius (clamped by the child tier),
    /// the parent's spin, and the parent's velocity plus/minus a random
    /// impulse along one shared axis.
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R, cfg: &AsteroidConfig) -> [Self; 2] {
        let direction = random_unit_vector(rng);
        let speed = cfg.split_speed.sample(rng);
        let seed = SplitSeed {
            radius: self.radius / 2.0,
            rotation_axis: self.rotation_axis,
            rotation_speed: self.rotation_speed,
        };
        let pos = self.node.pos();

        let mut left = Self::new(
            rng,
            cfg,
            self.tier + 1,
            self.velocity + direction * speed,
            Some(seed.clone()),
        );
        left.node.translate(pos);

        let mut right = Self::new(
            rng,
            cfg,
            self.tier + 1,
            self.velocity - direction * speed,
            Some(seed),
        );
        right.node.translate(pos);

        [left, right]
    }

    /// Take one point of damage and shift the material toward the damage color
    pub fn damage(&mut self, cfg: &AsteroidConfig) {
        self.health -= 1;

        let health_fraction = self.health as f32 / cfg.health_tiers[self.tier] as f32;
        for i in 0..3 {
            let color = models::ASTEROID_COLOR[i] * health_fraction
                + models::ASTEROID_DAMAGED_COLOR[i] * (1.0 - health_fraction);
            self.node.material.ambient[i] = color * 0.4;
            self.node.material.diffuse[i] = color;
        }
    }
}
