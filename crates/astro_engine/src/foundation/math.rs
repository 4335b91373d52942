//! Math utilities and types
//!
//! Provides the fundamental math types for the simulation plus the random
//! sampling helpers used by the spawn subsystem.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Point3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Raw (not necessarily unit) quaternion type
///
/// The ship's accumulated rotation state is scaled component-wise during
/// decay, so it is stored raw and re-unitized explicitly.
pub type Quat = Quaternion<f32>;

/// Inclusive scalar range `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rangef {
    /// Lower bound
    pub lo: f32,
    /// Upper bound
    pub hi: f32,
}

impl Rangef {
    /// Create a new range
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// Clamp a value into the range
    pub fn clamp(self, n: f32) -> f32 {
        n.max(self.lo).min(self.hi)
    }

    /// Interpolate across the range: 0 maps to `lo`, 1 maps to `hi`
    pub fn interpolate(self, pos: f32) -> f32 {
        pos * self.hi + (1.0 - pos) * self.lo
    }

    /// Draw a uniform sample from the range
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        randf(rng, self.lo, self.hi)
    }
}

/// Uniform random float in `[lo, hi)`
pub fn randf<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    (hi - lo) * rng.gen::<f32>() + lo
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Random unit vector, uniform over the sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = randf(rng, 0.0, std::f32::consts::TAU);
    let z = randf(rng, -1.0, 1.0);
    let planar = (1.0 - z * z).sqrt();
    Vec3::new(angle.cos() * planar, angle.sin() * planar, z)
}

/// Random vector of the given length, uniform in direction
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> Vec3 {
    random_unit_vector(rng) * scale
}

/// Random direction within an angular cone around a unit `direction`
pub fn random_arc<R: Rng + ?Sized>(rng: &mut R, direction: &Vec3, arc: f32) -> Vec3 {
    random_arc_range(rng, direction, Rangef::new(0.0, arc))
}

/// Random direction within an angular cone shell around a unit `direction`
///
/// The outward angle is sampled from `arc`, then the result is rotated
/// uniformly around `direction` itself. The perpendicular axis is seeded
/// with `direction + X`; when `direction` is nearly anti-parallel to the X
/// axis that seed collapses, so the fallback seed `direction + Y` is used
/// instead. The constructed perpendicular is therefore never zero-length.
pub fn random_arc_range<R: Rng + ?Sized>(rng: &mut R, direction: &Vec3, arc: Rangef) -> Vec3 {
    let mut seed = Vec3::new(direction.x + 1.0, direction.y, direction.z);
    if seed.x.abs() < 0.01 {
        seed = Vec3::new(direction.x, direction.y + 1.0, direction.z);
    }
    let perpendicular = direction.cross(&seed).normalize();

    let outward = Rotation3::from_axis_angle(&Unit::new_normalize(perpendicular), arc.sample(rng));
    let around = Rotation3::from_axis_angle(
        &Unit::new_normalize(*direction),
        randf(rng, 0.0, std::f32::consts::TAU),
    );

    around * (outward * direction)
}

/// Translation component of a transform matrix
pub fn translation_of(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// GL-convention right-handed look-at view matrix
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(eye), &Point3::from(center), &up)
}

/// GL-convention perspective projection
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, fov_y, near, far)
}
