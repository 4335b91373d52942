//! Suns: light sources with lethal volumes

use crate::foundation::math::Vec3;
use crate::scene::{models, SceneNode};

/// An indestructible sun
///
/// The cube volume doubles as the light source position and a deadly
/// collision volume for ships and missiles.
#[derive(Debug, Clone)]
pub struct Sun {
    /// Scene node
    pub node: SceneNode,
}

impl Sun {
    /// Create a sun at the origin
    pub fn new() -> Self {
        Self {
            node: SceneNode::new(models::sun_mesh(), models::sun_material()),
        }
    }

    /// Whether a point falls inside the sun's axis-aligned cube
    pub fn contains(&self, point: &Vec3) -> bool {
        let center = self.node.pos();
        let half = models::SUN_SIDE_LENGTH / 2.0;
        (0..3).all(|i| center[i] - half <= point[i] && point[i] <= center[i] + half)
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_cube_boundary() {
        let mut sun = Sun::new();
        sun.node.translate(Vec3::new(10.0, 0.0, 0.0));

        assert!(sun.contains(&Vec3::new(10.0, 0.0, 0.0)));
        assert!(sun.contains(&Vec3::new(10.9, 0.9, -0.9)));
        // Exactly on the face counts as inside.
        assert!(sun.contains(&Vec3::new(11.0, 0.0, 0.0)));
        assert!(!sun.contains(&Vec3::new(11.1, 0.0, 0.0)));
        assert!(!sun.contains(&Vec3::new(10.0, 0.0, 1.5)));
    }
}
