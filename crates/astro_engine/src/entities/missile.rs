//! Missiles

use crate::foundation::math::Vec3;
use crate::scene::SceneNode;

/// A fired missile
///
/// Lifetime is bounded by a tick budget derived from the despawn distance
/// and missile speed, so a missile can never outlive the visible world.
#[derive(Debug, Clone)]
pub struct Missile {
    /// Tick the missile was fired on
    pub birth: u64,
    /// Velocity, applied once per tick
    pub velocity: Vec3,
    /// Scene node
    pub node: SceneNode,
}

impl Missile {
    /// Whether the missile's tick budget has run out
    pub fn is_expired(&self, ticks: u64, life_ticks: u64) -> bool {
        ticks.saturating_sub(self.birth) >= life_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::models;

    #[test]
    fn test_expiry_boundary() {
        let missile = Missile {
            birth: 100,
            velocity: Vec3::zeros(),
            node: SceneNode::new(models::missile_mesh(), models::missile_material()),
        };
        let budget = 49;
        assert!(!missile.is_expired(100 + budget - 1, budget));
        assert!(missile.is_expired(100 + budget, budget));
    }
}
