//! Scene representation handed to the renderer
//!
//! Entities own a [`SceneNode`] per visible part; once per tick the game
//! rebuilds an explicit, ordered [`RenderFrame`] from the live entity set.

pub mod models;

use std::sync::Arc;

use crate::camera::CameraView;
use crate::foundation::math::{self, Mat4, Unit, Vec3};

/// Distance at which fog starts to blend in
pub const FOG_START: f32 = 24.0;
/// Distance at which fog fully obscures geometry
pub const FOG_END: f32 = 32.0;
/// Background / fog color
pub const SPACE_COLOR: [f32; 3] = [29.0 / 255.0, 17.0 / 255.0, 53.0 / 255.0];

/// Phong-style material for the fixed-function lighting pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: [f32; 3],
    /// Diffuse reflectance
    pub diffuse: [f32; 3],
    /// Specular reflectance
    pub specular: [f32; 3],
    /// Specular exponent
    pub shine: f32,
}

/// Triangle mesh with indexed vertices
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangles as index triples into `vertices`
    pub triangles: Vec<[u16; 3]>,
}

impl Mesh {
    /// Recenter the mesh so its vertex centroid sits at the origin
    ///
    /// Applied to every mesh not positioned relative to another one.
    pub fn centered(mut self) -> Self {
        let mut centroid = Vec3::zeros();
        for v in &self.vertices {
            centroid += v;
        }
        centroid /= self.vertices.len() as f32;
        for v in &mut self.vertices {
            *v -= centroid;
        }
        self
    }

    /// Mean distance of the vertices from the origin
    pub fn mean_radius(&self) -> f32 {
        let total: f32 = self.vertices.iter().map(Vec3::norm).sum();
        total / self.vertices.len() as f32
    }
}

/// A renderable object: shared mesh, per-node material, owned world transform
///
/// Each entity allocates fresh nodes on creation and drops them with the
/// entity; there is no pooling. (Known scalability limit; a renderer backend
/// may pool GPU buffers behind the trait.)
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Mesh geometry, shared between clones of this node
    pub mesh: Arc<Mesh>,
    /// Material, owned so damage recoloring stays per-entity
    pub material: Material,
    /// Model-to-world transform
    pub transform: Mat4,
}

impl SceneNode {
    /// Create a node at the origin
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh: Arc::new(mesh),
            material,
            transform: Mat4::identity(),
        }
    }

    /// World-space position of the node
    pub fn pos(&self) -> Vec3 {
        math::translation_of(&self.transform)
    }

    /// Translate the node in world coordinates
    pub fn translate(&mut self, v: Vec3) {
        self.transform = Mat4::new_translation(&v) * self.transform;
    }

    /// Spin the node about a model-space axis
    pub fn rotate_about(&mut self, axis: &Vec3, rads: f32) {
        self.transform *= Mat4::from_axis_angle(&Unit::new_normalize(*axis), rads);
    }
}

/// Everything the renderer needs for one frame
///
/// `objects` is rebuilt from scratch each tick in a fixed order (ship parts,
/// optional debug markers, missiles, asteroids by tier, suns) so the
/// renderer never re-iterates hidden lazy state.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Light positions (the suns)
    pub lights: Vec<Vec3>,
    /// Ordered renderable set for this frame
    pub objects: Vec<SceneNode>,
    /// Active camera
    pub camera: CameraView,
    /// Whether distance fog is enabled
    pub fog: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centered_moves_centroid_to_origin() {
        let mesh = Mesh {
            vertices: vec![
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(3.0, 1.0, 1.0),
                Vec3::new(2.0, 4.0, 1.0),
            ],
            triangles: vec![[0, 1, 2]],
        }
        .centered();

        let mut centroid = Vec3::zeros();
        for v in &mesh.vertices {
            centroid += v;
        }
        assert_relative_eq!(centroid.norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_translate_composes_in_world_space() {
        let mut node = SceneNode::new(models::sun_mesh(), models::sun_material());
        node.translate(Vec3::new(1.0, 2.0, 3.0));
        node.translate(Vec3::new(-1.0, 0.0, 1.0));
        assert_relative_eq!(node.pos(), Vec3::new(0.0, 2.0, 4.0));
    }

    #[test]
    fn test_rotate_about_keeps_position() {
        let mut node = SceneNode::new(models::sun_mesh(), models::sun_material());
        node.translate(Vec3::new(5.0, 0.0, 0.0));
        node.rotate_about(&Vec3::new(0.3, 1.0, -0.2), 0.7);
        assert_relative_eq!(node.pos(), Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
