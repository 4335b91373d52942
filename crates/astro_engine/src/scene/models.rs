//! Built-in model geometry and materials
//!
//! All gameplay meshes are tiny hand-authored or procedurally jittered
//! shapes; every constructor returns a fresh [`Mesh`] so each entity owns
//! its own copy (asteroids mutate their material on damage).

use rand::Rng;

use super::{Material, Mesh};
use crate::foundation::math::{randf, random_vector, Vec3};

/// Convert 8-bit channel values to a linear color triple
pub fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ]
}

/// Sun cube side length; also the lethal collision volume size
pub const SUN_SIDE_LENGTH: f32 = 2.0;

/// Asteroid base color
pub const ASTEROID_COLOR: [f32; 3] = [88.0 / 255.0, 69.0 / 255.0, 56.0 / 255.0];
/// Color asteroids trend toward as they take damage
pub const ASTEROID_DAMAGED_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
/// Ambient channel scale for asteroid materials
pub const ASTEROID_AMBIENT_SCALAR: f32 = 0.5;

const CUBE_TRIANGLES: [[u16; 3]; 12] = [
    [0, 1, 2],
    [2, 3, 0],
    [4, 5, 6],
    [6, 7, 4],
    [0, 1, 4],
    [4, 5, 1],
    [1, 2, 5],
    [2, 5, 6],
    [2, 3, 6],
    [3, 6, 7],
    [3, 0, 7],
    [0, 7, 4],
];

fn cube_vertices(side: f32) -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(side, 0.0, 0.0),
        Vec3::new(side, 0.0, side),
        Vec3::new(0.0, 0.0, side),
        Vec3::new(0.0, side, 0.0),
        Vec3::new(side, side, 0.0),
        Vec3::new(side, side, side),
        Vec3::new(0.0, side, side),
    ]
}

/// Sun material: pure emissive-looking ambient, no shading
pub fn sun_material() -> Material {
    Material {
        ambient: rgb(252, 229, 112),
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 11.0,
    }
}

/// Sun cube mesh, centered
pub fn sun_mesh() -> Mesh {
    Mesh {
        vertices: cube_vertices(SUN_SIDE_LENGTH),
        triangles: CUBE_TRIANGLES.to_vec(),
    }
    .centered()
}

/// Debug marker material
pub fn dot_material() -> Material {
    Material {
        ambient: [1.0; 3],
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 11.0,
    }
}

/// Small cube used to visualize ship collision points in freecam
pub fn dot_mesh() -> Mesh {
    Mesh {
        vertices: cube_vertices(0.1),
        triangles: CUBE_TRIANGLES.to_vec(),
    }
    .centered()
}

/// Ship hull material
pub fn ship_material() -> Material {
    Material {
        ambient: [0.125; 3],
        diffuse: [0.325; 3],
        specular: [0.45; 3],
        shine: 31.0,
    }
}

/// Ship hull mesh, centered
///
/// The hull vertices double as the ship's collision sample points, and
/// vertex 1 (the nose) is the missile nozzle.
pub fn ship_mesh() -> Mesh {
    Mesh {
        vertices: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.3, 0.6, 0.0),
            Vec3::new(0.6, 0.0, 0.0),
            Vec3::new(0.3, 0.15, 0.08),
            Vec3::new(0.3, 0.15, -0.08),
        ],
        triangles: vec![
            [0, 1, 3],
            [0, 1, 4],
            [0, 3, 4],
            [2, 1, 3],
            [2, 1, 4],
            [2, 3, 4],
        ],
    }
    .centered()
}

/// Index of the nozzle vertex within [`ship_mesh`]
pub const SHIP_NOZZLE_VERTEX: usize = 1;

/// Exhaust flame material
pub fn ship_flame_material() -> Material {
    Material {
        ambient: rgb(226, 88, 34),
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 17.0,
    }
}

/// Exhaust flame mesh; positioned relative to the hull, so not centered
pub fn ship_flame_mesh() -> Mesh {
    Mesh {
        vertices: vec![
            Vec3::new(5.0 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0 / 128.0),
            Vec3::new(-5.0 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -5.0 / 128.0),
            Vec3::new(0.0, -0.4, 0.0),
        ],
        triangles: vec![
            [0, 1, 2],
            [2, 3, 0],
            [0, 1, 4],
            [1, 2, 4],
            [2, 3, 4],
            [3, 0, 4],
        ],
    }
}

/// Inner flame accent material
pub fn ship_flame_accent_material() -> Material {
    Material {
        ambient: rgb(255, 247, 110),
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 17.0,
    }
}

/// Inner flame accent mesh; shares the flame's transform
pub fn ship_flame_accent_mesh() -> Mesh {
    Mesh {
        vertices: vec![
            Vec3::new(4.5 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 6.0 / 128.0),
            Vec3::new(-4.5 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -6.0 / 128.0),
            Vec3::new(0.0, -0.36, 0.0),
        ],
        triangles: vec![
            [0, 1, 2],
            [2, 3, 0],
            [0, 1, 4],
            [1, 2, 4],
            [2, 3, 4],
            [3, 0, 4],
        ],
    }
}

/// Aiming reticle material
pub fn ship_reticle_material() -> Material {
    Material {
        ambient: [1.0; 3],
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 11.0,
    }
}

/// Aiming reticle: a small cube floating ahead of the hull
pub fn ship_reticle_mesh() -> Mesh {
    const S: f32 = 0.1;
    const DIST: f32 = 5.0;
    Mesh {
        vertices: vec![
            Vec3::new(-S / 2.0, -S / 2.0 + DIST, -S / 2.0),
            Vec3::new(S / 2.0, -S / 2.0 + DIST, -S / 2.0),
            Vec3::new(S / 2.0, -S / 2.0 + DIST, S / 2.0),
            Vec3::new(-S / 2.0, -S / 2.0 + DIST, S / 2.0),
            Vec3::new(-S / 2.0, S / 2.0 + DIST, -S / 2.0),
            Vec3::new(S / 2.0, S / 2.0 + DIST, -S / 2.0),
            Vec3::new(S / 2.0, S / 2.0 + DIST, S / 2.0),
            Vec3::new(-S / 2.0, S / 2.0 + DIST, S / 2.0),
        ],
        triangles: CUBE_TRIANGLES.to_vec(),
    }
}

/// Missile material
pub fn missile_material() -> Material {
    Material {
        ambient: [1.0, 0.2, 0.2],
        diffuse: [0.0; 3],
        specular: [0.0; 3],
        shine: 11.0,
    }
}

/// Missile mesh: a thin centered prism
pub fn missile_mesh() -> Mesh {
    Mesh {
        vertices: vec![
            Vec3::new(1.0 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0 / 32.0),
            Vec3::new(-1.0 / 32.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0 / 32.0),
            Vec3::new(1.0 / 32.0, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 1.0 / 32.0),
            Vec3::new(-1.0 / 32.0, 0.5, 0.0),
            Vec3::new(0.0, 0.5, -1.0 / 32.0),
        ],
        triangles: CUBE_TRIANGLES.to_vec(),
    }
    .centered()
}

/// Fresh asteroid material at full health
pub fn asteroid_material() -> Material {
    Material {
        ambient: [
            ASTEROID_COLOR[0] * ASTEROID_AMBIENT_SCALAR,
            ASTEROID_COLOR[1] * ASTEROID_AMBIENT_SCALAR,
            ASTEROID_COLOR[2] * ASTEROID_AMBIENT_SCALAR,
        ],
        diffuse: ASTEROID_COLOR,
        specular: [0.0; 3],
        shine: 11.0,
    }
}

/// Procedurally jittered asteroid mesh
///
/// Starts from a cube sized so its circumradius matches `radius`, displaces
/// each vertex by a random offset, and recenters. Returns the measured mean
/// vertex radius (used as the collision radius) alongside the mesh.
pub fn random_asteroid<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> (f32, Mesh) {
    let side = radius * (2.0 / 3.0_f32.sqrt());
    let vertices = cube_vertices(side)
        .into_iter()
        .map(|v| {
            let jitter = randf(rng, 0.0, side / 2.0);
            v + random_vector(rng, jitter)
        })
        .collect();

    let mesh = Mesh {
        vertices,
        triangles: CUBE_TRIANGLES.to_vec(),
    }
    .centered();

    let mean_radius = mesh.mean_radius();
    (mean_radius, mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_asteroid_radius_near_request() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let (measured, mesh) = random_asteroid(&mut rng, 1.6);
            assert_eq!(mesh.vertices.len(), 8);
            // Jitter moves vertices at most side/2 from the cube corners.
            assert!(measured > 0.5 && measured < 3.5, "radius {measured}");
        }
    }

    #[test]
    fn test_ship_mesh_is_centered() {
        let mesh = ship_mesh();
        let mut centroid = Vec3::zeros();
        for v in &mesh.vertices {
            centroid += v;
        }
        assert!(centroid.norm() < 1e-6);
    }
}
