//! Camera subsystem
//!
//! Two camera kinds: the ship chase camera (built fresh each tick from the
//! ship, with a smoothed eye) and the free-fly camera used by the menu and
//! freecam modes.

use crate::config::{FreecamConfig, ShipConfig, WorldConfig};
use crate::entities::Ship;
use crate::foundation::math::{deg_to_rad, look_at, perspective, Mat4, Rotation3, Unit, Vec3};

/// Eye position plus view/projection matrices, consumed by the renderer
#[derive(Debug, Clone)]
pub struct CameraView {
    /// World-space eye position
    pub eye: Vec3,
    /// View (world-to-camera) matrix
    pub view: Mat4,
    /// Perspective projection matrix
    pub projection: Mat4,
}

/// Build the chase camera for the current tick
///
/// The eye trails the ship: the ideal eye sits behind and above the hull,
/// and the effective eye lerps from last tick's toward it by the chase
/// factor. FOV widens quadratically with throttle.
pub fn chase_camera(
    ship: &Ship,
    last_eye: Vec3,
    aspect: f32,
    ship_cfg: &ShipConfig,
    world_cfg: &WorldConfig,
) -> CameraView {
    let throttle = ship.throttle.current();
    let fov = ship_cfg.fov_degrees.interpolate(throttle * throttle);
    let eye = last_eye.lerp(&ship.eye(), ship_cfg.camera_chase_factor);

    CameraView {
        eye,
        view: look_at(eye, eye + ship.forward, ship.up),
        projection: perspective(
            deg_to_rad(fov),
            aspect,
            world_cfg.near_bound,
            world_cfg.view_distance,
        ),
    }
}

/// Construction parameters for [`FreeCamera`]
#[derive(Debug, Clone)]
pub struct FreeCameraParams {
    /// Starting eye position
    pub eye: Vec3,
    /// Initial forward direction
    pub look_at: Vec3,
    /// Initial up direction
    pub look_up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Movement speed, units per tick
    pub move_speed: f32,
}

/// Free-fly inspection camera
///
/// Owns a movable orthonormal basis; rotation is applied to all three basis
/// vectors and the view matrix is recomputed after every change. No
/// smoothing.
#[derive(Debug, Clone)]
pub struct FreeCamera {
    /// Eye position
    pub eye: Vec3,
    /// Forward basis vector
    pub forward: Vec3,
    /// Up basis vector
    pub up: Vec3,
    /// Right basis vector
    pub right: Vec3,
    /// Movement speed, units per tick; adjustable at runtime
    pub move_speed: f32,
    view: Mat4,
    projection: Mat4,
}

impl FreeCamera {
    /// Create a camera from explicit parameters
    pub fn new(params: &FreeCameraParams) -> Self {
        let mut camera = Self {
            eye: params.eye,
            forward: params.look_at,
            up: params.look_up,
            right: params.look_at.cross(&params.look_up),
            move_speed: params.move_speed,
            view: Mat4::identity(),
            projection: perspective(
                deg_to_rad(params.fov_degrees),
                params.aspect,
                params.near,
                params.far,
            ),
        };
        camera.refresh_view();
        camera
    }

    /// Default free camera for a mode, using the given tuning
    pub fn for_freecam(cfg: &FreecamConfig, fov_degrees: f32, aspect: f32) -> Self {
        Self::new(&FreeCameraParams {
            eye: Vec3::new(0.0, 0.0, -5.0),
            look_at: Vec3::new(0.0, 0.0, 1.0),
            look_up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees,
            aspect,
            near: cfg.near_bound,
            far: cfg.far_bound,
            move_speed: cfg.default_move_speed,
        })
    }

    /// Current camera view for rendering
    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.eye,
            view: self.view,
            projection: self.projection,
        }
    }

    fn refresh_view(&mut self) {
        self.view = look_at(self.eye, self.eye + self.forward, self.up);
    }

    /// Translate the eye along a direction
    pub fn move_along(&mut self, direction: Vec3, distance: f32) {
        self.eye += direction * distance;
        self.refresh_view();
    }

    /// Pitch the basis up by the given angle
    pub fn pitch_up(&mut self, rads: f32) {
        self.rotate_basis(self.right, rads);
    }

    /// Yaw the basis left by the given angle
    pub fn yaw_left(&mut self, rads: f32) {
        self.rotate_basis(self.up, rads);
    }

    /// Roll the basis right by the given angle
    pub fn roll_right(&mut self, rads: f32) {
        self.rotate_basis(self.forward, rads);
    }

    fn rotate_basis(&mut self, axis: Vec3, rads: f32) {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(axis), rads);
        self.forward = rotation * self.forward;
        self.up = rotation * self.up;
        self.right = rotation * self.right;
        self.refresh_view();
    }

    /// Adopt the ship camera's pose so entering freecam doesn't jump
    pub fn sync(&mut self, ship: &Ship, view: &CameraView) {
        self.forward = ship.forward;
        self.up = ship.up;
        self.right = ship.right;
        self.eye = view.eye;
        self.view = view.view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> FreeCamera {
        FreeCamera::new(&FreeCameraParams {
            eye: Vec3::zeros(),
            look_at: Vec3::new(0.0, 0.0, 1.0),
            look_up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 80.0,
            aspect: 16.0 / 9.0,
            near: 1.0 / 32.0,
            far: 64.0,
            move_speed: 0.04,
        })
    }

    #[test]
    fn test_basis_stays_orthonormal_under_rotation() {
        let mut camera = test_camera();
        for i in 0..200 {
            camera.pitch_up(0.01 * (i % 7) as f32);
            camera.yaw_left(-0.02);
            camera.roll_right(0.005);
        }
        assert_relative_eq!(camera.forward.norm(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(camera.up.norm(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(camera.right.norm(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(camera.forward.dot(&camera.up), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.forward.dot(&camera.right), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_move_along_translates_eye() {
        let mut camera = test_camera();
        camera.move_along(Vec3::new(0.0, 0.0, 1.0), 2.5);
        assert_relative_eq!(camera.eye, Vec3::new(0.0, 0.0, 2.5));
    }
}
