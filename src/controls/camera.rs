//! Cameras the orbit controller can drive.
//!
//! The controller never inspects concrete camera types. It asks the camera
//! for its [`Projection`] and reads or writes the zoom factor through the
//! [`OrbitCamera`] trait, so any host-side camera can be plugged in.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Projection capability reported by a driven camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees.
    Perspective { fov_y_degrees: f32 },
    /// Frustum bounds before the zoom factor is applied.
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    },
    /// Neither of the above; pan and dolly get disabled on first use.
    Unknown,
}

/// Capabilities the orbit controller needs from the object it moves.
pub trait OrbitCamera {
    /// Orbit axis. Read once when the controller is built.
    fn up(&self) -> Vec3;

    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// World-space orientation.
    fn rotation(&self) -> Quat;

    /// Orient the camera so that its -Z axis points at `target`.
    fn look_at(&mut self, target: Vec3);

    fn projection(&self) -> Projection {
        Projection::Unknown
    }

    fn zoom(&self) -> f32 {
        1.0
    }

    fn set_zoom(&mut self, _zoom: f32) {}

    /// Recompute cached projection data after zoom or frustum edits.
    fn update_projection(&mut self) {}
}

/// Rotation whose -Z axis looks from `eye` towards `target` with `up` kept vertical.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = eye - target;
    if z.length_squared() == 0.0 {
        // eye and target coincide
        z = Vec3::Z;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        // up and z are parallel
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Perspective camera. `zoom` narrows the field of view instead of moving the camera.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub rotation: Quat,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    projection_matrix: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
            fov,
            aspect,
            near,
            far,
            zoom: 1.0,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        let half = (self.fov.to_radians() * 0.5).tan() / self.zoom;
        let fov_y = 2.0 * half.atan();
        self.projection_matrix = Mat4::perspective_rh(fov_y, self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

impl OrbitCamera for PerspectiveCamera {
    fn up(&self) -> Vec3 {
        self.up
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn look_at(&mut self, target: Vec3) {
        self.rotation = look_rotation(self.position, target, self.up);
    }

    fn projection(&self) -> Projection {
        Projection::Perspective {
            fov_y_degrees: self.fov,
        }
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn update_projection(&mut self) {
        self.update_projection_matrix();
    }
}

/// Orthographic camera; zoom shrinks the frustum around its centre.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub rotation: Quat,
    pub up: Vec3,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    projection_matrix: Mat4,
}

impl OrthographicCamera {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
            left,
            right,
            top,
            bottom,
            near,
            far,
            zoom: 1.0,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn update_projection_matrix(&mut self) {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        self.projection_matrix =
            Mat4::orthographic_rh(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

impl OrbitCamera for OrthographicCamera {
    fn up(&self) -> Vec3 {
        self.up
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn look_at(&mut self, target: Vec3) {
        self.rotation = look_rotation(self.position, target, self.up);
    }

    fn projection(&self) -> Projection {
        Projection::Orthographic {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn update_projection(&mut self) {
        self.update_projection_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_points_minus_z_at_target() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, 2.0);
        let q = look_rotation(eye, target, Vec3::Y);
        let forward = q * Vec3::NEG_Z;
        let expected = (target - eye).normalize();
        assert!((forward - expected).length() < 1e-5);
    }

    #[test]
    fn look_rotation_handles_up_parallel_to_view() {
        let q = look_rotation(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(q.is_finite());
        assert!((q.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_narrows_perspective_projection() {
        let mut cam = PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0);
        let wide = cam.projection_matrix();
        cam.set_zoom(2.0);
        cam.update_projection();
        let narrow = cam.projection_matrix();
        // a larger focal term means a narrower fov
        assert!(narrow.y_axis.y > wide.y_axis.y);
    }

    #[test]
    fn projections_report_their_kind() {
        let persp = PerspectiveCamera::new(45.0, 1.0, 0.1, 10.0);
        let ortho = OrthographicCamera::new(-1.0, 1.0, 1.0, -1.0, 0.1, 10.0);
        assert_eq!(
            persp.projection(),
            Projection::Perspective { fov_y_degrees: 45.0 }
        );
        assert!(matches!(ortho.projection(), Projection::Orthographic { .. }));
    }
}
