use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

pub const FOV_DEGREES: f32 = 80.0;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 30.0;

/// Perspective camera with an orientation fixed by the last `look_at`
///
/// Moving `position` afterwards translates the camera without re-aiming it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub orientation: Quat,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// The ghost-scene camera: off to +X, looking back along -X
    pub fn ghost_view(aspect: f32) -> Self {
        let mut camera = Self::new(FOV_DEGREES, aspect, NEAR_PLANE, FAR_PLANE);
        camera.position = Vec3::new(4.12, 1.0, 0.0);
        camera.look_at(Vec3::new(-10.0, 0.0, 0.0));
        camera
    }

    /// Aims the camera at `target` with +Y up
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let view = Mat4::look_to_rh(self.position, forward, Vec3::Y);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.orientation = rotation;
    }

    /// Updates the aspect ratio from a viewport size; zero sizes are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * -Vec3::Z
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    /// Right-handed projection with depth in [0, 1]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a normalized device coordinate
    ///
    /// Returns `(origin, unit direction)`; +Y in `ndc` is up.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inverse = self.view_projection().inverse();
        let unproject = |z: f32| {
            let p = inverse * glam::Vec4::new(ndc.x, ndc.y, z, 1.0);
            p.xyz() / p.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        let direction = (far - near).try_normalize().unwrap_or(self.forward());
        (self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_view_looks_down_negative_x() {
        let camera = PerspectiveCamera::ghost_view(1.0);
        let expected = (Vec3::new(-10.0, 0.0, 0.0) - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-4);
        assert!(camera.up().y > 0.9);
    }

    #[test]
    fn test_moving_position_keeps_orientation() {
        let mut camera = PerspectiveCamera::ghost_view(1.0);
        let forward = camera.forward();
        camera.position.z = 0.5;
        assert!((camera.forward() - forward).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let camera = PerspectiveCamera::ghost_view(16.0 / 9.0);
        let (origin, dir) = camera.ray_through(Vec2::ZERO);
        assert_eq!(origin, camera.position);
        assert!((dir - camera.forward()).length() < 1e-3);
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = PerspectiveCamera::ghost_view(1.0);
        let ahead = camera.position + camera.forward() * 5.0;
        let clip = camera.view_projection() * ahead.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_set_viewport_ignores_zero() {
        let mut camera = PerspectiveCamera::ghost_view(2.0);
        camera.set_viewport(0, 600);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(300, 600);
        assert_eq!(camera.aspect, 0.5);
    }
}
