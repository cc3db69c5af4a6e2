//! Fixed camera with puppet-level translation and orientation.
//!
//! The camera itself never moves: the accumulated translation and
//! trackball orientation are composed into the view so the whole
//! puppet translates and tumbles while lighting stays put.

use glam::{Mat4, Vec3};

pub struct SceneCamera {
    /// Vertical field of view (radians)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl SceneCamera {
    pub fn new() -> Self {
        Self {
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    /// View matrix (world -> camera): puppet translation, then
    /// orientation, then a fixed look down -Z from the origin.
    pub fn view_matrix(&self, translation: Mat4, orientation: Mat4) -> Mat4 {
        translation * orientation * Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, self.near, self.far)
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pose_view_is_identity() {
        let cam = SceneCamera::new();
        let view = cam.view_matrix(Mat4::IDENTITY, Mat4::IDENTITY);
        assert!(view.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_translation_moves_view() {
        let cam = SceneCamera::new();
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let view = cam.view_matrix(t, Mat4::IDENTITY);
        let p = view.transform_point3(Vec3::new(0.0, 0.0, -5.0));
        assert!((p.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_maps_near_plane() {
        let cam = SceneCamera::new();
        let proj = cam.projection_matrix(4.0 / 3.0);
        // A point on the near plane lands at clip z = -1 (GL convention).
        let p = proj.project_point3(Vec3::new(0.0, 0.0, -cam.near));
        assert!((p.z - (-1.0)).abs() < 1e-4);
    }
}
