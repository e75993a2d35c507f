/// Camera — per-frame camera description fed to `Clusterer::prepare`.
///
/// A passive container: the caller owns and drives it. The only derived
/// value it keeps is the view matrix, which is always the inverse of the
/// camera-to-world transform.

use glam::Mat4;

/// Camera state for one frame: placement plus a perspective projection.
///
/// The projection must be a right-handed, zero-to-one depth perspective
/// matrix (as built by `Mat4::perspective_rh`) whose clip planes match
/// `near` and `far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    camera_transform: Mat4,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera from its world transform and projection.
    pub fn new(camera_transform: Mat4, projection: Mat4, near: f32, far: f32) -> Self {
        debug_assert!(near > 0.0 && near < far, "invalid near/far: {} {}", near, far);
        Self {
            camera_transform,
            view_matrix: camera_transform.inverse(),
            projection_matrix: projection,
            near,
            far,
        }
    }

    /// Create a camera with a symmetric perspective projection.
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn perspective(camera_transform: Mat4, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::new(camera_transform, Mat4::perspective_rh(fov_y, aspect_ratio, near, far), near, far)
    }

    // ===== GETTERS =====

    /// Camera-to-world transform.
    pub fn camera_transform(&self) -> &Mat4 {
        &self.camera_transform
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    // ===== SETTERS =====

    /// Move the camera. The projection is left untouched.
    pub fn set_transform(&mut self, camera_transform: Mat4) {
        self.camera_transform = camera_transform;
        self.view_matrix = camera_transform.inverse();
    }

    /// Replace the projection together with the clip distances it was built with.
    pub fn set_projection(&mut self, projection: Mat4, near: f32, far: f32) {
        debug_assert!(near > 0.0 && near < far, "invalid near/far: {} {}", near, far);
        self.projection_matrix = projection;
        self.near = near;
        self.far = far;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
