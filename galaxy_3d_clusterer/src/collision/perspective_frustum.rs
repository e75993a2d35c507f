/// PerspectiveFrustum — pyramid volume of a spot light or a secondary camera.
///
/// Defined in its local space (apex at the origin, looking down -Z) by two
/// field-of-view angles and a near/far range, then placed in the world with
/// a rigid transform. World-space planes and hull points are cached.

use glam::{Mat4, Vec3};
use super::aabb::AABB;
use super::plane::Plane;
use super::CollisionShape;

/// Plane indices of `PerspectiveFrustum::planes_world`
pub const FRUSTUM_PLANE_NEAR: usize = 0;
pub const FRUSTUM_PLANE_FAR: usize = 1;
pub const FRUSTUM_PLANE_LEFT: usize = 2;
pub const FRUSTUM_PLANE_RIGHT: usize = 3;
pub const FRUSTUM_PLANE_TOP: usize = 4;
pub const FRUSTUM_PLANE_BOTTOM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveFrustum {
    fov_x: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    transform: Mat4,
    /// near, far, left, right, top, bottom; all facing inward
    planes_world: [Plane; 6],
    /// Apex followed by the four far corners
    points_world: [Vec3; 5],
}

impl PerspectiveFrustum {
    pub fn new(fov_x: f32, fov_y: f32, near: f32, far: f32, transform: Mat4) -> Self {
        debug_assert!(fov_x > 0.0 && fov_y > 0.0, "invalid field of view");
        debug_assert!(near > 0.0 && near < far, "invalid near/far: {} {}", near, far);

        let mut frustum = Self {
            fov_x,
            fov_y,
            near,
            far,
            transform,
            planes_world: [Plane::ZERO; 6],
            points_world: [Vec3::ZERO; 5],
        };
        frustum.update();
        frustum
    }

    fn update(&mut self) {
        let (sx, cx) = (self.fov_x * 0.5).sin_cos();
        let (sy, cy) = (self.fov_y * 0.5).sin_cos();

        let local_planes = [
            Plane::new(Vec3::new(0.0, 0.0, -1.0), self.near),
            Plane::new(Vec3::new(0.0, 0.0, 1.0), -self.far),
            Plane::new(Vec3::new(cx, 0.0, -sx), 0.0),
            Plane::new(Vec3::new(-cx, 0.0, -sx), 0.0),
            Plane::new(Vec3::new(0.0, -cy, -sy), 0.0),
            Plane::new(Vec3::new(0.0, cy, -sy), 0.0),
        ];
        for (world, local) in self.planes_world.iter_mut().zip(&local_planes) {
            *world = local.transformed(&self.transform);
        }

        let x = self.far * (self.fov_x * 0.5).tan();
        let y = self.far * (self.fov_y * 0.5).tan();
        let local_points = [
            Vec3::ZERO,
            Vec3::new(x, y, -self.far),
            Vec3::new(-x, y, -self.far),
            Vec3::new(-x, -y, -self.far),
            Vec3::new(x, -y, -self.far),
        ];
        for (world, local) in self.points_world.iter_mut().zip(&local_points) {
            *world = self.transform.transform_point3(*local);
        }
    }

    pub fn fov_x(&self) -> f32 {
        self.fov_x
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn planes_world(&self) -> &[Plane; 6] {
        &self.planes_world
    }

    pub fn points_world(&self) -> &[Vec3; 5] {
        &self.points_world
    }
}

impl CollisionShape for PerspectiveFrustum {
    /// Tested as the convex hull of the apex and the far corners.
    fn test_plane(&self, plane: &Plane) -> f32 {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for point in &self.points_world {
            let d = plane.test(*point);
            min = min.min(d);
            max = max.max(d);
        }

        if min > 0.0 {
            min
        } else if max < 0.0 {
            max
        } else {
            0.0
        }
    }

    fn compute_aabb(&self) -> AABB {
        let mut aabb = AABB { min: Vec3::splat(f32::MAX), max: Vec3::splat(f32::MIN) };
        for point in &self.points_world {
            aabb.min = aabb.min.min(*point);
            aabb.max = aabb.max.max(*point);
        }
        aabb
    }

    fn transformed(&self, matrix: &Mat4) -> Self {
        PerspectiveFrustum::new(self.fov_x, self.fov_y, self.near, self.far, *matrix * self.transform)
    }
}

#[cfg(test)]
#[path = "perspective_frustum_tests.rs"]
mod tests;
