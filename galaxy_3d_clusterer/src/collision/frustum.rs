/// Frustum — six clipping planes extracted from a view-projection matrix.
///
/// Planes face inward: a point P is inside when `plane.test(P) >= 0`
/// for all six planes. The clip volume is the zero-to-one depth range
/// produced by `Mat4::perspective_rh` (Vulkan/D3D convention).

use glam::{Mat4, Vec4};
use super::aabb::AABB;
use super::plane::Plane;
use super::CollisionShape;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann: each plane is a sum/difference of matrix rows.
    /// Depth is clipped to `0 <= z <= w`, so the near plane is row 2 alone.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let planes: [Vec4; 6] = [
            row3 + row0, // Left
            row3 - row0, // Right
            row3 + row1, // Bottom
            row3 - row1, // Top
            row2,        // Near
            row3 - row2, // Far
        ];

        Self { planes: planes.map(Plane::from_vec4) }
    }

    pub fn near_plane(&self) -> &Plane {
        &self.planes[PLANE_NEAR]
    }

    pub fn far_plane(&self) -> &Plane {
        &self.planes[PLANE_FAR]
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Conservative: may return false positives, never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| aabb.test_plane(plane) >= 0.0)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
