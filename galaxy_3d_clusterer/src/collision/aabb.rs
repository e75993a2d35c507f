/// Axis-Aligned Bounding Box.
///
/// Used both as a collision shape (decals, probes, fog volumes) and as
/// the per-cluster conservative cell volume of the clusterer.

use glam::{Mat4, Vec3};
use super::plane::Plane;
use super::CollisionShape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Degenerate box at the origin. Used to pre-fill box arrays.
    pub const ZERO: AABB = AABB { min: Vec3::ZERO, max: Vec3::ZERO };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all(), "AABB min {:?} > max {:?}", min, max);
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether the box encloses a non-zero volume.
    pub fn has_volume(&self) -> bool {
        self.max.cmpgt(self.min).all()
    }

    /// The 8 corners, in the order min, then the remaining corners
    /// walking the (x, y, z) bit pattern.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB intersects (overlaps) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Closest point of the box to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

impl Default for AABB {
    fn default() -> Self {
        AABB::ZERO
    }
}

impl CollisionShape for AABB {
    /// Positive/negative vertex test: the corner most aligned with the
    /// normal gives the maximum distance, the opposite corner the minimum.
    fn test_plane(&self, plane: &Plane) -> f32 {
        let n = plane.normal;
        let p_vertex = Vec3::new(
            if n.x >= 0.0 { self.max.x } else { self.min.x },
            if n.y >= 0.0 { self.max.y } else { self.min.y },
            if n.z >= 0.0 { self.max.z } else { self.min.z },
        );
        let n_vertex = Vec3::new(
            if n.x >= 0.0 { self.min.x } else { self.max.x },
            if n.y >= 0.0 { self.min.y } else { self.max.y },
            if n.z >= 0.0 { self.min.z } else { self.max.z },
        );

        let dmin = plane.test(n_vertex);
        if dmin > 0.0 {
            return dmin;
        }

        let dmax = plane.test(p_vertex);
        if dmax < 0.0 {
            return dmax;
        }

        0.0
    }

    fn compute_aabb(&self) -> AABB {
        *self
    }

    fn transformed(&self, matrix: &Mat4) -> Self {
        AABB::transformed(self, matrix)
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
