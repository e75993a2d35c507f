/// Sphere — point light and probe influence volume.

use glam::{Mat4, Vec3};
use super::aabb::AABB;
use super::plane::Plane;
use super::CollisionShape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Exact sphere/box overlap: distance from the center to the
    /// closest point of the box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        let closest = aabb.closest_point(self.center);
        self.center.distance_squared(closest) <= self.radius * self.radius
    }
}

impl CollisionShape for Sphere {
    fn test_plane(&self, plane: &Plane) -> f32 {
        let dist = plane.test(self.center);

        if dist > self.radius {
            dist - self.radius
        } else if -dist > self.radius {
            dist + self.radius
        } else {
            0.0
        }
    }

    fn compute_aabb(&self) -> AABB {
        let r = Vec3::splat(self.radius);
        AABB { min: self.center - r, max: self.center + r }
    }

    fn as_sphere(&self) -> Option<&Sphere> {
        Some(self)
    }

    /// Radius is scaled by the largest axis scale so the result stays
    /// conservative under non-uniform scale.
    fn transformed(&self, matrix: &Mat4) -> Self {
        let scale = matrix
            .col(0)
            .truncate()
            .length()
            .max(matrix.col(1).truncate().length())
            .max(matrix.col(2).truncate().length());

        Sphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }
}

#[cfg(test)]
#[path = "sphere_tests.rs"]
mod tests;
