//! Collision module — the bounding shapes the clusterer bins.
//!
//! Every shape answers the same plane query, which is all the recursive
//! binning needs. Spheres additionally get an exact sphere/box path.

mod aabb;
mod frustum;
mod perspective_frustum;
mod plane;
mod sphere;

use glam::Mat4;

pub use aabb::AABB;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use perspective_frustum::{
    PerspectiveFrustum,
    FRUSTUM_PLANE_NEAR, FRUSTUM_PLANE_FAR, FRUSTUM_PLANE_LEFT,
    FRUSTUM_PLANE_RIGHT, FRUSTUM_PLANE_TOP, FRUSTUM_PLANE_BOTTOM,
};
pub use plane::Plane;
pub use sphere::Sphere;

/// A convex bounding volume.
///
/// `Send + Sync` so that shapes can be binned from worker threads.
pub trait CollisionShape: Send + Sync {
    /// Classify the shape against a plane.
    ///
    /// Returns 0 when the shape straddles the plane, otherwise the signed
    /// distance of the shape's closest point (positive in front, negative
    /// behind).
    fn test_plane(&self, plane: &Plane) -> f32;

    /// Axis-aligned bounds of the shape.
    fn compute_aabb(&self) -> AABB;

    /// Downcast used to pick the exact sphere binning path.
    fn as_sphere(&self) -> Option<&Sphere> {
        None
    }

    /// The same shape transformed by a rigid matrix.
    fn transformed(&self, matrix: &Mat4) -> Self
    where
        Self: Sized;
}
