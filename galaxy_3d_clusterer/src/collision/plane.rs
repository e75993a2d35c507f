/// Plane — unit normal plus signed offset.
///
/// A point P lies on the plane when `dot(normal, P) == offset`.
/// `test(P)` returns the signed distance: positive on the side the
/// normal points to, negative behind.

use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`
    pub offset: f32,
}

impl Plane {
    /// Plane with a zero normal. Used to pre-fill plane arrays.
    pub const ZERO: Plane = Plane { normal: Vec3::ZERO, offset: 0.0 };

    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Build from the (A, B, C, D) form where `Ax + By + Cz + D >= 0`
    /// is the positive half-space. The normal is normalized.
    pub fn from_vec4(abcd: Vec4) -> Self {
        let normal = abcd.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self { normal: normal / len, offset: -abcd.w / len }
        } else {
            Self { normal, offset: -abcd.w }
        }
    }

    /// Signed distance from `point` to the plane.
    #[inline]
    pub fn test(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// Transform the plane by a rigid (optionally uniformly scaled) matrix.
    pub fn transformed(&self, matrix: &Mat4) -> Plane {
        let rotated = matrix.transform_vector3(self.normal);
        let scale = rotated.length();
        let normal = if scale > 0.0 { rotated / scale } else { rotated };
        let translation = matrix.col(3).truncate();

        Plane {
            normal,
            offset: self.offset * scale + normal.dot(translation),
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::ZERO
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
