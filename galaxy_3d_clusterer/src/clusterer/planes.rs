/// Grid geometry derived from the projection alone.
///
/// Column and row planes radiate from the eye and cut the view volume
/// into wedges; cluster boxes are the conservative view-space AABBs of
/// those wedges sliced in depth. None of this depends on where the
/// camera is, only on the projection.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::collision::{AABB, Plane};
use super::z_split::ZSplit;

/// Unprojection parameters of a zero-to-one depth perspective matrix.
///
/// `(-1 / m00, -1 / m11, -m23, m22)` where `mCR` is column C, row R.
pub(crate) fn perspective_unprojection_params(proj: &Mat4) -> Vec4 {
    Vec4::new(
        -1.0 / proj.x_axis.x,
        -1.0 / proj.y_axis.y,
        -proj.w_axis.z,
        proj.z_axis.z,
    )
}

/// View-space position of the NDC point `ndc` at NDC depth `depth`.
#[inline]
pub(crate) fn unproject(depth: f32, ndc: Vec2, params: Vec4) -> Vec3 {
    let z = params.z / (params.w + depth);
    let xy = ndc * Vec2::new(params.x, params.y) * z;
    xy.extend(z)
}

/// View-space position of the NDC point `ndc` at view-space depth `z_view`.
#[inline]
pub(crate) fn unproject_z_view_space(z_view: f32, ndc: Vec2, params: Vec4) -> Vec3 {
    Vec3::new(ndc.x * params.x, ndc.y * params.y, 1.0) * z_view
}

/// NDC coordinate of the boundary after cell `i` on an axis of `count` cells.
#[inline]
pub(crate) fn boundary_ndc(i: u32, count: u32) -> f32 {
    i as f32 / count as f32 * 2.0 - 1.0
}

/// Column plane `i`, between columns `i` and `i + 1`. Faces +X.
pub(crate) fn compute_plane_x(i: u32, count_x: u32, params: Vec4) -> Plane {
    let x = boundary_ndc(i + 1, count_x);
    let a = unproject(1.0, Vec2::new(x, -1.0), params);
    let b = unproject(1.0, Vec2::new(x, 1.0), params);
    Plane::new(a.cross(b).normalize(), 0.0)
}

/// Row plane `i`, between rows `i` and `i + 1`. Faces +Y.
pub(crate) fn compute_plane_y(i: u32, count_y: u32, params: Vec4) -> Plane {
    let y = boundary_ndc(i + 1, count_y);
    let a = unproject(1.0, Vec2::new(-1.0, y), params);
    let b = unproject(1.0, Vec2::new(1.0, y), params);
    Plane::new(b.cross(a).normalize(), 0.0)
}

/// View-space bounds of cell `(x, y, z)`.
///
/// The wedge widens with depth, so each side takes the extreme of its
/// near and far slice values.
pub(crate) fn compute_cluster_box(x: u32, y: u32, z: u32, counts: [u32; 3], params: Vec4, split: &ZSplit) -> AABB {
    let z_max = -split.calc_near(z);
    let z_min = -split.calc_near(z + 1);

    let ndc_min = Vec2::new(boundary_ndc(x, counts[0]), boundary_ndc(y, counts[1]));
    let ndc_max = Vec2::new(boundary_ndc(x + 1, counts[0]), boundary_ndc(y + 1, counts[1]));

    let near_min = unproject_z_view_space(z_max, ndc_min, params);
    let near_max = unproject_z_view_space(z_max, ndc_max, params);
    let far_min = unproject_z_view_space(z_min, ndc_min, params);
    let far_max = unproject_z_view_space(z_min, ndc_max, params);

    let min = near_min.min(near_max).min(far_min).min(far_max);
    let max = near_min.max(near_max).max(far_min).max(far_max);

    AABB {
        min: Vec3::new(min.x, min.y, z_min),
        max: Vec3::new(max.x, max.y, z_max),
    }
}

#[cfg(test)]
#[path = "planes_tests.rs"]
mod tests;
