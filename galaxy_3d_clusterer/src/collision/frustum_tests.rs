use glam::{Mat4, Vec3};
use crate::collision::AABB;
use super::*;

fn perspective_vp() -> Mat4 {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    projection * view
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_planes_are_normalized() {
    let frustum = Frustum::from_view_projection(&perspective_vp());

    for plane in &frustum.planes {
        assert!((plane.normal.length() - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_near_far_distances() {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);

    // Camera at the origin looking down -Z
    let near = frustum.near_plane();
    assert!((near.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    assert!((near.offset - 0.1).abs() < 1e-4);

    let far = frustum.far_plane();
    assert!((far.normal - Vec3::Z).length() < 1e-4);
    assert!((far.offset + 100.0).abs() < 0.1);
}

#[test]
fn test_frustum_planes_face_inward() {
    let frustum = Frustum::from_view_projection(&perspective_vp());

    // The look-at target is well inside the frustum
    for plane in &frustum.planes {
        assert!(plane.test(Vec3::ZERO) > 0.0);
    }
}

// ============================================================================
// Frustum::intersects_aabb
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = Frustum::from_view_projection(&perspective_vp());
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));

    assert!(frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_outside_frustum() {
    let frustum = Frustum::from_view_projection(&perspective_vp());
    let aabb = AABB::new(Vec3::splat(100.0), Vec3::splat(101.0));

    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_behind_camera() {
    let frustum = Frustum::from_view_projection(&perspective_vp());
    let aabb = AABB::new(Vec3::new(-1.0, -1.0, 10.0), Vec3::new(1.0, 1.0, 12.0));

    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_straddling_near_plane() {
    let frustum = Frustum::from_view_projection(&perspective_vp());
    // Camera at z = 5, box spans the camera position
    let aabb = AABB::new(Vec3::new(-0.5, -0.5, 4.0), Vec3::new(0.5, 0.5, 6.0));

    assert!(frustum.intersects_aabb(&aabb));
}
