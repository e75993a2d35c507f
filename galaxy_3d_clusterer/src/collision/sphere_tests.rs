use glam::{Mat4, Quat, Vec3};
use crate::collision::{AABB, CollisionShape, Plane};
use super::*;

#[test]
fn test_sphere_test_plane_sides() {
    let sphere = Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0);

    let below = Plane::new(Vec3::Y, 2.0);
    assert!((sphere.test_plane(&below) - 2.0).abs() < 1e-6);

    let above = Plane::new(Vec3::Y, 10.0);
    assert!((sphere.test_plane(&above) + 4.0).abs() < 1e-6);

    let through = Plane::new(Vec3::Y, 5.5);
    assert_eq!(sphere.test_plane(&through), 0.0);
}

#[test]
fn test_sphere_compute_aabb() {
    let aabb = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5).compute_aabb();
    assert_eq!(aabb.min, Vec3::new(0.5, 1.5, 2.5));
    assert_eq!(aabb.max, Vec3::new(1.5, 2.5, 3.5));
}

#[test]
fn test_sphere_intersects_aabb() {
    let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);

    assert!(Sphere::new(Vec3::new(0.5, 0.5, 0.5), 0.1).intersects_aabb(&aabb));
    assert!(Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.6).intersects_aabb(&aabb));
    assert!(!Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.4).intersects_aabb(&aabb));
    // Near the corner: inside the box's AABB-expanded region but outside the rounded corner
    assert!(!Sphere::new(Vec3::new(1.5, 1.5, 1.5), 0.8).intersects_aabb(&aabb));
}

#[test]
fn test_sphere_contains_point() {
    let sphere = Sphere::new(Vec3::ZERO, 2.0);
    assert!(sphere.contains_point(Vec3::new(0.0, 2.0, 0.0)));
    assert!(!sphere.contains_point(Vec3::new(2.0, 2.0, 0.0)));
}

#[test]
fn test_sphere_transformed() {
    let sphere = Sphere::new(Vec3::X, 1.0);
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::splat(2.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::new(0.0, 0.0, 10.0),
    );
    let moved = sphere.transformed(&matrix);

    assert!((moved.center - Vec3::new(0.0, 2.0, 10.0)).length() < 1e-5);
    assert!((moved.radius - 2.0).abs() < 1e-5);
    assert!(moved.as_sphere().is_some());
}
