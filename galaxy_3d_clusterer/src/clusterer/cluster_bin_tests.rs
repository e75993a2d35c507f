use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::clusterer::ClustererConfig;
use crate::error::Error;
use super::*;

fn prepared(pool: &ThreadPool) -> Clusterer {
    let camera = Camera::perspective(Mat4::IDENTITY, std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let mut clusterer = Clusterer::new(ClustererConfig {
        cluster_count_x: 4,
        cluster_count_y: 4,
        cluster_count_z: 8,
    })
    .unwrap();
    clusterer.prepare(pool, &camera);
    clusterer
}

fn scene() -> Vec<BinObject> {
    vec![
        BinObject::point_light(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 3.0)),
        BinObject::decal(AABB::new(Vec3::new(-1.0, -1.0, -22.0), Vec3::new(1.0, 1.0, -18.0))),
        BinObject::point_light(Sphere::new(Vec3::new(5.0, 2.0, -40.0), 6.0)),
        // Behind the camera, culled
        BinObject::point_light(Sphere::new(Vec3::new(0.0, 0.0, 30.0), 2.0)),
        BinObject::spot_light(PerspectiveFrustum::new(0.5, 0.5, 0.1, 30.0, Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)))),
        BinObject::reflection_probe(AABB::new(Vec3::new(-10.0, -10.0, -60.0), Vec3::new(10.0, 10.0, -30.0))),
        BinObject::fog_volume(BinShape::Sphere(Sphere::new(Vec3::new(-3.0, -3.0, -15.0), 2.0))),
    ]
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_new_rejects_zero_limit() {
    assert!(matches!(ClusterBin::new(0), Err(Error::InvalidConfig(_))));
    assert_eq!(ClusterBin::new(16).unwrap().max_objects_per_cluster(), 16);
}

#[test]
fn test_kind_indices_follow_all() {
    for (i, kind) in BinObjectKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), i);
    }
}

// ============================================================================
// Binning
// ============================================================================

#[test]
fn test_lists_match_single_object_bins() {
    let pool = ThreadPool::new(3).unwrap();
    let clusterer = prepared(&pool);
    let objects = scene();

    let output = ClusterBin::new(64).unwrap().bin(&pool, &clusterer, &objects);
    assert_eq!(output.clusters.len(), clusterer.cluster_count() as usize);
    assert_eq!(output.dropped, 0);

    let mut result = clusterer.init_test_results();
    for (index, object) in objects.iter().enumerate() {
        match &object.shape {
            BinShape::Sphere(sphere) => clusterer.bin(sphere, &sphere.compute_aabb(), &mut result),
            BinShape::Aabb(aabb) => clusterer.bin(aabb, aabb, &mut result),
            BinShape::Frustum(frustum) => clusterer.bin_perspective_frustum(frustum, &frustum.compute_aabb(), &mut result),
        }

        for cluster in &result {
            let cluster_index = clusterer.cluster_index(cluster.x, cluster.y, cluster.z);
            assert!(output.objects(cluster_index, object.kind).contains(&(index as u32)));
        }

        let listed = (0..output.clusters.len())
            .filter(|&c| output.objects(c, object.kind).contains(&(index as u32)))
            .count();
        assert_eq!(listed, result.count(), "object {}", index);
    }
}

#[test]
fn test_culled_object_is_never_listed() {
    let pool = ThreadPool::new(2).unwrap();
    let clusterer = prepared(&pool);

    let output = ClusterBin::new(64).unwrap().bin(&pool, &clusterer, &scene());

    assert!(!output.indices.contains(&3));
}

#[test]
fn test_layout_is_contiguous_and_sorted() {
    let pool = ThreadPool::new(2).unwrap();
    let clusterer = prepared(&pool);

    let output = ClusterBin::new(64).unwrap().bin(&pool, &clusterer, &scene());

    let mut expected_offset = 0;
    for (c, entry) in output.clusters.iter().enumerate() {
        assert_eq!(entry.offset, expected_offset);
        expected_offset += entry.total();

        for kind in BinObjectKind::ALL {
            let list = output.objects(c, kind);
            assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
    }
    assert_eq!(expected_offset as usize, output.indices.len());
}

#[test]
fn test_result_independent_of_thread_count() {
    let single = ThreadPool::new(1).unwrap();
    let many = ThreadPool::new(4).unwrap();
    let objects = scene();
    let bin = ClusterBin::new(2).unwrap();

    let a = bin.bin(&single, &prepared(&single), &objects);
    let b = bin.bin(&many, &prepared(&many), &objects);

    assert_eq!(a, b);
}

#[test]
fn test_limit_keeps_lowest_indices() {
    let pool = ThreadPool::new(2).unwrap();
    let clusterer = prepared(&pool);
    let center = Vec3::new(0.0, 0.0, -20.0);
    let objects: Vec<BinObject> = (0..5).map(|_| BinObject::point_light(Sphere::new(center, 0.5))).collect();

    let unlimited = ClusterBin::new(64).unwrap().bin(&pool, &clusterer, &objects);
    let limited = ClusterBin::new(2).unwrap().bin(&pool, &clusterer, &objects);

    let touched: Vec<usize> = (0..unlimited.clusters.len())
        .filter(|&c| unlimited.clusters[c].total() > 0)
        .collect();
    assert!(!touched.is_empty());

    for &c in &touched {
        assert_eq!(unlimited.objects(c, BinObjectKind::PointLight), &[0, 1, 2, 3, 4]);
        assert_eq!(limited.objects(c, BinObjectKind::PointLight), &[0, 1]);
    }
    assert_eq!(limited.dropped as usize, touched.len() * 3);
}

#[test]
fn test_empty_scene() {
    let pool = ThreadPool::new(2).unwrap();
    let clusterer = prepared(&pool);

    let output = ClusterBin::new(8).unwrap().bin(&pool, &clusterer, &[]);

    assert!(output.indices.is_empty());
    assert!(output.clusters.iter().all(|e| e.total() == 0 && e.offset == 0));
}
