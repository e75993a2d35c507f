use glam::{Mat4, Quat, Vec3};
use crate::camera::Camera;
use crate::clusterer::ClustererConfig;
use crate::utils::ThreadPool;
use super::*;

fn prepared(camera_transform: Mat4) -> Clusterer {
    let pool = ThreadPool::new(1).unwrap();
    let camera = Camera::perspective(camera_transform, 1.0, 1.5, 0.5, 50.0);
    let mut clusterer = Clusterer::new(ClustererConfig {
        cluster_count_x: 3,
        cluster_count_y: 2,
        cluster_count_z: 4,
    })
    .unwrap();
    clusterer.prepare(&pool, &camera);
    clusterer
}

struct LineRecorder {
    lines: Vec<(Vec3, Vec3, Vec3)>,
}

impl ClustererDebugDrawer for LineRecorder {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3) {
        self.lines.push((from, to, color));
    }
}

#[test]
fn test_debug_draw_whole_grid() {
    let clusterer = prepared(Mat4::IDENTITY);
    let mut recorder = LineRecorder { lines: Vec::new() };

    clusterer.debug_draw(&mut recorder);

    assert_eq!(recorder.lines.len(), 3 * 2 * 4 * 12);
    assert!(recorder.lines.iter().all(|&(_, _, color)| color == DEBUG_GRID_COLOR));
}

#[test]
fn test_debug_draw_result_with_closure() {
    let clusterer = prepared(Mat4::IDENTITY);
    let mut result = clusterer.init_test_results();
    result.push_back(1, 0, 2);
    result.push_back(2, 1, 3);

    let mut count = 0;
    clusterer.debug_draw_result(&result, &mut |_from: Vec3, _to: Vec3, color: Vec3| {
        assert_eq!(color, DEBUG_RESULT_COLOR);
        count += 1;
    });

    assert_eq!(count, 24);
}

#[test]
fn test_cluster_corners_fit_cluster_box() {
    let clusterer = prepared(Mat4::IDENTITY);

    for z in 0..4 {
        for y in 0..2 {
            for x in 0..3 {
                let aabb = clusterer.cluster_box(x, y, z);
                for corner in clusterer.cluster_corners(x, y, z) {
                    assert!(corner.cmpge(aabb.min - 1e-4).all(), "{:?} outside {:?}", corner, aabb);
                    assert!(corner.cmple(aabb.max + 1e-4).all(), "{:?} outside {:?}", corner, aabb);
                }
            }
        }
    }
}

#[test]
fn test_cluster_corners_follow_camera() {
    let placement = Mat4::from_rotation_translation(Quat::from_rotation_x(0.4), Vec3::new(10.0, 0.0, 2.0));
    let moved = prepared(placement);
    let fixed = prepared(Mat4::IDENTITY);

    let local = fixed.cluster_corners(2, 1, 3);
    let world = moved.cluster_corners(2, 1, 3);
    for (l, w) in local.iter().zip(world.iter()) {
        assert!((placement.transform_point3(*l) - *w).length() < 1e-3);
    }
}

#[test]
fn test_shared_edges_between_neighbours() {
    let clusterer = prepared(Mat4::IDENTITY);

    // Far face of slice 1 is the near face of slice 2
    let a = clusterer.cluster_corners(0, 0, 1);
    let b = clusterer.cluster_corners(0, 0, 2);
    for i in 0..4 {
        assert!((a[i + 4] - b[i]).length() < 1e-5);
    }

    // Right face of column 0 is the left face of column 1
    let left = clusterer.cluster_corners(0, 1, 0);
    let right = clusterer.cluster_corners(1, 1, 0);
    for (l, r) in [(1, 0), (3, 2), (5, 4), (7, 6)] {
        assert!((left[l] - right[r]).length() < 1e-5);
    }
}
