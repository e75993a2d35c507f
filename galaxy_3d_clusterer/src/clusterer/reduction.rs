/// Binning algorithms.
///
/// Every path narrows the grid in two steps: a cheap conservative range
/// (screen-space projection of the view-space bounds for x/y, near/far
/// plane distances for z), then an exact refinement. Spheres and spot
/// frustums refine with a linear scan over cluster boxes, any other
/// shape with a recursive descent over the world-space grid planes.

use std::ops::Range;
use glam::Vec2;
use crate::collision::{AABB, CollisionShape, PerspectiveFrustum, Plane, Sphere};
use super::clusterer::Clusterer;
use super::test_result::ClustererTestResult;

/// Slack between the clipped bounds and the near plane.
const NEAR_CLIP_EPSILON: f32 = f32::EPSILON;

/// Half-open candidate range of clusters on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClusterRange {
    pub(crate) x_begin: u32,
    pub(crate) x_end: u32,
    pub(crate) y_begin: u32,
    pub(crate) y_end: u32,
    pub(crate) z_begin: u32,
    pub(crate) z_end: u32,
}

impl ClusterRange {
    pub(crate) fn is_empty(&self) -> bool {
        self.x_begin >= self.x_end || self.y_begin >= self.y_end || self.z_begin >= self.z_end
    }

    fn x(&self) -> Range<u32> {
        self.x_begin..self.x_end
    }

    fn y(&self) -> Range<u32> {
        self.y_begin..self.y_end
    }

    fn z(&self) -> Range<u32> {
        self.z_begin..self.z_end
    }
}

impl Clusterer {
    /// Cut view-space bounds at the near plane.
    ///
    /// None when nothing is left in front of it.
    fn clip_near(&self, view_box: AABB) -> Option<AABB> {
        let mut view_box = view_box;
        view_box.max.z = view_box.max.z.min(-self.split.near() - NEAR_CLIP_EPSILON);
        view_box.has_volume().then_some(view_box)
    }

    /// Depth slices `[z_begin, z_end)` the shape can reach.
    pub(crate) fn compute_split_range(&self, shape: &dyn CollisionShape) -> (u32, u32) {
        let near = self.split.near();
        let far = self.split.far();

        let dist = shape.test_plane(&self.near_plane_world).max(near);
        let z_begin = self.split.calc_z(-dist);

        let dist = far - shape.test_plane(&self.far_plane_world).max(0.0);
        let z_end = (self.split.calc_z(-dist) + 1).min(self.counts[2]);

        debug_assert!(z_begin <= self.counts[2] && z_end <= self.counts[2]);
        (z_begin, z_end)
    }

    /// Columns and rows covered by the screen-space projection of a
    /// view-space box already clipped to the near plane.
    pub(crate) fn quick_reduction(&self, view_box: &AABB) -> (Range<u32>, Range<u32>) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);

        for corner in view_box.corners() {
            let clip = self.proj_matrix * corner.extend(1.0);
            debug_assert!(clip.w > 0.0, "box must be clipped against the near plane first");
            let ndc = Vec2::new(clip.x, clip.y) / clip.w;
            min = min.min(ndc);
            max = max.max(ndc);
        }

        let min = min * 0.5 + 0.5;
        let max = max * 0.5 + 0.5;

        let count_x = self.counts[0] as f32;
        let count_y = self.counts[1] as f32;
        let x_begin = (count_x * min.x).floor().clamp(0.0, count_x) as u32;
        let x_end = (count_x * max.x).ceil().clamp(0.0, count_x) as u32;
        let y_begin = (count_y * min.y).floor().clamp(0.0, count_y) as u32;
        let y_end = (count_y * max.y).ceil().clamp(0.0, count_y) as u32;

        (x_begin..x_end, y_begin..y_end)
    }

    /// Candidate range of a shape whose view-space bounds are `view_box`.
    fn candidate_range(&self, shape: &dyn CollisionShape, view_box: &AABB) -> ClusterRange {
        let (z_begin, z_end) = self.compute_split_range(shape);
        let (x, y) = self.quick_reduction(view_box);
        ClusterRange {
            x_begin: x.start,
            x_end: x.end,
            y_begin: y.start,
            y_end: y.end,
            z_begin,
            z_end,
        }
    }

    /// Paint every column of the grid for slices `[z_begin, z_end)`.
    fn totally_inside_all_tiles(&self, z: Range<u32>, result: &mut ClustererTestResult) {
        for z in z {
            for y in 0..self.counts[1] {
                for x in 0..self.counts[0] {
                    result.push_back(x, y, z);
                }
            }
        }
    }

    // ===== SPHERE =====

    pub(crate) fn bin_sphere(&self, sphere: &Sphere, result: &mut ClustererTestResult) {
        if !(sphere.radius > 0.0) {
            return;
        }

        let sphere_vs = Sphere::new(self.view_matrix.transform_point3(sphere.center), sphere.radius);
        let Some(view_box) = self.clip_near(sphere_vs.compute_aabb()) else {
            return;
        };

        let range = self.candidate_range(sphere, &view_box);
        if range.z_begin >= range.z_end {
            return;
        }

        let eye = self.camera_transform.w_axis.truncate();
        if sphere.contains_point(eye) {
            self.totally_inside_all_tiles(range.z(), result);
            return;
        }

        if range.is_empty() {
            return;
        }

        self.box_reduction(&range, result, |cluster_box| sphere_vs.intersects_aabb(cluster_box));
    }

    // ===== GENERIC SHAPE =====

    pub(crate) fn bin_generic(&self, shape: &dyn CollisionShape, world_box: &AABB, result: &mut ClustererTestResult) {
        let Some(view_box) = self.clip_near(world_box.transformed(&self.view_matrix)) else {
            return;
        };

        let range = self.candidate_range(shape, &view_box);
        if range.is_empty() {
            return;
        }

        self.bin_generic_recursive(shape, range, result);
    }

    /// Recursive halving of the x/y range against the world-space grid
    /// planes. Leaves paint their whole z range.
    fn bin_generic_recursive(&self, shape: &dyn CollisionShape, range: ClusterRange, result: &mut ClustererTestResult) {
        let mx = (range.x_end - range.x_begin) / 2;
        let my = (range.y_end - range.y_begin) / 2;

        if mx == 0 && my == 0 {
            for z in range.z() {
                result.push_back(range.x_begin, range.y_begin, z);
            }
            return;
        }

        let x_mid = range.x_begin + mx;
        let y_mid = range.y_begin + my;
        let left = ClusterRange { x_end: x_mid, ..range };
        let right = ClusterRange { x_begin: x_mid, ..range };
        let bottom = ClusterRange { y_end: y_mid, ..range };
        let top = ClusterRange { y_begin: y_mid, ..range };

        if mx == 0 {
            let test = shape.test_plane(&self.planes_y_world[(y_mid - 1) as usize]);
            if test <= 0.0 {
                self.bin_generic_recursive(shape, bottom, result);
            }
            if test >= 0.0 {
                self.bin_generic_recursive(shape, top, result);
            }
            return;
        }

        if my == 0 {
            let test = shape.test_plane(&self.planes_x_world[(x_mid - 1) as usize]);
            if test <= 0.0 {
                self.bin_generic_recursive(shape, left, result);
            }
            if test >= 0.0 {
                self.bin_generic_recursive(shape, right, result);
            }
            return;
        }

        // inside[row][column]
        let mut inside = [[false; 2]; 2];

        let test = shape.test_plane(&self.planes_y_world[(y_mid - 1) as usize]);
        if test < 0.0 {
            inside[0] = [true, true];
        } else if test > 0.0 {
            inside[1] = [true, true];
        } else {
            inside = [[true; 2]; 2];
        }

        let test = shape.test_plane(&self.planes_x_world[(x_mid - 1) as usize]);
        if test < 0.0 {
            inside[0][1] = false;
            inside[1][1] = false;
        } else if test > 0.0 {
            inside[0][0] = false;
            inside[1][0] = false;
        }

        for (row, row_range) in [(0, bottom), (1, top)] {
            for (column, column_range) in [(0, left), (1, right)] {
                if inside[row][column] {
                    let quadrant = ClusterRange {
                        x_begin: column_range.x_begin,
                        x_end: column_range.x_end,
                        y_begin: row_range.y_begin,
                        y_end: row_range.y_end,
                        ..range
                    };
                    self.bin_generic_recursive(shape, quadrant, result);
                }
            }
        }
    }

    // ===== PERSPECTIVE FRUSTUM =====

    pub(crate) fn bin_frustum_planes(
        &self,
        frustum: &PerspectiveFrustum,
        world_box: &AABB,
        result: &mut ClustererTestResult,
    ) {
        let Some(view_box) = self.clip_near(world_box.transformed(&self.view_matrix)) else {
            return;
        };

        let range = self.candidate_range(frustum, &view_box);
        if range.is_empty() {
            return;
        }

        // Far and side planes; the frustum's near plane is skipped
        let planes_vs: [Plane; 5] = std::array::from_fn(|i| {
            frustum.planes_world()[i + 1].transformed(&self.view_matrix)
        });

        self.box_reduction(&range, result, |cluster_box| {
            planes_vs.iter().all(|plane| cluster_box.test_plane(plane) >= 0.0)
        });
    }

    // ===== LINEAR SCAN =====

    /// Scan along the longest axis of `range` and paint, per line, the
    /// run between the first and last cluster box accepted by `touches`.
    ///
    /// Assumes the accepted cells of a line are contiguous, which holds
    /// for convex shapes.
    pub(crate) fn box_reduction<F>(&self, range: &ClusterRange, result: &mut ClustererTestResult, touches: F)
    where
        F: Fn(&AABB) -> bool,
    {
        let x_count = range.x_end.saturating_sub(range.x_begin);
        let y_count = range.y_end.saturating_sub(range.y_begin);
        let z_count = range.z_end.saturating_sub(range.z_begin);

        if x_count > y_count && x_count > z_count {
            for z in range.z() {
                for y in range.y() {
                    self.scan_line(range.x(), |x| (x, y, z), &touches, result);
                }
            }
        } else if y_count > x_count && y_count > z_count {
            for z in range.z() {
                for x in range.x() {
                    self.scan_line(range.y(), |y| (x, y, z), &touches, result);
                }
            }
        } else {
            for y in range.y() {
                for x in range.x() {
                    self.scan_line(range.z(), |z| (x, y, z), &touches, result);
                }
            }
        }
    }

    fn scan_line<C, F>(&self, line: Range<u32>, cell: C, touches: &F, result: &mut ClustererTestResult)
    where
        C: Fn(u32) -> (u32, u32, u32),
        F: Fn(&AABB) -> bool,
    {
        let hit = |i: u32| {
            let (x, y, z) = cell(i);
            touches(&self.cluster_boxes[self.cluster_index(x, y, z)])
        };

        let Some(first) = line.clone().find(|&i| hit(i)) else {
            return;
        };
        let last = (first..line.end).rev().find(|&i| hit(i)).unwrap_or(first);

        for i in first..=last {
            let (x, y, z) = cell(i);
            result.push_back(x, y, z);
        }
    }
}

#[cfg(test)]
#[path = "reduction_tests.rs"]
mod tests;
