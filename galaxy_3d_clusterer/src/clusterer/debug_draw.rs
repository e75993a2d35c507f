/// Wireframe visualization of the cluster grid.

use glam::{Vec2, Vec3};
use super::clusterer::Clusterer;
use super::planes::{boundary_ndc, unproject_z_view_space};
use super::test_result::ClustererTestResult;

/// Color of the full grid drawn by `Clusterer::debug_draw`
pub const DEBUG_GRID_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// Color of the clusters drawn by `Clusterer::debug_draw_result`
pub const DEBUG_RESULT_COLOR: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Line sink for the debug views. Points are in world space.
pub trait ClustererDebugDrawer {
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3);
}

impl<F> ClustererDebugDrawer for F
where
    F: FnMut(Vec3, Vec3, Vec3),
{
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3) {
        self(from, to, color)
    }
}

/// Corner pairs of a cluster wedge. Corner bits: x, y, far.
const CLUSTER_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

impl Clusterer {
    /// Draw every cluster of the grid, as prepared for the current camera.
    pub fn debug_draw<D: ClustererDebugDrawer + ?Sized>(&self, drawer: &mut D) {
        for z in 0..self.counts[2] {
            for y in 0..self.counts[1] {
                for x in 0..self.counts[0] {
                    self.debug_draw_cluster(x, y, z, DEBUG_GRID_COLOR, drawer);
                }
            }
        }
    }

    /// Draw the clusters of a previous `bin*` result.
    pub fn debug_draw_result<D: ClustererDebugDrawer + ?Sized>(&self, result: &ClustererTestResult, drawer: &mut D) {
        for cluster in result {
            self.debug_draw_cluster(cluster.x, cluster.y, cluster.z, DEBUG_RESULT_COLOR, drawer);
        }
    }

    /// World-space corners of cluster `(x, y, z)`, indexed by the bits (x, y, far).
    pub fn cluster_corners(&self, x: u32, y: u32, z: u32) -> [Vec3; 8] {
        let depths = [-self.split.calc_near(z), -self.split.calc_near(z + 1)];
        let xs = [boundary_ndc(x, self.counts[0]), boundary_ndc(x + 1, self.counts[0])];
        let ys = [boundary_ndc(y, self.counts[1]), boundary_ndc(y + 1, self.counts[1])];

        std::array::from_fn(|i| {
            let ndc = Vec2::new(xs[i & 1], ys[(i >> 1) & 1]);
            let view = unproject_z_view_space(depths[i >> 2], ndc, self.unproj_params);
            self.camera_transform.transform_point3(view)
        })
    }

    fn debug_draw_cluster<D: ClustererDebugDrawer + ?Sized>(&self, x: u32, y: u32, z: u32, color: Vec3, drawer: &mut D) {
        let corners = self.cluster_corners(x, y, z);
        for (a, b) in CLUSTER_EDGES {
            drawer.draw_line(corners[a], corners[b], color);
        }
    }
}

#[cfg(test)]
#[path = "debug_draw_tests.rs"]
mod tests;
