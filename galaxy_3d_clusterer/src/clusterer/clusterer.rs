/// Clusterer — partitions the camera's view volume into a 3D grid of
/// clusters and finds the clusters each light, probe, decal or fog
/// volume overlaps.
///
/// One clusterer per active camera. Each frame:
/// 1. `prepare` refreshes the planes (and, when the projection changed,
///    the cluster boxes) on the worker pool and blocks until done.
/// 2. `bin` / `bin_perspective_frustum` are called once per visible
///    object. They only read the clusterer, so several threads may bin
///    concurrently, each with its own `ClustererTestResult`.
///
/// # Example
///
/// ```ignore
/// let pool = ThreadPool::new(4)?;
/// let mut clusterer = Clusterer::new(ClustererConfig::default())?;
/// let mut result = clusterer.init_test_results();
///
/// clusterer.prepare(&pool, &camera);
/// clusterer.bin(&light_sphere, &light_sphere.compute_aabb(), &mut result);
/// for cluster in &result {
///     // ...
/// }
/// ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use crate::camera::Camera;
use crate::collision::{AABB, CollisionShape, Frustum, PerspectiveFrustum, Plane};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::utils::{choose_start_end, split_ranges_mut, ThreadPool};
use super::planes::perspective_unprojection_params;
use super::test_result::ClustererTestResult;
use super::update::{split_plane_chunks, UpdateContext, UpdatePlanesTask};
use super::z_split::ZSplit;

/// Grid dimensions of a clusterer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClustererConfig {
    /// Number of columns (screen X)
    pub cluster_count_x: u32,
    /// Number of rows (screen Y)
    pub cluster_count_y: u32,
    /// Number of depth slices
    pub cluster_count_z: u32,
}

impl Default for ClustererConfig {
    fn default() -> Self {
        Self {
            cluster_count_x: 32,
            cluster_count_y: 26,
            cluster_count_z: 32,
        }
    }
}

/// Constants that let shaders find a fragment's depth slice without
/// the clusterer's planes.
///
/// - `val0.xyz / val0.w`: near plane scaled by `countZ^2 / (far - near)`,
///   so that `k = floor(sqrt(dot(val0.xyz, world_pos) - val0.w))`
/// - `val1.x`: `(far - near) / countZ^2`, `val1.y`: near
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ShaderMagicValues {
    pub val0: Vec4,
    pub val1: Vec4,
}

impl ShaderMagicValues {
    /// Depth slice of a world-space position, as the shaders compute it.
    pub fn cluster_z(&self, world_position: Vec3, cluster_count_z: u32) -> u32 {
        let k2 = self.val0.truncate().dot(world_position) - self.val0.w;
        (k2.max(0.0).sqrt().floor() as u32).min(cluster_count_z)
    }

    /// View distance where slice `k` starts, from `val1`.
    pub fn cluster_near(&self, k: u32) -> f32 {
        let k = k as f32;
        self.val1.x * k * k + self.val1.y
    }
}

#[derive(Debug, Clone)]
pub struct Clusterer {
    pub(super) counts: [u32; 3],

    // Projection-only state (rebuilt when the projection changes)
    pub(super) planes_x: Vec<Plane>,
    pub(super) planes_y: Vec<Plane>,
    pub(super) cluster_boxes: Vec<AABB>,

    // Per-frame state
    pub(super) planes_x_world: Vec<Plane>,
    pub(super) planes_y_world: Vec<Plane>,
    pub(super) near_plane_world: Plane,
    pub(super) far_plane_world: Plane,

    pub(super) proj_matrix: Mat4,
    pub(super) view_matrix: Mat4,
    pub(super) view_proj_matrix: Mat4,
    pub(super) camera_transform: Mat4,
    pub(super) unproj_params: Vec4,
    pub(super) split: ZSplit,
    shader_magic_values: ShaderMagicValues,
    prepared: bool,
}

impl Clusterer {
    /// Allocate a clusterer for the given grid.
    ///
    /// Fails with `InvalidConfig` when a count is zero or the total
    /// cluster count does not fit in a `u32`.
    pub fn new(config: ClustererConfig) -> Result<Self> {
        let counts = [config.cluster_count_x, config.cluster_count_y, config.cluster_count_z];

        if counts.contains(&0) {
            return Err(Engine::log_and_return_error(
                "galaxy3d::Clusterer",
                Error::InvalidConfig(format!(
                    "Cluster counts must be non-zero, got {}x{}x{}",
                    counts[0], counts[1], counts[2]
                )),
            ));
        }

        let cluster_count = counts[0]
            .checked_mul(counts[1])
            .and_then(|xy| xy.checked_mul(counts[2]))
            .ok_or_else(|| Engine::log_and_return_error(
                "galaxy3d::Clusterer",
                Error::InvalidConfig(format!(
                    "Cluster grid {}x{}x{} is too large",
                    counts[0], counts[1], counts[2]
                )),
            ))?;

        let plane_count_x = (counts[0] - 1) as usize;
        let plane_count_y = (counts[1] - 1) as usize;

        crate::engine_info!(
            "galaxy3d::Clusterer",
            "Created clusterer {}x{}x{} ({} clusters)",
            counts[0], counts[1], counts[2], cluster_count
        );

        Ok(Self {
            counts,
            planes_x: vec![Plane::ZERO; plane_count_x],
            planes_y: vec![Plane::ZERO; plane_count_y],
            cluster_boxes: vec![AABB::ZERO; cluster_count as usize],
            planes_x_world: vec![Plane::ZERO; plane_count_x],
            planes_y_world: vec![Plane::ZERO; plane_count_y],
            near_plane_world: Plane::ZERO,
            far_plane_world: Plane::ZERO,
            proj_matrix: Mat4::ZERO,
            view_matrix: Mat4::IDENTITY,
            view_proj_matrix: Mat4::ZERO,
            camera_transform: Mat4::IDENTITY,
            unproj_params: Vec4::ZERO,
            split: ZSplit::unprepared(counts[2]),
            shader_magic_values: ShaderMagicValues::default(),
            prepared: false,
        })
    }

    /// A test result sized for this grid.
    pub fn init_test_results(&self) -> ClustererTestResult {
        ClustererTestResult::with_capacity(self.cluster_count() as usize)
    }

    // ===== PER-FRAME UPDATE =====

    /// Refresh the grid for this frame's camera.
    ///
    /// Runs one task per worker of `thread_pool` and returns after all of
    /// them finished. Planes and boxes are only rebuilt when the
    /// projection differs from the previous call; otherwise the cached
    /// local planes are just moved to the new camera placement.
    pub fn prepare(&mut self, thread_pool: &ThreadPool, camera: &Camera) {
        let near = camera.near();
        let far = camera.far();
        debug_assert!(near > 0.0 && near < far, "invalid near/far: {} {}", near, far);

        let proj = *camera.projection_matrix();
        let frustum_changed = !self.prepared || proj != self.proj_matrix;

        self.proj_matrix = proj;
        self.view_matrix = *camera.view_matrix();
        self.view_proj_matrix = camera.view_projection_matrix();
        self.camera_transform = *camera.camera_transform();
        self.unproj_params = perspective_unprojection_params(&proj);
        self.split = ZSplit::new(near, far, self.counts[2]);
        self.shader_magic_values = self.compute_shader_magic_values();

        if frustum_changed {
            crate::engine_debug!(
                "galaxy3d::Clusterer",
                "Projection changed, rebuilding {} planes and {} cluster boxes (near {}, far {})",
                self.planes_x.len() + self.planes_y.len(),
                self.cluster_boxes.len(),
                near,
                far
            );
        }

        let thread_count = thread_pool.thread_count().max(1);
        let context = UpdateContext {
            frustum_changed,
            counts: self.counts,
            unproj_params: self.unproj_params,
            camera_transform: self.camera_transform,
            split: self.split,
        };

        let box_count = self.cluster_boxes.len();
        let planes_x = split_plane_chunks(&mut self.planes_x, &mut self.planes_x_world, thread_count);
        let planes_y = split_plane_chunks(&mut self.planes_y, &mut self.planes_y_world, thread_count);
        let boxes = split_ranges_mut(&mut self.cluster_boxes, thread_count);
        let mut near_far = Some((&mut self.near_plane_world, &mut self.far_plane_world));

        let tasks: Vec<UpdatePlanesTask<'_>> = planes_x
            .into_iter()
            .zip(planes_y)
            .zip(boxes)
            .enumerate()
            .map(|(thread_id, ((planes_x, planes_y), boxes))| UpdatePlanesTask {
                context: &context,
                planes_x,
                planes_y,
                first_box: choose_start_end(thread_id, thread_count, box_count).start as u32,
                boxes,
                near_far: near_far.take(),
            })
            .collect();

        thread_pool.run_tasks(tasks);
        self.prepared = true;
    }

    /// Slice lookup constants for the shaders.
    ///
    /// The distance of a world position W to the near plane is
    /// `d = dot(n, W) - o`, and its slice is `k = sqrt(d * countZ^2 / (far - near))`.
    /// Folding the scale into the plane gives `k = sqrt(dot(A, W) - B)`.
    fn compute_shader_magic_values(&self) -> ShaderMagicValues {
        let frustum = Frustum::from_view_projection(&self.view_proj_matrix);
        let near_plane = frustum.near_plane();

        let count_z = self.counts[2] as f32;
        let scale = count_z * count_z / (self.split.far() - self.split.near());

        ShaderMagicValues {
            val0: (near_plane.normal * scale).extend(near_plane.offset * scale),
            val1: Vec4::new(self.split.near_opt(), self.split.near(), 0.0, 0.0),
        }
    }

    // ===== BINNING =====

    /// Find the clusters touched by `shape`, whose world bounds are `world_box`.
    ///
    /// Spheres take the exact sphere/box path, every other shape the
    /// recursive plane descent. `result` is reset first.
    pub fn bin(&self, shape: &dyn CollisionShape, world_box: &AABB, result: &mut ClustererTestResult) {
        debug_assert!(self.prepared, "Clusterer::bin called before prepare");
        result.reset();

        match shape.as_sphere() {
            Some(sphere) => self.bin_sphere(sphere, result),
            None => self.bin_generic(shape, world_box, result),
        }
    }

    /// Find the clusters touched by a spot light style frustum.
    ///
    /// Cells are tested against the frustum's far and side planes; the
    /// frustum's own near plane is ignored. `result` is reset first.
    pub fn bin_perspective_frustum(
        &self,
        frustum: &PerspectiveFrustum,
        world_box: &AABB,
        result: &mut ClustererTestResult,
    ) {
        debug_assert!(self.prepared, "Clusterer::bin_perspective_frustum called before prepare");
        result.reset();
        self.bin_frustum_planes(frustum, world_box, result);
    }

    // ===== ACCESSORS =====

    /// Total number of clusters
    pub fn cluster_count(&self) -> u32 {
        self.counts[0] * self.counts[1] * self.counts[2]
    }

    pub fn cluster_count_x(&self) -> u32 {
        self.counts[0]
    }

    pub fn cluster_count_y(&self) -> u32 {
        self.counts[1]
    }

    pub fn cluster_count_z(&self) -> u32 {
        self.counts[2]
    }

    /// Linear index of cluster `(x, y, z)`: `z * (countX * countY) + y * countX + x`.
    #[inline]
    pub fn cluster_index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.counts[0] && y < self.counts[1] && z < self.counts[2]);
        (z as usize * self.counts[1] as usize + y as usize) * self.counts[0] as usize + x as usize
    }

    /// View-space bounds of cluster `(x, y, z)`.
    pub fn cluster_box(&self, x: u32, y: u32, z: u32) -> &AABB {
        &self.cluster_boxes[self.cluster_index(x, y, z)]
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn near(&self) -> f32 {
        self.split.near()
    }

    pub fn far(&self) -> f32 {
        self.split.far()
    }

    /// View distance where depth slice `k` starts.
    pub fn calc_near(&self, k: u32) -> f32 {
        self.split.calc_near(k)
    }

    /// Depth slice of a view-space depth (negative in front of the camera).
    pub fn calc_z(&self, z_view: f32) -> u32 {
        self.split.calc_z(z_view)
    }

    /// Column planes in view space.
    pub fn planes_x(&self) -> &[Plane] {
        &self.planes_x
    }

    /// Row planes in view space.
    pub fn planes_y(&self) -> &[Plane] {
        &self.planes_y
    }

    pub fn planes_x_world(&self) -> &[Plane] {
        &self.planes_x_world
    }

    pub fn planes_y_world(&self) -> &[Plane] {
        &self.planes_y_world
    }

    pub fn near_plane(&self) -> &Plane {
        &self.near_plane_world
    }

    pub fn far_plane(&self) -> &Plane {
        &self.far_plane_world
    }

    pub fn shader_magic_values(&self) -> &ShaderMagicValues {
        &self.shader_magic_values
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.proj_matrix
    }

    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_proj_matrix
    }

    pub fn camera_transform(&self) -> &Mat4 {
        &self.camera_transform
    }
}

#[cfg(test)]
#[path = "clusterer_tests.rs"]
mod tests;
