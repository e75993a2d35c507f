/// Per-frame plane/box refresh, split across the worker pool.
///
/// Each task owns disjoint sub-slices of the clusterer arrays, so the
/// refresh needs no locking. Only the task for thread 0 receives the
/// near/far plane slots.

use glam::{Mat4, Vec3, Vec4};
use crate::collision::{AABB, Plane};
use crate::utils::{choose_start_end, split_ranges_mut, ThreadPoolTask};
use super::planes::{compute_cluster_box, compute_plane_x, compute_plane_y};
use super::z_split::ZSplit;

/// Read-only frame parameters shared by every task.
pub(crate) struct UpdateContext {
    pub(crate) frustum_changed: bool,
    pub(crate) counts: [u32; 3],
    pub(crate) unproj_params: Vec4,
    pub(crate) camera_transform: Mat4,
    pub(crate) split: ZSplit,
}

/// A slice of local planes and their world-space counterparts.
pub(crate) struct PlaneChunk<'a> {
    /// Index of `local[0]` in the full plane array
    pub(crate) first: u32,
    pub(crate) local: &'a mut [Plane],
    pub(crate) world: &'a mut [Plane],
}

pub(crate) struct UpdatePlanesTask<'a> {
    pub(crate) context: &'a UpdateContext,
    pub(crate) planes_x: PlaneChunk<'a>,
    pub(crate) planes_y: PlaneChunk<'a>,
    /// Index of `boxes[0]` in the full box array
    pub(crate) first_box: u32,
    pub(crate) boxes: &'a mut [AABB],
    pub(crate) near_far: Option<(&'a mut Plane, &'a mut Plane)>,
}

impl ThreadPoolTask for UpdatePlanesTask<'_> {
    fn run(self, thread_id: usize, _thread_count: usize) {
        debug_assert!(self.near_far.is_none() || thread_id == 0);

        let ctx = self.context;
        let trf = &ctx.camera_transform;

        if ctx.frustum_changed {
            update_planes(self.planes_x, trf, |i| compute_plane_x(i, ctx.counts[0], ctx.unproj_params));
            update_planes(self.planes_y, trf, |i| compute_plane_y(i, ctx.counts[1], ctx.unproj_params));

            let per_slice = ctx.counts[0] * ctx.counts[1];
            for (offset, cluster_box) in self.boxes.iter_mut().enumerate() {
                let index = self.first_box + offset as u32;
                let z = index / per_slice;
                let y = (index % per_slice) / ctx.counts[0];
                let x = index % ctx.counts[0];
                *cluster_box = compute_cluster_box(x, y, z, ctx.counts, ctx.unproj_params, &ctx.split);
            }
        } else {
            transform_planes(self.planes_x, trf);
            transform_planes(self.planes_y, trf);
        }

        if let Some((near_plane, far_plane)) = self.near_far {
            *near_plane = Plane::new(Vec3::new(0.0, 0.0, -1.0), ctx.split.near()).transformed(trf);
            *far_plane = Plane::new(Vec3::new(0.0, 0.0, 1.0), -ctx.split.far()).transformed(trf);
        }
    }
}

fn update_planes(chunk: PlaneChunk<'_>, trf: &Mat4, compute: impl Fn(u32) -> Plane) {
    for (offset, (local, world)) in chunk.local.iter_mut().zip(chunk.world.iter_mut()).enumerate() {
        *local = compute(chunk.first + offset as u32);
        *world = local.transformed(trf);
    }
}

fn transform_planes(chunk: PlaneChunk<'_>, trf: &Mat4) {
    for (local, world) in chunk.local.iter().zip(chunk.world.iter_mut()) {
        *world = local.transformed(trf);
    }
}

/// Split a local/world plane pair into one chunk per thread.
pub(crate) fn split_plane_chunks<'a>(
    local: &'a mut [Plane],
    world: &'a mut [Plane],
    thread_count: usize,
) -> Vec<PlaneChunk<'a>> {
    debug_assert_eq!(local.len(), world.len());
    let total = local.len();
    split_ranges_mut(local, thread_count)
        .into_iter()
        .zip(split_ranges_mut(world, thread_count))
        .enumerate()
        .map(|(thread_id, (local, world))| PlaneChunk {
            first: choose_start_end(thread_id, thread_count, total).start as u32,
            local,
            world,
        })
        .collect()
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
