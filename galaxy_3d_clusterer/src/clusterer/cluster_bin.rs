/// ClusterBin — per-frame binning of every visible light, probe, decal
/// and fog volume into the clusters of a prepared `Clusterer`.
///
/// The output is the CPU side of the clustered shading lists: for each
/// cluster, a run of object indices in `ClusterBinOutput::indices`,
/// grouped by object kind. Uploading it is left to the renderer.
///
/// # Example
///
/// ```ignore
/// let bin = ClusterBin::new(64)?;
/// clusterer.prepare(&pool, &camera);
/// let output = bin.bin(&pool, &clusterer, &objects);
/// let lights = output.objects(clusterer.cluster_index(3, 2, 7), BinObjectKind::PointLight);
/// ```

use rayon::prelude::*;
use crate::collision::{AABB, CollisionShape, Frustum, PerspectiveFrustum, Sphere};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::utils::ThreadPool;
use super::clusterer::Clusterer;
use super::test_result::ClustererTestResult;

/// Kind of a binned object. Kinds are stored in this order inside a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinObjectKind {
    PointLight,
    SpotLight,
    ReflectionProbe,
    Decal,
    FogVolume,
}

impl BinObjectKind {
    /// Number of kinds
    pub const COUNT: usize = 5;

    pub const ALL: [BinObjectKind; Self::COUNT] = [
        BinObjectKind::PointLight,
        BinObjectKind::SpotLight,
        BinObjectKind::ReflectionProbe,
        BinObjectKind::Decal,
        BinObjectKind::FogVolume,
    ];

    /// Position of the kind inside `ClusterEntry::counts`
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Bounding volume of a binned object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinShape {
    Sphere(Sphere),
    Aabb(AABB),
    Frustum(PerspectiveFrustum),
}

impl BinShape {
    pub fn world_aabb(&self) -> AABB {
        match self {
            BinShape::Sphere(sphere) => sphere.compute_aabb(),
            BinShape::Aabb(aabb) => *aabb,
            BinShape::Frustum(frustum) => frustum.compute_aabb(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinObject {
    pub kind: BinObjectKind,
    pub shape: BinShape,
}

impl BinObject {
    pub fn new(kind: BinObjectKind, shape: BinShape) -> Self {
        Self { kind, shape }
    }

    pub fn point_light(sphere: Sphere) -> Self {
        Self::new(BinObjectKind::PointLight, BinShape::Sphere(sphere))
    }

    pub fn spot_light(frustum: PerspectiveFrustum) -> Self {
        Self::new(BinObjectKind::SpotLight, BinShape::Frustum(frustum))
    }

    pub fn reflection_probe(aabb: AABB) -> Self {
        Self::new(BinObjectKind::ReflectionProbe, BinShape::Aabb(aabb))
    }

    pub fn decal(aabb: AABB) -> Self {
        Self::new(BinObjectKind::Decal, BinShape::Aabb(aabb))
    }

    /// Fog volumes are either spheres or boxes.
    pub fn fog_volume(shape: BinShape) -> Self {
        Self::new(BinObjectKind::FogVolume, shape)
    }

    pub fn world_aabb(&self) -> AABB {
        self.shape.world_aabb()
    }
}

/// Object lists of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterEntry {
    /// Start of the cluster's run in `ClusterBinOutput::indices`
    pub offset: u32,
    /// Number of objects of each kind, indexed by `BinObjectKind::index`
    pub counts: [u32; BinObjectKind::COUNT],
}

impl ClusterEntry {
    pub fn count(&self, kind: BinObjectKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Offset of the first object of `kind` in `ClusterBinOutput::indices`
    pub fn kind_offset(&self, kind: BinObjectKind) -> u32 {
        self.offset + self.counts[..kind.index()].iter().sum::<u32>()
    }
}

/// Flattened per-cluster object lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterBinOutput {
    /// One entry per cluster, in `Clusterer::cluster_index` order
    pub clusters: Vec<ClusterEntry>,
    /// Indices into the binned object slice, ascending within each list
    pub indices: Vec<u32>,
    /// Object/cluster pairs dropped by the per-cluster limit
    pub dropped: u32,
}

impl ClusterBinOutput {
    /// Objects of `kind` overlapping cluster `cluster_index`.
    pub fn objects(&self, cluster_index: usize, kind: BinObjectKind) -> &[u32] {
        let entry = &self.clusters[cluster_index];
        let start = entry.kind_offset(kind) as usize;
        &self.indices[start..start + entry.count(kind) as usize]
    }
}

pub struct ClusterBin {
    max_objects_per_cluster: u32,
}

impl ClusterBin {
    /// Binner keeping at most `max_objects_per_cluster` objects of each
    /// kind per cluster.
    pub fn new(max_objects_per_cluster: u32) -> Result<Self> {
        if max_objects_per_cluster == 0 {
            return Err(Engine::log_and_return_error(
                "galaxy3d::ClusterBin",
                Error::InvalidConfig("max_objects_per_cluster must be non-zero".to_string()),
            ));
        }

        Ok(Self { max_objects_per_cluster })
    }

    pub fn max_objects_per_cluster(&self) -> u32 {
        self.max_objects_per_cluster
    }

    /// Bin `objects` into the clusters of `clusterer`, which must have
    /// been prepared for this frame.
    ///
    /// Objects outside the camera frustum are skipped. The remaining ones
    /// are binned in parallel on `thread_pool`; the result does not
    /// depend on the thread count. When a list is full, objects with the
    /// lowest indices are kept.
    pub fn bin(&self, thread_pool: &ThreadPool, clusterer: &Clusterer, objects: &[BinObject]) -> ClusterBinOutput {
        debug_assert!(clusterer.is_prepared(), "ClusterBin::bin called before Clusterer::prepare");

        let frustum = Frustum::from_view_projection(clusterer.view_projection_matrix());

        // (object index, kind, touched cluster indices), in object order
        let binned: Vec<(u32, BinObjectKind, Vec<u32>)> = thread_pool.install(|| {
            objects
                .par_iter()
                .enumerate()
                .filter(|(_, object)| frustum.intersects_aabb(&object.world_aabb()))
                .map_init(
                    || clusterer.init_test_results(),
                    |result, (index, object)| {
                        bin_object(clusterer, object, result);
                        let clusters: Vec<u32> = result
                            .iter()
                            .map(|c| clusterer.cluster_index(c.x, c.y, c.z) as u32)
                            .collect();
                        (index as u32, object.kind, clusters)
                    },
                )
                .collect()
        });

        let mut output = ClusterBinOutput {
            clusters: vec![ClusterEntry::default(); clusterer.cluster_count() as usize],
            indices: Vec::new(),
            dropped: 0,
        };

        // Count, honoring the per-kind limit
        for (_, kind, clusters) in &binned {
            for &cluster in clusters {
                let count = &mut output.clusters[cluster as usize].counts[kind.index()];
                if *count < self.max_objects_per_cluster {
                    *count += 1;
                } else {
                    output.dropped += 1;
                }
            }
        }

        let mut offset = 0;
        for entry in &mut output.clusters {
            entry.offset = offset;
            offset += entry.total();
        }

        // Fill; objects arrive in index order so every list stays sorted
        output.indices = vec![0; offset as usize];
        let mut filled = vec![[0u32; BinObjectKind::COUNT]; output.clusters.len()];
        for (index, kind, clusters) in &binned {
            for &cluster in clusters {
                let entry = &output.clusters[cluster as usize];
                let slot = &mut filled[cluster as usize][kind.index()];
                if *slot < entry.count(*kind) {
                    output.indices[(entry.kind_offset(*kind) + *slot) as usize] = *index;
                    *slot += 1;
                }
            }
        }

        crate::engine_trace!(
            "galaxy3d::ClusterBin",
            "Binned {} of {} objects into {} indices ({} dropped)",
            binned.len(),
            objects.len(),
            output.indices.len(),
            output.dropped
        );

        output
    }
}

fn bin_object(clusterer: &Clusterer, object: &BinObject, result: &mut ClustererTestResult) {
    match &object.shape {
        BinShape::Sphere(sphere) => clusterer.bin(sphere, &sphere.compute_aabb(), result),
        BinShape::Aabb(aabb) => clusterer.bin(aabb, aabb, result),
        BinShape::Frustum(frustum) => {
            clusterer.bin_perspective_frustum(frustum, &frustum.compute_aabb(), result)
        }
    }
}

#[cfg(test)]
#[path = "cluster_bin_tests.rs"]
mod tests;
