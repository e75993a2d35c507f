//! Clusterer module — view-frustum light clustering.
//!
//! The camera's view volume is cut into `countX x countY` screen tiles
//! and `countZ` quadratic depth slices. Every frame the grid is prepared
//! for the current camera, then each visible light, probe, decal or fog
//! volume is binned into the clusters it overlaps.

mod clusterer;
mod cluster_bin;
mod debug_draw;
mod planes;
mod reduction;
mod test_result;
mod update;
mod z_split;

pub use clusterer::{Clusterer, ClustererConfig, ShaderMagicValues};
pub use cluster_bin::{
    BinObject, BinObjectKind, BinShape, ClusterBin, ClusterBinOutput, ClusterEntry,
};
pub use debug_draw::{ClustererDebugDrawer, DEBUG_GRID_COLOR, DEBUG_RESULT_COLOR};
pub use test_result::{ClusterId, ClustererTestResult};
