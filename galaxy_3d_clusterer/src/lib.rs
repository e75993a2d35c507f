/*!
# Galaxy 3D Clusterer

View-frustum light clustering for the Galaxy3D renderer.

The camera's view volume is divided into a 3D grid of clusters: screen
tiles in X and Y, quadratic depth slices in Z. Each frame the grid is
prepared for the current camera on a worker pool, then every visible
point light, spot light, reflection probe, decal and fog volume is binned
into the clusters it overlaps. Shaders find a fragment's cluster from the
same grid with a few magic constants.

## Architecture

- **Clusterer**: per-camera grid, plane/box refresh and shape binning
- **ClusterBin**: parallel binning of a whole scene into per-cluster lists
- **Collision**: bounding shapes (Sphere, AABB, PerspectiveFrustum, Frustum)
- **Camera**: view/projection pair consumed by `Clusterer::prepare`
- **ThreadPool**: fork/join worker pool used by the per-frame update
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod clusterer;
pub mod collision;
pub mod utils;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine services (logging)
    pub use crate::engine::Engine;

    // Clusterer
    pub use crate::clusterer::{Clusterer, ClustererConfig, ClustererTestResult, ClusterId};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod clusterer {
        pub use crate::clusterer::*;
    }

    pub mod collision {
        pub use crate::collision::*;
    }

    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
