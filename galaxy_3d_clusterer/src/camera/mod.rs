//! Camera module — the camera description consumed by the clusterer.
//!
//! The engine does NOT store or manage cameras. They are passive data
//! owned and driven by the caller, handed to `Clusterer::prepare` once
//! per frame.

mod camera;

pub use camera::Camera;
