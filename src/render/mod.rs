//! CPU rendering: frame surfaces, path rasterization and layer composition.

/// Layer order and per-frame rendering.
pub mod compositor;
/// Stroked and dashed polylines.
pub mod raster;
/// RGBA drawing target and frame buffers.
pub mod surface;
