//! Geographic input data and the Web-Mercator fit onto the output canvas.

/// Corridors and traffic levels.
pub mod corridor;
/// Bounds fitting and point projection.
pub mod projection;
