//! Roadreel renders procedural traffic-corridor animations as numbered image sequences.
//!
//! Named road corridors (polylines of latitude/longitude pairs) are fitted into the canvas with a
//! padded Web-Mercator projection and drawn in four cumulative phases: road bed, lane markings,
//! a reference grid, and animated two-way traffic flow. The public API is session-oriented:
//!
//! - Load and validate a [`SceneDef`]
//! - Create a [`RenderSession`] (projection bounds are computed once here)
//! - Render single frames or stream a range into a [`FrameSink`] such as [`PngSequenceSink`]
//!
//! Every frame is a pure function of the scene, the bounds and the frame index.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame sinks and PNG output.
pub mod encode;
/// Corridors and the Web-Mercator projection.
pub mod geo;
/// CPU rasterization and frame composition.
pub mod render;
/// Scene configuration.
pub mod scene;
/// Scene-bound rendering API.
pub mod session;
/// Four-phase animation timeline.
pub mod timeline;

pub use crate::foundation::core::{Canvas, FrameIndex, FrameRange, Point, Rgba8, Vec2};
pub use crate::foundation::error::{RoadreelError, RoadreelResult};

pub use crate::encode::png::{
    PixelFormat, PngSequenceOpts, PngSequenceSink, emit, frame_file_name,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geo::corridor::{Corridor, GeoPoint, TrafficLevel};
pub use crate::geo::projection::{ProjectionBounds, ScreenPoint, compute_bounds, project};
pub use crate::render::compositor::render_frame;
pub use crate::render::raster::{DashPattern, FlowDirection};
pub use crate::render::surface::{FrameRGBA, Surface};
pub use crate::scene::{SceneDef, Style};
pub use crate::session::{RenderSession, RenderSessionOpts, RenderStats};
pub use crate::timeline::{LayerOpacity, Phase, PhaseState, Timeline, phase_for};
