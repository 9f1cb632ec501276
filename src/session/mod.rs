//! Scene-bound rendering of single frames and frame ranges.

/// [`RenderSession`] and its options and statistics.
pub mod render_session;

pub use render_session::{RenderSession, RenderSessionOpts, RenderStats};
