//! Frame sinks.
//!
//! Sinks consume rendered frames in timeline order and are used by `RenderSession::render_range`.

/// Numbered PNG file sequences.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
