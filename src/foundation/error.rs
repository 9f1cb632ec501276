use std::path::PathBuf;

/// Result type used across roadreel.
pub type RoadreelResult<T> = Result<T, RoadreelError>;

/// Errors raised while loading, projecting, rendering or writing an animation.
#[derive(thiserror::Error, Debug)]
pub enum RoadreelError {
    /// Corridor coordinates span zero (or non-finite) latitude or longitude.
    #[error("degenerate projection bounds: {0}")]
    DegenerateBounds(String),

    /// Invalid scene, style, canvas, frame index or session option.
    #[error("validation error: {0}")]
    Validation(String),

    /// Scene JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The frame output directory could not be created.
    #[error("cannot create output directory '{}'", path.display())]
    OutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Encoding or writing one frame file failed; the run is aborted.
    #[error("failed to write frame '{}'", path.display())]
    FrameWrite {
        /// Final path of the frame that was being written.
        path: PathBuf,
        /// Encoder or IO failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoadreelError {
    /// Build a [`RoadreelError::DegenerateBounds`] value.
    pub fn degenerate_bounds(msg: impl Into<String>) -> Self {
        Self::DegenerateBounds(msg.into())
    }

    /// Build a [`RoadreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RoadreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RoadreelError::FrameWrite`] value.
    pub fn frame_write(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self::FrameWrite {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
