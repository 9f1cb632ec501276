use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
use crate::foundation::error::RoadreelResult;
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Total number of frames in the animation (not just the rendered range).
    pub total_frames: u64,
    /// Scene background, used when flattening alpha.
    pub background: Rgba8,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested render range, even when frames were rendered in parallel.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RoadreelResult<()>;
    /// Consume one frame and return the number of bytes it occupies in the sink.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RoadreelResult<u64>;
    /// Called once after the last frame is pushed (also after a cancelled run).
    fn end(&mut self) -> RoadreelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RoadreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RoadreelResult<u64> {
        self.frames.push((idx, frame.clone()));
        Ok(frame.data.len() as u64)
    }

    fn end(&mut self) -> RoadreelResult<()> {
        self.ended = true;
        Ok(())
    }
}
