//! Four-phase reveal sequence as a pure function of frame index.
//!
//! The timeline is split into four equal windows. In each window one layer ramps from 0 to 255
//! while every earlier layer stays fully opaque and every later one stays hidden.

use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{RoadreelError, RoadreelResult};

/// One of the four sequential reveal windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Road beds fade in.
    RoadFadeIn,
    /// Dashed lane markings fade in.
    LaneMarkings,
    /// Background grid fades in.
    GridOverlay,
    /// Animated traffic-flow lanes fade in.
    TrafficFlow,
}

impl Phase {
    /// All phases in timeline order.
    pub const ALL: [Phase; 4] = [
        Self::RoadFadeIn,
        Self::LaneMarkings,
        Self::GridOverlay,
        Self::TrafficFlow,
    ];

    fn from_index(idx: u64) -> Self {
        match idx {
            0 => Self::RoadFadeIn,
            1 => Self::LaneMarkings,
            2 => Self::GridOverlay,
            _ => Self::TrafficFlow,
        }
    }

    fn index(self) -> u64 {
        match self {
            Self::RoadFadeIn => 0,
            Self::LaneMarkings => 1,
            Self::GridOverlay => 2,
            Self::TrafficFlow => 3,
        }
    }
}

/// Nominal per-layer opacities (0-255) for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerOpacity {
    /// Road bed.
    pub road: u8,
    /// Lane markings.
    pub lane: u8,
    /// Grid overlay (before its own faintness factor is applied).
    pub grid: u8,
    /// Traffic-flow lanes.
    pub traffic: u8,
}

/// Everything the compositor needs to know about one frame's place in the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseState {
    /// Active phase.
    pub phase: Phase,
    /// Layer opacities.
    pub opacity: LayerOpacity,
    /// `frame / total_frames`, in `[0, 1)`; drives the dash animation independently of phase.
    pub progress: f64,
}

/// Timeline over a fixed number of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    total_frames: u64,
}

impl Timeline {
    /// Create a timeline over `total_frames` (must be >= 1).
    pub fn new(total_frames: u64) -> RoadreelResult<Self> {
        if total_frames == 0 {
            return Err(RoadreelError::validation("timeline needs at least one frame"));
        }
        Ok(Self { total_frames })
    }

    /// Number of frames in the timeline.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames `[0, total_frames)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::full(self.total_frames)
    }

    /// Phase state for `frame`. Frames past the end are clamped to the last frame.
    pub fn state_at(&self, frame: FrameIndex) -> PhaseState {
        let total = u128::from(self.total_frames);
        let f = u128::from(frame.0.min(self.total_frames - 1));

        let scaled = f * 4;
        let idx = (scaled / total).min(3);
        let ramp = (((scaled - idx * total) * 255) / total).min(255) as u8;

        let phase = Phase::from_index(idx as u64);
        let opacity = match phase {
            Phase::RoadFadeIn => LayerOpacity {
                road: ramp,
                ..LayerOpacity::default()
            },
            Phase::LaneMarkings => LayerOpacity {
                road: 255,
                lane: ramp,
                ..LayerOpacity::default()
            },
            Phase::GridOverlay => LayerOpacity {
                road: 255,
                lane: 255,
                grid: ramp,
                traffic: 0,
            },
            Phase::TrafficFlow => LayerOpacity {
                road: 255,
                lane: 255,
                grid: 255,
                traffic: ramp,
            },
        };

        PhaseState {
            phase,
            opacity,
            progress: f as f64 / total as f64,
        }
    }

    /// Frames belonging to `phase`.
    pub fn window(&self, phase: Phase) -> FrameRange {
        let start = self.first_frame_of(phase.index());
        let end = if phase == Phase::TrafficFlow {
            self.total_frames
        } else {
            self.first_frame_of(phase.index() + 1)
        };
        FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(end.max(start)),
        }
    }

    // Smallest f with floor(4f / total) >= k.
    fn first_frame_of(&self, k: u64) -> u64 {
        let total = u128::from(self.total_frames);
        let f = (u128::from(k) * total).div_ceil(4);
        f.min(total) as u64
    }
}

/// Phase state of `frame` in a timeline of `total_frames`.
pub fn phase_for(frame: FrameIndex, total_frames: u64) -> RoadreelResult<PhaseState> {
    Ok(Timeline::new(total_frames)?.state_at(frame))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
