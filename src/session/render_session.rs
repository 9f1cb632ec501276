use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::geo::projection::{ProjectionBounds, compute_bounds};
use crate::render::compositor;
use crate::render::surface::FrameRGBA;
use crate::scene::SceneDef;
use crate::timeline::Timeline;

const MAX_CHUNK_BUFFER_BYTES: u64 = 256 * 1024 * 1024;
const PROGRESS_EVERY: u64 = 10;

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSessionOpts {
    /// Render frames of a chunk concurrently on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames rendered per chunk before they are handed to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames rendered and accepted by the sink.
    pub frames_rendered: u64,
    /// Sum of the per-frame sizes reported by the sink.
    pub bytes_written: u64,
    /// Wall time from `begin` to `end` of the sink.
    pub elapsed: Duration,
    /// The run stopped early because the cancel flag was raised.
    pub cancelled: bool,
}

/// Renderer bound to one scene.
///
/// A session validates the scene and computes the projection bounds once up front; every frame
/// it renders afterwards only reads that state, so frames can be produced in any order or in
/// parallel.
#[derive(Clone, Debug)]
pub struct RenderSession {
    scene: SceneDef,
    bounds: ProjectionBounds,
    timeline: Timeline,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Validate `scene` and fit the projection to its corridors.
    ///
    /// Fails with [`RoadreelError::DegenerateBounds`] before anything is rendered when the
    /// corridors do not span an area.
    pub fn new(scene: SceneDef, opts: RenderSessionOpts) -> RoadreelResult<Self> {
        scene.validate()?;
        if opts.threads == Some(0) {
            return Err(RoadreelError::validation(
                "render session 'threads' must be >= 1 when set",
            ));
        }

        for c in scene.corridors.iter().filter(|c| !c.is_drawable()) {
            tracing::info!(
                corridor = %c.name,
                points = c.points.len(),
                "skipping corridor with fewer than 2 points"
            );
        }

        let bounds = compute_bounds(&scene.corridors)?;
        tracing::info!(
            min_lat = bounds.min_lat(),
            max_lat = bounds.max_lat(),
            min_lng = bounds.min_lng(),
            max_lng = bounds.max_lng(),
            "projection bounds"
        );
        let timeline = Timeline::new(scene.frames)?;

        Ok(Self {
            scene,
            bounds,
            timeline,
            opts,
        })
    }

    /// Validated scene this session renders.
    pub fn scene(&self) -> &SceneDef {
        &self.scene
    }

    /// Projection bounds computed once at construction.
    pub fn bounds(&self) -> &ProjectionBounds {
        &self.bounds
    }

    /// Phase timeline over the scene's frame count.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Every frame of the animation.
    pub fn full_range(&self) -> FrameRange {
        self.timeline.range()
    }

    /// Render one frame of the animation.
    pub fn render_frame(&self, frame: FrameIndex) -> RoadreelResult<FrameRGBA> {
        if !self.full_range().contains(frame) {
            return Err(RoadreelError::validation(format!(
                "frame {} is outside the animation (0..{})",
                frame.0, self.scene.frames
            )));
        }
        compositor::render_frame(&self.scene, &self.bounds, frame)
    }

    /// Render the whole animation into `sink`.
    pub fn render_all(
        &self,
        sink: &mut dyn FrameSink,
        cancel: Option<&AtomicBool>,
    ) -> RoadreelResult<RenderStats> {
        self.render_range(self.full_range(), sink, cancel)
    }

    /// Render a frame range and stream frames into a sink.
    ///
    /// The sink receives frames in strictly increasing frame index order, also when chunks are
    /// rendered in parallel. `cancel` is checked before every frame; a cancelled run still calls
    /// `end` on the sink and returns `Ok` with `cancelled` set. The first render or sink error
    /// aborts the run.
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
        cancel: Option<&AtomicBool>,
    ) -> RoadreelResult<RenderStats> {
        if range.is_empty() {
            return Err(RoadreelError::validation(
                "render_range range must be non-empty",
            ));
        }
        if range.end.0 > self.scene.frames {
            return Err(RoadreelError::validation(
                "render_range range must be within the animation",
            ));
        }

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };
        let chunk_size = self.chunk_size(range);

        tracing::info!(
            frames = range.len_frames(),
            start = range.start.0,
            width = self.scene.canvas.width,
            height = self.scene.canvas.height,
            parallel = self.opts.parallel,
            "render start"
        );

        let started = Instant::now();
        sink.begin(SinkConfig {
            canvas: self.scene.canvas,
            total_frames: self.scene.frames,
            background: self.scene.background(),
        })?;

        let mut progress = Progress {
            range,
            started,
            stats: RenderStats {
                frames_total: range.len_frames(),
                ..RenderStats::default()
            },
        };

        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 && !progress.stats.cancelled {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            match pool.as_ref() {
                Some(pool) => {
                    if is_cancelled(cancel) {
                        progress.stats.cancelled = true;
                        break;
                    }
                    let frames = self.render_chunk_parallel(pool, chunk_start, chunk_end)?;
                    for (f, frame) in (chunk_start..chunk_end).zip(frames) {
                        if is_cancelled(cancel) {
                            progress.stats.cancelled = true;
                            break;
                        }
                        progress.push(sink, FrameIndex(f), &frame)?;
                    }
                }
                None => {
                    for f in chunk_start..chunk_end {
                        if is_cancelled(cancel) {
                            progress.stats.cancelled = true;
                            break;
                        }
                        let frame = self.render_frame(FrameIndex(f))?;
                        progress.push(sink, FrameIndex(f), &frame)?;
                    }
                }
            }
            chunk_start = chunk_end;
        }

        sink.end()?;
        let mut stats = progress.stats;
        stats.elapsed = started.elapsed();

        if stats.cancelled {
            tracing::warn!(
                rendered = stats.frames_rendered,
                total = stats.frames_total,
                "render cancelled"
            );
        }
        tracing::info!(
            frames = stats.frames_rendered,
            total_mb = megabytes(stats.bytes_written),
            elapsed_s = stats.elapsed.as_secs_f64(),
            "render finished"
        );
        Ok(stats)
    }

    fn render_chunk_parallel(
        &self,
        pool: &rayon::ThreadPool,
        start: u64,
        end: u64,
    ) -> RoadreelResult<Vec<FrameRGBA>> {
        pool.install(|| {
            (start..end)
                .into_par_iter()
                .map(|f| compositor::render_frame(&self.scene, &self.bounds, FrameIndex(f)))
                .collect::<RoadreelResult<Vec<_>>>()
        })
    }

    fn chunk_size(&self, range: FrameRange) -> u64 {
        let bytes_per_frame = (self.scene.canvas.rgba_len() as u64).max(1);
        let max_chunk_by_mem = (MAX_CHUNK_BUFFER_BYTES / bytes_per_frame).max(1);
        normalized_chunk_size(self.opts.chunk_size)
            .min(max_chunk_by_mem)
            .min(range.len_frames())
    }
}

struct Progress {
    range: FrameRange,
    started: Instant,
    stats: RenderStats,
}

impl Progress {
    fn push(
        &mut self,
        sink: &mut dyn FrameSink,
        idx: FrameIndex,
        frame: &FrameRGBA,
    ) -> RoadreelResult<()> {
        let size = sink.push_frame(idx, frame)?;
        self.stats.frames_rendered += 1;
        self.stats.bytes_written += size;

        let done = self.stats.frames_rendered;
        let total = self.range.len_frames();
        if reports_progress(done, total) {
            tracing::info!(
                "[{:3.0}%] frame {}/{} ({}) {:.2} MB, {:.1}s",
                done as f64 * 100.0 / total as f64,
                done,
                total,
                idx.0,
                megabytes(size),
                self.started.elapsed().as_secs_f64()
            );
        } else {
            tracing::debug!(frame = idx.0, bytes = size, "frame written");
        }
        Ok(())
    }
}

/// First frame, every `PROGRESS_EVERY`-th frame and the last frame get an `info` line.
fn reports_progress(done: u64, total: u64) -> bool {
    done == 1 || done % PROGRESS_EVERY == 0 || done == total
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|c| c.load(Ordering::Relaxed))
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> RoadreelResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RoadreelError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
