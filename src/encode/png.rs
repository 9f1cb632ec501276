use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::render::surface::FrameRGBA;

/// Pixel layout of written PNG files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// RGBA8 as rendered.
    #[default]
    Rgba,
    /// RGB8, alpha flattened over the scene background.
    Rgb,
}

/// `prefix_0042.png`.
pub fn frame_file_name(prefix: &str, idx: FrameIndex) -> String {
    format!("{prefix}_{:04}.png", idx.0)
}

/// Write `frame` losslessly to `path` and return the size of the written file.
///
/// The image is encoded to a hidden sibling file first and renamed into place, so `path` only
/// ever holds a complete frame. Any failure is a [`RoadreelError::FrameWrite`].
pub fn emit(
    frame: &FrameRGBA,
    path: &Path,
    format: PixelFormat,
    background: Rgba8,
) -> RoadreelResult<u64> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(RoadreelError::validation(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let tmp = partial_path(path);
    let flattened;
    let (bytes, color) = match format {
        PixelFormat::Rgba => (frame.data.as_slice(), image::ColorType::Rgba8),
        PixelFormat::Rgb => {
            flattened = frame.flatten_rgb(background);
            (flattened.as_slice(), image::ColorType::Rgb8)
        }
    };

    if let Err(e) = image::save_buffer_with_format(
        &tmp,
        bytes,
        frame.width,
        frame.height,
        color,
        image::ImageFormat::Png,
    ) {
        let _ = std::fs::remove_file(&tmp);
        return Err(RoadreelError::frame_write(path, e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(RoadreelError::frame_write(path, e));
    }

    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| RoadreelError::frame_write(path, e))
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_owned());
    path.with_file_name(format!(".{name}.partial"))
}

/// Options for [`PngSequenceSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngSequenceOpts {
    /// Output directory, created on `begin` if missing.
    pub dir: PathBuf,
    /// File name prefix.
    pub prefix: String,
    /// Pixel layout.
    pub format: PixelFormat,
}

impl PngSequenceOpts {
    /// Options writing `assembly_NNNN.png` RGBA files into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "assembly".to_owned(),
            format: PixelFormat::Rgba,
        }
    }
}

/// Sink writing one numbered PNG per frame.
#[derive(Debug)]
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    background: Rgba8,
    written: Vec<PathBuf>,
    total_bytes: u64,
}

impl PngSequenceSink {
    /// Create a sink; nothing touches the filesystem until `begin`.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            background: Rgba8::rgb(0, 0, 0),
            written: Vec::new(),
            total_bytes: 0,
        }
    }

    /// Path the frame `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.opts
            .dir
            .join(frame_file_name(&self.opts.prefix, idx))
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Sum of the sizes of all written files.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> RoadreelResult<()> {
        std::fs::create_dir_all(&self.opts.dir).map_err(|source| RoadreelError::OutputDir {
            path: self.opts.dir.clone(),
            source,
        })?;
        self.background = cfg.background;
        self.written.clear();
        self.total_bytes = 0;
        tracing::info!(
            dir = %self.opts.dir.display(),
            prefix = %self.opts.prefix,
            format = ?self.opts.format,
            "writing png sequence"
        );
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RoadreelResult<u64> {
        let path = self.frame_path(idx);
        let size = emit(frame, &path, self.opts.format, self.background)?;
        self.total_bytes += size;
        self.written.push(path);
        Ok(size)
    }

    fn end(&mut self) -> RoadreelResult<()> {
        tracing::debug!(
            frames = self.written.len(),
            bytes = self.total_bytes,
            "png sequence closed"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
