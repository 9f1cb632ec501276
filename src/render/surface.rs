use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::foundation::math::{blend_alpha, blend_channel, mul_div255_u8};

/// Largest accepted canvas edge in pixels.
pub const MAX_CANVAS_EDGE: u32 = 16_384;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Drop alpha by compositing every pixel over an opaque `background`.
    pub fn flatten_rgb(&self, background: Rgba8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            let a = px[3];
            out.push(blend_channel(px[0], background.r, a));
            out.push(blend_channel(px[1], background.g, a));
            out.push(blend_channel(px[2], background.b, a));
        }
        out
    }
}

/// Mutable RGBA drawing target for one frame.
///
/// All blending is straight-alpha "over": each draw keeps whatever lower layers already put
/// on the surface and mixes its own color in by its alpha.
#[derive(Clone, Debug)]
pub struct Surface {
    pixels: image::RgbaImage,
}

impl Surface {
    /// Create a surface filled with `clear`.
    pub fn new(canvas: Canvas, clear: Rgba8) -> RoadreelResult<Self> {
        validate_canvas(canvas)?;
        Ok(Self {
            pixels: image::RgbaImage::from_pixel(
                canvas.width,
                canvas.height,
                image::Rgba(clear.to_array()),
            ),
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Current color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let (x, y) = self.index(x, y)?;
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Rgba8 { r, g, b, a })
    }

    /// Blend `color` over the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let Some((x, y)) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels.get_pixel_mut(x, y);
        let [dr, dg, db, da] = dst.0;
        dst.0 = [
            blend_channel(color.r, dr, color.a),
            blend_channel(color.g, dg, color.a),
            blend_channel(color.b, db, color.a),
            blend_alpha(color.a, da),
        ];
    }

    /// Blend `color` with its alpha scaled by `coverage` (0-255).
    pub fn blend_coverage(&mut self, x: i32, y: i32, color: Rgba8, coverage: u8) {
        let a = mul_div255_u8(u16::from(color.a), u16::from(coverage));
        self.blend_pixel(x, y, color.with_alpha(a));
    }

    /// Blend `color` over the half-open pixel rectangle `[x0, x1) x [y0, y1)`, clipped to the
    /// surface.
    pub fn blend_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let w = self.pixels.width() as i32;
        let h = self.pixels.height() as i32;
        for y in y0.max(0)..y1.min(h) {
            for x in x0.max(0)..x1.min(w) {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Consume the surface into a frame buffer.
    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.pixels.width(),
            height: self.pixels.height(),
            data: self.pixels.into_raw(),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.pixels.width() && y < self.pixels.height()).then_some((x, y))
    }
}

pub(crate) fn validate_canvas(canvas: Canvas) -> RoadreelResult<()> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(RoadreelError::validation("canvas width/height must be > 0"));
    }
    if canvas.width > MAX_CANVAS_EDGE || canvas.height > MAX_CANVAS_EDGE {
        return Err(RoadreelError::validation(format!(
            "canvas {}x{} exceeds the {MAX_CANVAS_EDGE}px edge limit",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
