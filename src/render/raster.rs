//! Stroked polylines: solid paths, distance-continuous dash patterns and lane offsets.
//!
//! Every draw call strokes its whole path into one outline, rasterizes that outline into a
//! coverage mask and composites the mask once, so overlapping segments and round joins of a
//! translucent stroke never darken where they overlap.

use kurbo::{BezPath, Cap, Join, PathEl, Shape as _, Stroke, StrokeOpts};

use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::geo::projection::ScreenPoint;
use crate::render::surface::Surface;

/// Dash pattern measured in pixels along the path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashPattern {
    /// Length of each drawn dash.
    pub dash: f64,
    /// Length of each gap between dashes.
    pub gap: f64,
    /// Shift of the pattern along the path; the first dash starts at `-phase` modulo the cycle.
    #[serde(default)]
    pub phase: f64,
}

impl DashPattern {
    /// Pattern with zero phase.
    pub const fn new(dash: f64, gap: f64) -> Self {
        Self {
            dash,
            gap,
            phase: 0.0,
        }
    }

    /// Same pattern shifted by `phase` pixels.
    pub const fn with_phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    /// `dash + gap`.
    pub fn cycle(&self) -> f64 {
        self.dash + self.gap
    }
}

/// Which of the two parallel lanes of a corridor; also the sign of its dash animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// `+1`: offset to the `(-dy, dx)` side of the centerline.
    Forward,
    /// `-1`: offset to the opposite side.
    Backward,
}

impl FlowDirection {
    /// Both lanes in drawing order.
    pub const BOTH: [FlowDirection; 2] = [Self::Forward, Self::Backward];

    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Draw a continuous stroked polyline with round joins and caps.
///
/// Paths with fewer than two points are skipped.
pub fn draw_solid_path(surface: &mut Surface, points: &[ScreenPoint], color: Rgba8, width: f64) {
    if points.len() < 2 || color.a == 0 || !width.is_finite() || width <= 0.0 {
        return;
    }
    let centers = pixel_centers(points);
    let segments = centers.windows(2).map(|w| (w[0], w[1]));
    fill_segments(surface, segments, color, width);
}

/// Draw a dashed polyline.
///
/// The pattern runs continuously in distance along the whole path rather than restarting at
/// each vertex, so a dash that straddles a vertex continues on the next segment. Dashes that
/// would start before the path start are dropped. Zero-length segments are skipped.
pub fn draw_dashed_path(
    surface: &mut Surface,
    points: &[ScreenPoint],
    color: Rgba8,
    width: f64,
    pattern: DashPattern,
) {
    if points.len() < 2 || color.a == 0 || !width.is_finite() || width <= 0.0 {
        return;
    }
    let dashes = dash_segments(&pixel_centers(points), pattern);
    fill_segments(surface, dashes, color, width);
}

/// Split a polyline into the sub-segments covered by `pattern`'s dashes.
pub fn dash_segments(points: &[Point], pattern: DashPattern) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    let cycle = pattern.cycle();
    if points.len() < 2
        || !cycle.is_finite()
        || pattern.dash <= 0.0
        || pattern.gap < 0.0
        || !pattern.phase.is_finite()
    {
        return out;
    }

    let mut dash_start = -pattern.phase.rem_euclid(cycle);
    if dash_start < 0.0 {
        dash_start += cycle;
    }

    let mut seg_start = 0.0;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let delta = b - a;
        let len = delta.length();
        if len == 0.0 {
            continue;
        }
        let dir = delta / len;
        let seg_end = seg_start + len;

        while dash_start < seg_end {
            let dash_end = dash_start + pattern.dash;
            let from = dash_start.max(seg_start);
            let to = dash_end.min(seg_end);
            if to > from {
                out.push((a + dir * (from - seg_start), a + dir * (to - seg_start)));
            }
            if dash_end > seg_end {
                // Dash continues on the next segment.
                break;
            }
            dash_start += cycle;
        }
        seg_start = seg_end;
    }
    out
}

/// Shift a polyline sideways to synthesize a parallel lane.
///
/// Each point after the first moves `distance` pixels along the incoming segment's direction
/// rotated by 90 degrees (`(dx, dy) -> (-dy, dx)`), negated for [`FlowDirection::Backward`].
/// The first point and points after a zero-length segment stay where they are.
pub fn offset_perpendicular(
    points: &[ScreenPoint],
    distance: f64,
    direction: FlowDirection,
) -> Vec<ScreenPoint> {
    let mut out = Vec::with_capacity(points.len());
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            out.push(p);
            continue;
        }
        let incoming = p.to_point() - points[i - 1].to_point();
        let len = incoming.length();
        if len == 0.0 {
            out.push(p);
            continue;
        }
        let normal = Vec2::new(-incoming.y, incoming.x) / len;
        let shifted = p.to_point() + normal * (distance * direction.sign());
        out.push(ScreenPoint::new(
            shifted.x.trunc() as i32,
            shifted.y.trunc() as i32,
        ));
    }
    out
}

fn pixel_centers(points: &[ScreenPoint]) -> Vec<Point> {
    points
        .iter()
        .map(|p| p.to_point() + Vec2::new(0.5, 0.5))
        .collect()
}

fn fill_segments(
    surface: &mut Surface,
    segments: impl IntoIterator<Item = (Point, Point)>,
    color: Rgba8,
    width: f64,
) {
    let mut path = BezPath::new();
    let mut pen: Option<Point> = None;
    for (a, b) in segments {
        if a == b {
            continue;
        }
        if pen != Some(a) {
            path.move_to(a);
        }
        path.line_to(b);
        pen = Some(b);
    }
    if pen.is_none() {
        return;
    }

    let style = Stroke::new(width)
        .with_join(Join::Round)
        .with_caps(Cap::Round);
    let outline = kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), STROKE_TOLERANCE);
    if let Some(mask) = CoverageMask::rasterize(&outline, surface.canvas()) {
        mask.composite(surface, color);
    }
}

const STROKE_TOLERANCE: f64 = 0.05;

/// Antialiased coverage of one stroke outline over its clipped bounding box.
///
/// The outline is filled opaque white on a transparent pixmap, so the alpha channel is the
/// coverage.
struct CoverageMask {
    x0: i32,
    y0: i32,
    width: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CoverageMask {
    fn rasterize(outline: &BezPath, canvas: Canvas) -> Option<Self> {
        let bbox = outline.bounding_box();
        if [bbox.x0, bbox.y0, bbox.x1, bbox.y1]
            .iter()
            .any(|v| !v.is_finite())
        {
            return None;
        }
        let x0 = (bbox.x0.floor() as i64).max(0);
        let y0 = (bbox.y0.floor() as i64).max(0);
        let x1 = (bbox.x1.ceil() as i64).min(i64::from(canvas.width));
        let y1 = (bbox.y1.ceil() as i64).min(i64::from(canvas.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let width = u16::try_from(x1 - x0).ok()?;
        let height = u16::try_from(y1 - y0).ok()?;
        let x0 = i32::try_from(x0).ok()?;
        let y0 = i32::try_from(y0).ok()?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -f64::from(x0),
            -f64::from(y0),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(outline));
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Some(Self {
            x0,
            y0,
            width,
            pixmap,
        })
    }

    fn composite(&self, surface: &mut Surface, color: Rgba8) {
        let w = usize::from(self.width);
        for (i, px) in self.pixmap.data_as_u8_slice().chunks_exact(4).enumerate() {
            let coverage = px[3];
            if coverage != 0 {
                let (col, row) = ((i % w) as i32, (i / w) as i32);
                surface.blend_coverage(self.x0 + col, self.y0 + row, color, coverage);
            }
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
