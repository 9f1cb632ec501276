use std::f64::consts::FRAC_PI_4;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::geo::corridor::{Corridor, GeoPoint};

/// Fraction of each axis' extent added on both sides of the corridor bounding box.
pub const BOUNDS_PADDING: f64 = 0.1;

/// Web-Mercator northing of a latitude given in degrees: `ln(tan(π/4 + lat/2))`.
pub fn mercator_northing(lat_deg: f64) -> f64 {
    (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln()
}

/// Padded geographic extent of a corridor set plus the matching Mercator northing range.
///
/// Only [`compute_bounds`] constructs this type, so every value has strictly positive
/// longitude, latitude and northing spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionBounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    min_merc_n: f64,
    max_merc_n: f64,
}

impl ProjectionBounds {
    /// Padded southern edge in degrees.
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Padded northern edge in degrees.
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Padded western edge in degrees.
    pub fn min_lng(&self) -> f64 {
        self.min_lng
    }

    /// Padded eastern edge in degrees.
    pub fn max_lng(&self) -> f64 {
        self.max_lng
    }

    /// Northing of the southern edge.
    pub fn min_merc_n(&self) -> f64 {
        self.min_merc_n
    }

    /// Northing of the northern edge.
    pub fn max_merc_n(&self) -> f64 {
        self.max_merc_n
    }

    /// Project a geographic point onto a canvas of the given size.
    ///
    /// Higher latitudes map to smaller `y` (canvas row 0 is the top of the image). Points
    /// inside the bounds land in `[0, width) x [0, height)`; the far edges are clamped onto the
    /// last pixel row/column.
    pub fn project(&self, p: GeoPoint, canvas: Canvas) -> ScreenPoint {
        let x_frac = (p.lng - self.min_lng) / (self.max_lng - self.min_lng);
        let y_frac =
            (mercator_northing(p.lat) - self.min_merc_n) / (self.max_merc_n - self.min_merc_n);

        ScreenPoint {
            x: to_pixel(x_frac * f64::from(canvas.width), canvas.width),
            y: to_pixel((1.0 - y_frac) * f64::from(canvas.height), canvas.height),
        }
    }

    /// Project every point of a polyline.
    pub fn project_path(&self, points: &[GeoPoint], canvas: Canvas) -> Vec<ScreenPoint> {
        points.iter().map(|&p| self.project(p, canvas)).collect()
    }
}

fn to_pixel(v: f64, extent: u32) -> i32 {
    let max = i64::from(extent.max(1)) - 1;
    (v.floor() as i64).clamp(0, max) as i32
}

/// Integer pixel coordinate on the output canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    /// Column, increasing to the right.
    pub x: i32,
    /// Row, increasing downward.
    pub y: i32,
}

impl ScreenPoint {
    /// Create a screen point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same location as a floating-point [`Point`].
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Scan every point of every corridor, pad each axis by [`BOUNDS_PADDING`] of its extent, and
/// precompute the Mercator northing range.
///
/// Fails with [`RoadreelError::DegenerateBounds`] when there are no points or when either axis
/// has zero extent (a single point, or every point on one latitude or longitude).
pub fn compute_bounds(corridors: &[Corridor]) -> RoadreelResult<ProjectionBounds> {
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lng = f64::INFINITY;
    let mut max_lng = f64::NEG_INFINITY;
    let mut seen = 0usize;

    for corridor in corridors {
        for p in &corridor.points {
            if !p.lat.is_finite() || !p.lng.is_finite() {
                return Err(RoadreelError::validation(format!(
                    "corridor '{}' has a non-finite coordinate",
                    corridor.name
                )));
            }
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
            seen += 1;
        }
    }

    if seen == 0 {
        return Err(RoadreelError::degenerate_bounds("no corridor points"));
    }

    let lat_padding = (max_lat - min_lat) * BOUNDS_PADDING;
    let lng_padding = (max_lng - min_lng) * BOUNDS_PADDING;
    min_lat -= lat_padding;
    max_lat += lat_padding;
    min_lng -= lng_padding;
    max_lng += lng_padding;

    if max_lat - min_lat <= 0.0 {
        return Err(RoadreelError::degenerate_bounds(format!(
            "latitude extent is zero (all points at {min_lat})"
        )));
    }
    if max_lng - min_lng <= 0.0 {
        return Err(RoadreelError::degenerate_bounds(format!(
            "longitude extent is zero (all points at {min_lng})"
        )));
    }

    let min_merc_n = mercator_northing(min_lat);
    let max_merc_n = mercator_northing(max_lat);
    if !min_merc_n.is_finite() || !max_merc_n.is_finite() || max_merc_n - min_merc_n <= 0.0 {
        return Err(RoadreelError::degenerate_bounds(format!(
            "latitude range [{min_lat}, {max_lat}] has no usable Mercator extent"
        )));
    }

    Ok(ProjectionBounds {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
        min_merc_n,
        max_merc_n,
    })
}

/// Project `point` through `bounds` onto a `canvas`-sized image.
pub fn project(point: GeoPoint, bounds: &ProjectionBounds, canvas: Canvas) -> ScreenPoint {
    bounds.project(point, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
