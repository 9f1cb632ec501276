use crate::foundation::error::{RoadreelError, RoadreelResult};
use crate::render::raster::DashPattern;

/// Colors, stroke widths and dash patterns of every layer.
///
/// Opacity factors are whole percentages applied to a layer's timeline opacity with
/// truncation, e.g. the grid draws at `floor(opacity * 15 / 100)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    /// Road bed color.
    pub road_color: [u8; 3],
    /// Road bed stroke width in pixels.
    pub road_width: f64,

    /// Lane marking color.
    pub lane_color: [u8; 3],
    /// Lane marking stroke width.
    pub lane_width: f64,
    /// Lane marking dashes; the phase stays fixed.
    pub lane_dash: DashPattern,

    /// Grid line color.
    pub grid_color: [u8; 3],
    /// Spacing between grid lines; must be at least 1.
    pub grid_pitch: u32,
    /// Thickness of each grid line.
    pub grid_line_width: u32,
    /// Share of the grid layer opacity the lines draw at.
    pub grid_opacity_percent: u8,

    /// Perpendicular distance of each flow lane from the centerline.
    pub flow_offset: f64,
    /// Width of the solid base line under each flow lane.
    pub flow_base_width: f64,
    /// Share of the traffic opacity the base line draws at.
    pub flow_base_opacity_percent: u8,
    /// Width of the moving flow dashes.
    pub flow_dash_width: f64,
    /// Share of the traffic opacity the flow dashes draw at.
    pub flow_dash_opacity_percent: u8,
    /// Flow dash pattern; its phase is replaced every frame.
    pub flow_dash: DashPattern,
    /// Distance the flow dashes travel over the whole timeline.
    pub flow_dash_cycle: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            road_color: [31, 41, 55],
            road_width: 24.0,

            lane_color: [255, 255, 255],
            lane_width: 2.0,
            lane_dash: DashPattern::new(20.0, 15.0),

            grid_color: [59, 130, 246],
            grid_pitch: 100,
            grid_line_width: 1,
            grid_opacity_percent: 15,

            flow_offset: 5.0,
            flow_base_width: 5.0,
            flow_base_opacity_percent: 30,
            flow_dash_width: 4.0,
            flow_dash_opacity_percent: 90,
            flow_dash: DashPattern::new(8.0, 12.0),
            flow_dash_cycle: 20.0,
        }
    }
}

impl Style {
    pub(crate) fn validate(&self) -> RoadreelResult<()> {
        for (name, w) in [
            ("road_width", self.road_width),
            ("lane_width", self.lane_width),
            ("flow_base_width", self.flow_base_width),
            ("flow_dash_width", self.flow_dash_width),
        ] {
            if !w.is_finite() || w <= 0.0 {
                return Err(RoadreelError::validation(format!(
                    "style {name} must be finite and > 0"
                )));
            }
        }
        for (name, d) in [("lane_dash", self.lane_dash), ("flow_dash", self.flow_dash)] {
            if !d.dash.is_finite() || !d.gap.is_finite() || d.dash <= 0.0 || d.gap < 0.0 {
                return Err(RoadreelError::validation(format!(
                    "style {name} needs dash > 0 and gap >= 0"
                )));
            }
        }
        if !self.flow_offset.is_finite() || !self.flow_dash_cycle.is_finite() {
            return Err(RoadreelError::validation(
                "style flow_offset/flow_dash_cycle must be finite",
            ));
        }
        if self.grid_pitch == 0 || self.grid_line_width == 0 {
            return Err(RoadreelError::validation(
                "style grid_pitch and grid_line_width must be >= 1",
            ));
        }
        for (name, pct) in [
            ("grid_opacity_percent", self.grid_opacity_percent),
            ("flow_base_opacity_percent", self.flow_base_opacity_percent),
            ("flow_dash_opacity_percent", self.flow_dash_opacity_percent),
        ] {
            if pct > 100 {
                return Err(RoadreelError::validation(format!(
                    "style {name} must be <= 100"
                )));
            }
        }
        Ok(())
    }
}
