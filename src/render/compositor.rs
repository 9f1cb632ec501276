use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::RoadreelResult;
use crate::foundation::math::scale_u8;
use crate::geo::corridor::Corridor;
use crate::geo::projection::{ProjectionBounds, ScreenPoint};
use crate::render::raster::{
    FlowDirection, draw_dashed_path, draw_solid_path, offset_perpendicular,
};
use crate::render::surface::{FrameRGBA, Surface};
use crate::scene::{SceneDef, Style};
use crate::timeline::{PhaseState, Timeline};

/// A drawable corridor projected onto this frame's canvas.
struct ProjectedCorridor<'a> {
    /// Position in the scene's corridor list (drives the default traffic level).
    index: usize,
    corridor: &'a Corridor,
    points: Vec<ScreenPoint>,
}

/// Render one frame of `scene` from scratch.
///
/// Pure in `(scene, bounds, frame)`: the surface is created fresh, nothing outside the
/// returned buffer is touched, and the same inputs always produce the same bytes. The scene is
/// validated first; an invalid style or canvas is a [`RoadreelError::Validation`].
///
/// [`RoadreelError::Validation`]: crate::RoadreelError::Validation
#[tracing::instrument(level = "debug", skip_all, fields(frame = frame.0))]
pub fn render_frame(
    scene: &SceneDef,
    bounds: &ProjectionBounds,
    frame: FrameIndex,
) -> RoadreelResult<FrameRGBA> {
    scene.validate()?;
    let timeline = Timeline::new(scene.frames)?;
    let state = timeline.state_at(frame);
    tracing::debug!(
        phase = ?state.phase,
        road = state.opacity.road,
        lane = state.opacity.lane,
        grid = state.opacity.grid,
        traffic = state.opacity.traffic,
        "compose frame"
    );

    let mut surface = Surface::new(scene.canvas, scene.background())?;
    compose(&mut surface, scene, bounds, &state);
    Ok(surface.into_frame())
}

/// Draw every active layer bottom to top: road bed, lane markings, grid, traffic flow.
pub fn compose(
    surface: &mut Surface,
    scene: &SceneDef,
    bounds: &ProjectionBounds,
    state: &PhaseState,
) {
    let canvas = surface.canvas();
    let corridors: Vec<ProjectedCorridor<'_>> = scene
        .corridors
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_drawable())
        .map(|(index, corridor)| ProjectedCorridor {
            index,
            corridor,
            points: bounds.project_path(&corridor.points, canvas),
        })
        .collect();

    let style = &scene.style;
    let op = state.opacity;
    if op.road > 0 {
        draw_roads(surface, &corridors, style, op.road);
    }
    if op.lane > 0 {
        draw_lane_markings(surface, &corridors, style, op.lane);
    }
    if op.grid > 0 {
        draw_grid(surface, style, op.grid);
    }
    if op.traffic > 0 {
        draw_traffic_flow(surface, &corridors, style, state.progress, op.traffic);
    }
}

/// Dash shift of one flow lane at timeline `progress`.
pub fn flow_dash_phase(style: &Style, progress: f64, direction: FlowDirection) -> f64 {
    progress * style.flow_dash_cycle * direction.sign()
}

fn draw_roads(surface: &mut Surface, corridors: &[ProjectedCorridor<'_>], style: &Style, op: u8) {
    let color = Rgba8::from(style.road_color).with_alpha(op);
    for c in corridors {
        draw_solid_path(surface, &c.points, color, style.road_width);
    }
}

fn draw_lane_markings(
    surface: &mut Surface,
    corridors: &[ProjectedCorridor<'_>],
    style: &Style,
    op: u8,
) {
    let color = Rgba8::from(style.lane_color).with_alpha(op);
    for c in corridors {
        draw_dashed_path(surface, &c.points, color, style.lane_width, style.lane_dash);
    }
}

fn draw_grid(surface: &mut Surface, style: &Style, op: u8) {
    let alpha = scale_u8(op, u32::from(style.grid_opacity_percent), 100);
    if alpha == 0 {
        return;
    }
    let color = Rgba8::from(style.grid_color).with_alpha(alpha);
    let canvas = surface.canvas();
    let (w, h) = (canvas.width as i32, canvas.height as i32);
    let pitch = style.grid_pitch as usize;
    let line = style.grid_line_width as i32;
    if pitch == 0 {
        return;
    }

    for x in (0..w).step_by(pitch) {
        surface.blend_rect(x, 0, x + line, h, color);
    }
    for y in (0..h).step_by(pitch) {
        surface.blend_rect(0, y, w, y + line, color);
    }
}

fn draw_traffic_flow(
    surface: &mut Surface,
    corridors: &[ProjectedCorridor<'_>],
    style: &Style,
    progress: f64,
    op: u8,
) {
    let base_alpha = scale_u8(op, u32::from(style.flow_base_opacity_percent), 100);
    let dash_alpha = scale_u8(op, u32::from(style.flow_dash_opacity_percent), 100);

    for c in corridors {
        let color = c.corridor.level_or_cycle(c.index).color();
        for direction in FlowDirection::BOTH {
            let lane = offset_perpendicular(&c.points, style.flow_offset, direction);
            draw_solid_path(
                surface,
                &lane,
                color.with_alpha(base_alpha),
                style.flow_base_width,
            );
            let pattern = style
                .flow_dash
                .with_phase(flow_dash_phase(style, progress, direction));
            draw_dashed_path(
                surface,
                &lane,
                color.with_alpha(dash_alpha),
                style.flow_dash_width,
                pattern,
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
