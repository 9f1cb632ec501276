use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::RoadreelError;
use crate::geo::projection::compute_bounds;
use crate::timeline::LayerOpacity;

fn scene() -> SceneDef {
    SceneDef {
        canvas: Canvas {
            width: 320,
            height: 180,
        },
        frames: 120,
        corridors: vec![
            Corridor::new(
                "north",
                [[-31.95, 115.80], [-31.94, 115.82], [-31.93, 115.85]],
            ),
            Corridor::new(
                "south",
                [[-31.99, 115.79], [-31.98, 115.81], [-31.97, 115.84]],
            ),
        ],
        ..SceneDef::default()
    }
}

fn render(scene: &SceneDef, frame: u64) -> FrameRGBA {
    let bounds = compute_bounds(&scene.corridors).unwrap();
    render_frame(scene, &bounds, FrameIndex(frame)).unwrap()
}

fn count_px(frame: &FrameRGBA, rgba: [u8; 4]) -> usize {
    frame.data.chunks_exact(4).filter(|px| *px == rgba).count()
}

const BG: [u8; 4] = [10, 15, 30, 255];

#[test]
fn first_frame_is_background_only() {
    let f = render(&scene(), 0);
    assert_eq!(count_px(&f, BG), 320 * 180);
}

#[test]
fn road_fades_in_during_first_phase() {
    let s = scene();
    let early = render(&s, 5);
    let late = render(&s, 29);
    assert!(count_px(&early, BG) < 320 * 180);
    // A fully faded-in road is exactly road-colored at its centre; a faint one is not.
    assert_eq!(count_px(&early, [31, 41, 55, 255]), 0);
    assert!(count_px(&render(&s, 30), [31, 41, 55, 255]) > 0);
    assert_ne!(early, late);
}

#[test]
fn frame_45_has_full_road_and_partial_markings_but_no_grid() {
    let f = render(&scene(), 45);
    assert!(count_px(&f, [31, 41, 55, 255]) > 0);
    // Half-opacity white over the road bed: every channel between the road and white.
    let partial_marking = f
        .data
        .chunks_exact(4)
        .any(|px| px[..3].iter().all(|&c| c > 100 && c < 255));
    assert!(partial_marking);
    assert!(!f.data.chunks_exact(4).any(|px| px == [255, 255, 255, 255]));
    // Grid line at x = 0 is not drawn yet.
    assert_eq!(f.pixel(0, 50), Some(BG));
}

#[test]
fn grid_appears_in_third_phase() {
    let s = scene();
    let f = render(&s, 75);
    let px = f.pixel(0, 50).unwrap();
    assert_ne!(px, BG);
    assert!(px[2] > BG[2], "grid is blue-tinted");
    // Between grid lines the background is untouched.
    assert_eq!(f.pixel(50, 50), Some(BG));
    // Lane markings are fully opaque by now.
    assert!(f.data.chunks_exact(4).any(|px| px == [255, 255, 255, 255]));
}

#[test]
fn last_frame_shows_traffic_lanes() {
    let s = scene();
    let bounds = compute_bounds(&s.corridors).unwrap();
    let before = render(&s, 90);
    let after = render(&s, 119);
    assert_ne!(before, after);

    let mut no_traffic = Surface::new(s.canvas, s.background()).unwrap();
    let mut state = Timeline::new(120).unwrap().state_at(FrameIndex(119));
    state.opacity = LayerOpacity {
        traffic: 0,
        ..state.opacity
    };
    compose(&mut no_traffic, &s, &bounds, &state);
    assert_ne!(no_traffic.into_frame(), after);
}

#[test]
fn flow_dash_phase_tracks_progress_and_direction() {
    let style = Style::default();
    let fwd = flow_dash_phase(&style, 119.0 / 120.0, FlowDirection::Forward);
    let back = flow_dash_phase(&style, 119.0 / 120.0, FlowDirection::Backward);
    assert!((fwd - 20.0 * 119.0 / 120.0).abs() < 1e-12);
    assert_eq!(back, -fwd);
    assert_eq!(flow_dash_phase(&style, 0.0, FlowDirection::Forward), 0.0);
}

#[test]
fn traffic_dashes_move_between_frames() {
    let s = scene();
    assert_ne!(render(&s, 100), render(&s, 101));
}

#[test]
fn rendering_is_deterministic() {
    let s = scene();
    for f in [0, 45, 75, 119] {
        assert_eq!(render(&s, f), render(&s, f));
    }
}

#[test]
fn degenerate_corridors_are_skipped() {
    let plain = scene();
    let mut with_stubs = scene();
    with_stubs
        .corridors
        .push(Corridor::new("stub", [[-31.96, 115.82]]));
    with_stubs
        .corridors
        .push(Corridor::new("empty", Vec::<[f64; 2]>::new()));

    // The stub lies inside the existing extent, so bounds are unchanged.
    assert_eq!(
        compute_bounds(&plain.corridors).unwrap(),
        compute_bounds(&with_stubs.corridors).unwrap()
    );
    for f in [45, 119] {
        assert_eq!(render(&plain, f), render(&with_stubs, f));
    }
}

#[test]
fn corridor_levels_select_traffic_colors() {
    let mut a = scene();
    let mut b = scene();
    a.corridors[0].level = Some(crate::geo::corridor::TrafficLevel::Flowing);
    b.corridors[0].level = Some(crate::geo::corridor::TrafficLevel::Gridlock);
    assert_eq!(render(&a, 60), render(&b, 60));
    assert_ne!(render(&a, 119), render(&b, 119));
}

#[test]
fn unvalidated_zero_grid_pitch_is_rejected() {
    let mut s = scene();
    s.style.grid_pitch = 0;
    let bounds = compute_bounds(&s.corridors).unwrap();
    assert!(matches!(
        render_frame(&s, &bounds, FrameIndex(70)),
        Err(RoadreelError::Validation(_))
    ));
}

#[test]
fn compose_skips_the_grid_when_pitch_is_zero() {
    let mut s = scene();
    s.style.grid_pitch = 0;
    let bounds = compute_bounds(&s.corridors).unwrap();
    let state = Timeline::new(120).unwrap().state_at(FrameIndex(70));
    assert!(state.opacity.grid > 0);
    let mut surface = Surface::new(s.canvas, s.background()).unwrap();
    compose(&mut surface, &s, &bounds, &state);
    assert_eq!(surface.into_frame().pixel(0, 50), Some(BG));
}
