use super::*;

fn at(frame: u64) -> PhaseState {
    phase_for(FrameIndex(frame), 120).unwrap()
}

#[test]
fn first_frame_is_fully_transparent() {
    let s = at(0);
    assert_eq!(s.phase, Phase::RoadFadeIn);
    assert_eq!(s.opacity, LayerOpacity::default());
    assert_eq!(s.progress, 0.0);
}

#[test]
fn last_frame_has_every_layer_near_full() {
    let s = at(119);
    assert_eq!(s.phase, Phase::TrafficFlow);
    assert_eq!(s.opacity.road, 255);
    assert_eq!(s.opacity.lane, 255);
    assert_eq!(s.opacity.grid, 255);
    // floor(29 / 30 * 255)
    assert_eq!(s.opacity.traffic, 246);
    assert!((s.progress - 119.0 / 120.0).abs() < 1e-12);
}

#[test]
fn frame_45_has_full_road_and_half_lanes() {
    let s = at(45);
    assert_eq!(s.phase, Phase::LaneMarkings);
    assert_eq!(s.opacity.road, 255);
    assert_eq!(s.opacity.lane, 127);
    assert_eq!(s.opacity.grid, 0);
    assert_eq!(s.opacity.traffic, 0);
}

#[test]
fn phase_boundaries_for_120_frames() {
    assert_eq!(at(29).phase, Phase::RoadFadeIn);
    assert_eq!(at(29).opacity.road, 246);
    assert_eq!(at(30).phase, Phase::LaneMarkings);
    assert_eq!(at(30).opacity.lane, 0);
    assert_eq!(at(60).phase, Phase::GridOverlay);
    assert_eq!(at(90).phase, Phase::TrafficFlow);
    assert_eq!(at(90).opacity.traffic, 0);
}

#[test]
fn completed_layers_stay_opaque_and_ramps_never_decrease() {
    let tl = Timeline::new(120).unwrap();
    let mut prev = tl.state_at(FrameIndex(0));
    for f in 1..120 {
        let s = tl.state_at(FrameIndex(f));
        assert!(s.phase >= prev.phase);
        assert!(s.opacity.road >= prev.opacity.road);
        assert!(s.opacity.lane >= prev.opacity.lane);
        assert!(s.opacity.grid >= prev.opacity.grid);
        assert!(s.opacity.traffic >= prev.opacity.traffic);
        assert!(s.progress > prev.progress);
        prev = s;
    }
}

#[test]
fn state_is_a_pure_function_of_its_inputs() {
    for f in [0u64, 17, 45, 89, 119] {
        assert_eq!(at(f), at(f));
    }
}

#[test]
fn frames_past_the_end_clamp_to_the_last_frame() {
    assert_eq!(at(500), at(119));
}

#[test]
fn zero_frames_is_rejected() {
    assert!(matches!(
        phase_for(FrameIndex(0), 0),
        Err(RoadreelError::Validation(_))
    ));
}

#[test]
fn uneven_frame_counts_still_cover_all_phases() {
    let tl = Timeline::new(10).unwrap();
    let phases: Vec<Phase> = (0..10).map(|f| tl.state_at(FrameIndex(f)).phase).collect();
    for p in Phase::ALL {
        assert!(phases.contains(&p));
    }

    let mut covered = 0;
    for p in Phase::ALL {
        let w = tl.window(p);
        for f in w.start.0..w.end.0 {
            assert_eq!(tl.state_at(FrameIndex(f)).phase, p);
        }
        covered += w.len_frames();
    }
    assert_eq!(covered, 10);
}

#[test]
fn windows_for_120_frames_are_30_each() {
    let tl = Timeline::new(120).unwrap();
    assert_eq!(tl.window(Phase::RoadFadeIn), FrameRange::full(30));
    let w = tl.window(Phase::TrafficFlow);
    assert_eq!((w.start.0, w.end.0), (90, 120));
    assert_eq!(tl.range().len_frames(), 120);
}

#[test]
fn single_frame_timeline() {
    let s = phase_for(FrameIndex(0), 1).unwrap();
    assert_eq!(s.phase, Phase::RoadFadeIn);
    assert_eq!(s.opacity.road, 0);
}
