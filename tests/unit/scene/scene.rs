use super::*;
use crate::geo::corridor::TrafficLevel;

#[test]
fn default_scene_is_the_perth_set() {
    let scene = SceneDef::default();
    assert_eq!(scene.canvas, Canvas::default());
    assert_eq!(scene.frames, 120);
    assert_eq!(scene.background(), Rgba8::rgb(10, 15, 30));
    let names: Vec<&str> = scene.corridors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Mounts Bay Rd", "Stirling Hwy", "Mitchell Fwy"]);
    assert_eq!(scene.corridors[0].points.len(), 19);
    assert_eq!(scene.corridors[1].points.len(), 9);
    assert_eq!(scene.corridors[2].points.len(), 23);
    scene.validate().unwrap();
}

#[test]
fn empty_json_object_yields_defaults() {
    let scene = SceneDef::from_json_str("{}").unwrap();
    assert_eq!(scene, SceneDef::default());
}

#[test]
fn json_overrides_keep_corridor_order() {
    let scene = SceneDef::from_json_str(
        r#"{
            "canvas": { "width": 320, "height": 180 },
            "frames": 8,
            "corridors": [
                { "name": "zeta", "points": [[-31.95, 115.80], [-31.94, 115.82]] },
                { "name": "alpha", "points": [[-31.99, 115.79], [-31.97, 115.84]], "level": "gridlock" }
            ],
            "style": { "road_width": 12.0 }
        }"#,
    )
    .unwrap();
    assert_eq!(scene.canvas.width, 320);
    assert_eq!(scene.frames, 8);
    assert_eq!(scene.corridors[0].name, "zeta");
    assert_eq!(scene.corridors[1].level, Some(TrafficLevel::Gridlock));
    assert_eq!(scene.style.road_width, 12.0);
    assert_eq!(scene.style.lane_width, Style::default().lane_width);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SceneDef::from_json_str(r#"{ "frame_count": 3 }"#).unwrap_err();
    assert!(matches!(err, RoadreelError::Serde(_)));
}

#[test]
fn invalid_scenes_fail_validation() {
    let mut s = SceneDef::default();
    s.frames = 0;
    assert!(matches!(s.validate(), Err(RoadreelError::Validation(_))));

    let mut s = SceneDef::default();
    s.canvas.height = 0;
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.corridors.clear();
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.corridors[1].name = s.corridors[0].name.clone();
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.corridors[0].points[0].lat = 89.0;
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.style.flow_dash.dash = 0.0;
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.style.grid_opacity_percent = 101;
    assert!(s.validate().is_err());

    let mut s = SceneDef::default();
    s.style.grid_pitch = 0;
    assert!(s.validate().is_err());
}

#[test]
fn short_corridors_pass_validation() {
    let mut s = SceneDef::default();
    s.corridors.push(Corridor::new("stub", [[-31.96, 115.83]]));
    s.validate().unwrap();
}

#[test]
fn from_path_reports_missing_file() {
    let err = SceneDef::from_path("target/does-not-exist/scene.json").unwrap_err();
    assert!(err.to_string().contains("scene.json"));
}
