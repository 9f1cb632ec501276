use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RoadreelError::degenerate_bounds("x")
            .to_string()
            .contains("degenerate projection bounds:")
    );
    assert!(
        RoadreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RoadreelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn frame_write_keeps_path_and_source() {
    let err = RoadreelError::frame_write("out/a_0001.png", std::io::Error::other("disk full"));
    assert!(err.to_string().contains("a_0001.png"));
    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RoadreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
