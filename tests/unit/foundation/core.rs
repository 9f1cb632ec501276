use super::*;

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
    let r = FrameRange::new(FrameIndex(2), FrameIndex(6)).unwrap();
    assert_eq!(r.len_frames(), 4);
    assert!(r.contains(FrameIndex(2)));
    assert!(!r.contains(FrameIndex(6)));
}

#[test]
fn full_range_starts_at_zero() {
    let r = FrameRange::full(120);
    assert_eq!(r.start, FrameIndex(0));
    assert_eq!(r.len_frames(), 120);
    assert!(FrameRange::full(0).is_empty());
}

#[test]
fn default_canvas_is_full_hd() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1920, 1080));
    assert_eq!(c.rgba_len(), 1920 * 1080 * 4);
}

#[test]
fn rgba8_with_alpha_keeps_rgb() {
    let c = Rgba8::rgb(16, 185, 129).with_alpha(76);
    assert_eq!(c.to_array(), [16, 185, 129, 76]);
    assert_eq!(Rgba8::from([1, 2, 3]), Rgba8::rgba(1, 2, 3, 255));
}
