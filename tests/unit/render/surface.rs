use super::*;

const SMALL: Canvas = Canvas {
    width: 4,
    height: 3,
};

#[test]
fn new_surface_is_filled_with_clear_color() {
    let s = Surface::new(SMALL, Rgba8::rgb(10, 15, 30)).unwrap();
    let frame = s.into_frame();
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| px == [10, 15, 30, 255])
    );
}

#[test]
fn zero_and_oversized_canvases_are_rejected() {
    let zero = Canvas {
        width: 0,
        height: 10,
    };
    assert!(matches!(
        Surface::new(zero, Rgba8::rgb(0, 0, 0)),
        Err(RoadreelError::Validation(_))
    ));
    let huge = Canvas {
        width: MAX_CANVAS_EDGE + 1,
        height: 1,
    };
    assert!(Surface::new(huge, Rgba8::rgb(0, 0, 0)).is_err());
}

#[test]
fn blend_pixel_is_straight_alpha_over() {
    let mut s = Surface::new(SMALL, Rgba8::rgb(0, 0, 255)).unwrap();
    s.blend_pixel(1, 1, Rgba8::rgba(255, 0, 0, 128));
    let px = s.pixel(1, 1).unwrap();
    assert_eq!(px.a, 255);
    assert!((i32::from(px.r) - 128).abs() <= 1);
    assert_eq!(px.g, 0);
    assert!((i32::from(px.b) - 127).abs() <= 1);

    // Untouched neighbours keep the lower layer.
    assert_eq!(s.pixel(0, 0), Some(Rgba8::rgb(0, 0, 255)));
}

#[test]
fn transparent_and_out_of_bounds_writes_are_ignored() {
    let mut s = Surface::new(SMALL, Rgba8::rgb(1, 2, 3)).unwrap();
    s.blend_pixel(0, 0, Rgba8::rgba(255, 255, 255, 0));
    s.blend_pixel(-1, 0, Rgba8::rgb(255, 255, 255));
    s.blend_pixel(4, 0, Rgba8::rgb(255, 255, 255));
    s.blend_pixel(0, 3, Rgba8::rgb(255, 255, 255));
    assert!(s.into_frame().data.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn blend_rect_clips_to_surface() {
    let mut s = Surface::new(SMALL, Rgba8::rgb(0, 0, 0)).unwrap();
    s.blend_rect(2, -5, 100, 1, Rgba8::rgb(9, 9, 9));
    assert_eq!(s.pixel(2, 0), Some(Rgba8::rgb(9, 9, 9)));
    assert_eq!(s.pixel(3, 0), Some(Rgba8::rgb(9, 9, 9)));
    assert_eq!(s.pixel(1, 0), Some(Rgba8::rgb(0, 0, 0)));
    assert_eq!(s.pixel(2, 1), Some(Rgba8::rgb(0, 0, 0)));
}

#[test]
fn coverage_scales_alpha() {
    let mut full = Surface::new(SMALL, Rgba8::rgb(0, 0, 0)).unwrap();
    let mut half = full.clone();
    full.blend_coverage(0, 0, Rgba8::rgb(200, 200, 200), 255);
    half.blend_coverage(0, 0, Rgba8::rgb(200, 200, 200), 128);
    assert_eq!(full.pixel(0, 0).unwrap().r, 200);
    assert!((i32::from(half.pixel(0, 0).unwrap().r) - 100).abs() <= 1);
}

#[test]
fn frame_pixel_lookup_and_flatten() {
    let mut s = Surface::new(SMALL, Rgba8::rgba(0, 0, 0, 0)).unwrap();
    s.blend_pixel(3, 2, Rgba8::rgb(40, 50, 60));
    let frame = s.into_frame();
    assert_eq!(frame.pixel(3, 2), Some([40, 50, 60, 255]));
    assert_eq!(frame.pixel(4, 0), None);

    let rgb = frame.flatten_rgb(Rgba8::rgb(10, 15, 30));
    assert_eq!(rgb.len(), 4 * 3 * 3);
    assert_eq!(&rgb[0..3], &[10, 15, 30]);
    let last = rgb.len() - 3;
    assert_eq!(&rgb[last..], &[40, 50, 60]);
}
