use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn blend_channel_endpoints() {
    assert_eq!(blend_channel(200, 10, 255), 200);
    assert_eq!(blend_channel(200, 10, 0), 10);
}

#[test]
fn blend_channel_midpoint_is_average() {
    let mid = blend_channel(255, 0, 128);
    assert!((i32::from(mid) - 128).abs() <= 1);
}

#[test]
fn blend_alpha_over_opaque_stays_opaque() {
    for a in [0u8, 1, 77, 128, 254, 255] {
        assert_eq!(blend_alpha(a, 255), 255);
    }
    assert_eq!(blend_alpha(0, 0), 0);
    assert_eq!(blend_alpha(255, 0), 255);
}

#[test]
fn scale_u8_truncates() {
    // 255 * 0.15 = 38.25
    assert_eq!(scale_u8(255, 15, 100), 38);
    // 127 * 0.3 = 38.1
    assert_eq!(scale_u8(127, 3, 10), 38);
    assert_eq!(scale_u8(255, 9, 10), 229);
    assert_eq!(scale_u8(10, 1, 0), 0);
}
