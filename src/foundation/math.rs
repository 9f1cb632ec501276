pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Straight-alpha "over" for one color channel: `src * a + dst * (255 - a)`, rounded.
pub(crate) fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    let sum = mul_div255_u16(u16::from(src), a) + mul_div255_u16(u16::from(dst), 255 - a);
    sum.min(255) as u8
}

/// Resulting alpha of straight-alpha "over": `a + dst_a * (255 - a)`.
pub(crate) fn blend_alpha(src_a: u8, dst_a: u8) -> u8 {
    let a = u16::from(src_a);
    (a + mul_div255_u16(u16::from(dst_a), 255 - a)).min(255) as u8
}

/// `floor(value * num / den)` on opacity bytes, clamped to `u8`.
pub(crate) fn scale_u8(value: u8, num: u32, den: u32) -> u8 {
    if den == 0 {
        return 0;
    }
    ((u32::from(value) * num) / den).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
