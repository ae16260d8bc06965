//! Full-range BT.601 (JFIF) RGB <-> YCbCr conversion on `u8` samples.

use crate::rti_pipeline::common::plane::Plane;

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[inline]
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    [to_u8(y), to_u8(cb), to_u8(cr)]
}

#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = y as f32;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;
    [
        to_u8(y + 1.402 * cr),
        to_u8(y - 0.344136 * cb - 0.714136 * cr),
        to_u8(y + 1.772 * cb),
    ]
}

/// Splits a 3-channel plane into single-channel Y, Cb and Cr planes.
pub fn split_ycbcr(rgb: &Plane) -> [Plane; 3] {
    debug_assert_eq!(rgb.channels, 3);
    let mut out = [
        Plane::new(rgb.width, rgb.height, 1),
        Plane::new(rgb.width, rgb.height, 1),
        Plane::new(rgb.width, rgb.height, 1),
    ];

    for (i, px) in rgb.data.chunks_exact(3).enumerate() {
        let [y, cb, cr] = rgb_to_ycbcr(px[0], px[1], px[2]);
        out[0].data[i] = y;
        out[1].data[i] = cb;
        out[2].data[i] = cr;
    }
    out
}

/// Joins single-channel Y, Cb and Cr planes of equal size into an RGB plane.
pub fn merge_ycbcr(y: &Plane, cb: &Plane, cr: &Plane) -> Plane {
    let mut rgb = Plane::new(y.width, y.height, 3);
    for (i, px) in rgb.data.chunks_exact_mut(3).enumerate() {
        px.copy_from_slice(&ycbcr_to_rgb(y.data[i], cb.data[i], cr.data[i]));
    }
    rgb
}
