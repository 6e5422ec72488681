//! YUV to RGB conversion shared by every YUV kernel
//!
//! There is exactly one color law. The unsigned entry point removes the chroma bias and
//! forwards to the centered one, so both produce identical pixels for the same logical color.

use super::Rgba;

/// Chroma bias of 8 bit YUV samples
pub(crate) const CHROMA_OFFSET: i32 = 128;

// Y scale and chroma weights (BT.601, studio swing luma scale)
const Y_SCALE: f32 = 1.164;
const R_FROM_V: f32 = 1.596;
const G_FROM_U: f32 = 0.391;
const G_FROM_V: f32 = 0.813;
const B_FROM_U: f32 = 2.018;

/// Clamp a truncated channel value into `0..=255`
#[inline(always)]
pub(crate) fn clamp_channel(value: i32) -> u8 {
    if value > 255 {
        255
    } else if value < 0 {
        0
    } else {
        value as u8
    }
}

/// Convert luma and centered chroma (`u`, `v` in `-128..=127`) to an opaque RGBA pixel
///
/// Every channel is computed in `f32`, truncated towards zero and then clamped.
#[inline(always)]
pub fn yuv_to_rgba_centered(y: u8, u: i32, v: i32) -> Rgba {
    let y = Y_SCALE * y as f32;
    let u = u as f32;
    let v = v as f32;

    // `as i32` truncates towards zero, same as a C int cast for in-range values
    let r = (y + R_FROM_V * v) as i32;
    let g = (y - G_FROM_V * v - G_FROM_U * u) as i32;
    let b = (y + B_FROM_U * u) as i32;

    Rgba::opaque(clamp_channel(r), clamp_channel(g), clamp_channel(b))
}

/// Convert an unsigned YUV triple (chroma biased by 128) to an opaque RGBA pixel
#[inline(always)]
pub fn yuv_to_rgba(y: u8, u: u8, v: u8) -> Rgba {
    yuv_to_rgba_centered(
        y,
        i32::from(u) - CHROMA_OFFSET,
        i32::from(v) - CHROMA_OFFSET,
    )
}
