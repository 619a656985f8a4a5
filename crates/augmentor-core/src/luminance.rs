//! Luma calculation using ITU-R BT.601 weights.
//!
//! Grayscale conversion, contrast means and color desaturation all share the
//! same 8-bit luma so that they agree with each other.

/// BT.601 weights (0.299, 0.587, 0.114) in 16.16 fixed point, summing to 65536.
const FIXED_R: u32 = 19595;
const FIXED_G: u32 = 38470;
const FIXED_B: u32 = 7471;

/// Calculate the 8-bit luma of an RGB pixel.
///
/// Uses rounded 16.16 fixed-point arithmetic, so gray inputs map to
/// themselves exactly.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * FIXED_R + g as u32 * FIXED_G + b as u32 * FIXED_B + 0x8000;
    (sum >> 16) as u8
}

/// Mean luma of an RGB buffer, rounded to the nearest integer.
///
/// Returns 0 for an empty buffer.
pub fn mean_luma(pixels: &[u8]) -> u8 {
    let count = pixels.len() / 3;
    if count == 0 {
        return 0;
    }
    let total: u64 = pixels
        .chunks_exact(3)
        .map(|p| luma_u8(p[0], p[1], p[2]) as u64)
        .sum();
    ((total as f64 / count as f64) + 0.5) as u8
}
