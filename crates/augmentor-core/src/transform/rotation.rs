//! Image rotation about the center.
//!
//! Positive angles rotate counter-clockwise. By default the canvas keeps its
//! size, so the rotated corners are clipped and the uncovered area is filled
//! with black. With `expand` the canvas grows to the rotated bounding box.
//!
//! # Algorithm
//!
//! Inverse mapping: for every output pixel center we compute the source
//! position it came from and sample there.
//!
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//!
//! where (dx, dy) is the output pixel center relative to the output center.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Fill color for areas not covered by the rotated image.
const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Interpolation filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel. Keeps hard edges, no new colors.
    #[default]
    Nearest,
    /// Bilinear interpolation of the 4 nearest pixels.
    Bilinear,
    /// Lanczos3 interpolation over a 6x6 neighborhood.
    Lanczos3,
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Multiples of 90 degrees are handled exactly.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let abs_angle = (angle_degrees % 360.0).abs();

    if abs_angle < 0.001 || (360.0 - abs_angle) < 0.001 || (abs_angle - 180.0).abs() < 0.001 {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();
    let (w, h) = (width as f64, height as f64);

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image counter-clockwise by `angle_degrees`.
///
/// Returns a clone when the angle is a whole number of turns.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
    expand: bool,
) -> DecodedImage {
    let turns = angle_degrees % 360.0;
    if turns.abs() < 0.001 || (360.0 - turns.abs()) < 0.001 || image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = if expand {
        compute_rotated_bounds(image.width, image.height, angle_degrees)
    } else {
        (image.width, image.height)
    };

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Vec::with_capacity((dst_w * dst_h * 3) as usize);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };
            output.extend_from_slice(&pixel);
        }
    }

    DecodedImage::new(dst_w, dst_h, output)
}

/// True if the continuous position lies on the image.
#[inline]
fn covers(image: &DecodedImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f64 && y < image.height as f64
}

/// Pixel at integer coordinates clamped to the image edge.
#[inline]
fn clamped_pixel(image: &DecodedImage, x: i64, y: i64) -> [f64; 3] {
    let px = x.clamp(0, image.width as i64 - 1) as u32;
    let py = y.clamp(0, image.height as i64 - 1) as u32;
    let [r, g, b] = image.pixel(px, py);
    [r as f64, g as f64, b as f64]
}

fn sample_nearest(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    if !covers(image, x, y) {
        return BACKGROUND;
    }
    image.pixel(x.floor() as u32, y.floor() as u32)
}

fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    if !covers(image, x, y) {
        return BACKGROUND;
    }

    // Shift to pixel-center coordinates
    let (sx, sy) = (x - 0.5, y - 0.5);
    let x0 = sx.floor() as i64;
    let y0 = sy.floor() as i64;
    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let p00 = clamped_pixel(image, x0, y0);
    let p10 = clamped_pixel(image, x0 + 1, y0);
    let p01 = clamped_pixel(image, x0, y0 + 1);
    let p11 = clamped_pixel(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}

fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    if !covers(image, x, y) {
        return BACKGROUND;
    }

    let (sx, sy) = (x - 0.5, y - 0.5);
    let x0 = sx.floor() as i64;
    let y0 = sy.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(sx - px as f64, 3.0) * lanczos_weight(sy - py as f64, 3.0);

            let pixel = clamped_pixel(image, px, py);
            for i in 0..3 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_nearest(image, x, y);
    }

    let mut result = [0u8; 3];
    for i in 0..3 {
        result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
    }
    result
}

/// Lanczos kernel: `sinc(x) * sinc(x / a)` for `|x| < a`, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    (a * pi_x.sin() * (pi_x / a).sin()) / (pi_x * pi_x)
}
