//! Enhancement factors: brightness, contrast, sharpness and color.
//!
//! Every enhancement blends the image with a "degenerate" version of itself:
//!
//! ```text
//! output = degenerate + (image - degenerate) * factor
//! ```
//!
//! A factor of 1.0 returns the image unchanged, 0.0 returns the degenerate
//! image, and values above 1.0 push away from it.
//!
//! | Enhancement | Degenerate image |
//! |---|---|
//! | Brightness | black |
//! | Contrast | solid gray at the mean luma |
//! | Sharpness | smoothed image (factor 2.0 sharpens) |
//! | Color | grayscale image |
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Sharpness
//! 4. Color

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::luminance::{luma_u8, mean_luma};
use crate::transform::smooth;

/// Multiplicative enhancement factors. 1.0 means unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enhancements {
    /// Color saturation. 0.0 is black and white.
    pub color: f64,
    /// Brightness. 0.0 is black.
    pub brightness: f64,
    /// Contrast. 0.0 is solid gray.
    pub contrast: f64,
    /// Sharpness. 0.0 is blurred, 2.0 is sharpened.
    pub sharpness: f64,
}

impl Default for Enhancements {
    fn default() -> Self {
        Self {
            color: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            sharpness: 1.0,
        }
    }
}

impl Enhancements {
    /// Check if all factors are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Factors paired with their names, for validation messages.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("color", self.color),
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("sharpness", self.sharpness),
        ]
    }
}

/// Apply all enhancements in order, skipping factors equal to 1.0.
pub fn apply_enhancements(image: &DecodedImage, factors: &Enhancements) -> DecodedImage {
    // Early exit if no adjustments
    if factors.is_default() {
        return image.clone();
    }

    let mut result = image.clone();
    if factors.brightness != 1.0 {
        result = apply_brightness(&result, factors.brightness);
    }
    if factors.contrast != 1.0 {
        result = apply_contrast(&result, factors.contrast);
    }
    if factors.sharpness != 1.0 {
        result = apply_sharpness(&result, factors.sharpness);
    }
    if factors.color != 1.0 {
        result = apply_color(&result, factors.color);
    }
    result
}

/// Scale every channel by `factor` (blend from black).
pub fn apply_brightness(image: &DecodedImage, factor: f64) -> DecodedImage {
    let pixels = image.pixels.iter().map(|&p| blend(0, p, factor)).collect();
    DecodedImage::new(image.width, image.height, pixels)
}

/// Blend from a solid gray at the image's mean luma.
pub fn apply_contrast(image: &DecodedImage, factor: f64) -> DecodedImage {
    let mean = mean_luma(&image.pixels);
    let pixels = image.pixels.iter().map(|&p| blend(mean, p, factor)).collect();
    DecodedImage::new(image.width, image.height, pixels)
}

/// Blend from the smoothed image.
pub fn apply_sharpness(image: &DecodedImage, factor: f64) -> DecodedImage {
    let blurred = smooth(image);
    let pixels = blurred
        .pixels
        .iter()
        .zip(&image.pixels)
        .map(|(&soft, &p)| blend(soft, p, factor))
        .collect();
    DecodedImage::new(image.width, image.height, pixels)
}

/// Blend from the grayscale image.
pub fn apply_color(image: &DecodedImage, factor: f64) -> DecodedImage {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for chunk in image.pixels.chunks_exact(3) {
        let gray = luma_u8(chunk[0], chunk[1], chunk[2]);
        pixels.extend(chunk.iter().map(|&p| blend(gray, p, factor)));
    }
    DecodedImage::new(image.width, image.height, pixels)
}

/// `degenerate + (value - degenerate) * factor`, rounded and clamped.
#[inline]
fn blend(degenerate: u8, value: u8, factor: f64) -> u8 {
    let d = degenerate as f64;
    (d + (value as f64 - d) * factor).round().clamp(0.0, 255.0) as u8
}
