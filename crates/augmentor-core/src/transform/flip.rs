//! Mirror operations, backed by `image::imageops`.

use crate::decode::DecodedImage;
use crate::error::{AugmentError, Result};

fn to_buffer(image: &DecodedImage) -> Result<image::RgbImage> {
    image
        .to_rgb_image()
        .ok_or_else(|| AugmentError::config("pixel buffer does not match image dimensions"))
}

/// Mirror an image left-right.
pub fn flip_horizontal(image: &DecodedImage) -> Result<DecodedImage> {
    let buffer = to_buffer(image)?;
    Ok(DecodedImage::from_rgb_image(image::imageops::flip_horizontal(
        &buffer,
    )))
}

/// Mirror an image top-bottom.
pub fn flip_vertical(image: &DecodedImage) -> Result<DecodedImage> {
    let buffer = to_buffer(image)?;
    Ok(DecodedImage::from_rgb_image(image::imageops::flip_vertical(
        &buffer,
    )))
}
