//! Final resize to the target size, using the `image` crate's resamplers.

use crate::decode::{DecodedImage, FilterType};
use crate::error::{AugmentError, Result};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `AugmentError::Configuration` for a zero target dimension.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage> {
    if width == 0 || height == 0 {
        return Err(AugmentError::config(format!(
            "target size must be non-zero, got {width}x{height}"
        )));
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| AugmentError::config("pixel buffer does not match image dimensions"))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
